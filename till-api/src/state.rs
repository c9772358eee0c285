use std::sync::Arc;

use till_catalog::ProductCatalog;
use till_core::repository::{
    CategoryRepository, CustomerRepository, EmployeeRepository, LineItemRepository,
    OrderRepository, PaymentRepository, ProductRepository,
};
use till_order::{LineItemLedger, OrderCoordinator, PaymentLedger};
use till_store::{
    DbClient, MemoryStore, PgCatalogRepository, PgOrderRepository, PgPartyRepository,
    PgPaymentRepository, PgSchemaAdmin, SchemaAdmin,
};

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub catalog: Arc<ProductCatalog>,
    pub items: Arc<LineItemLedger>,
    pub payments: Arc<PaymentLedger>,
    pub coordinator: Arc<OrderCoordinator>,
    pub schema: Arc<dyn SchemaAdmin>,
}

impl AppState {
    /// Wires the service layer over one set of repositories. Every handler
    /// that can move an order's derived columns goes through `coordinator`;
    /// the plain repository handles are for reads and party/catalog upkeep.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        customers: Arc<dyn CustomerRepository>,
        employees: Arc<dyn EmployeeRepository>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        line_items: Arc<dyn LineItemRepository>,
        payment_rows: Arc<dyn PaymentRepository>,
        schema: Arc<dyn SchemaAdmin>,
    ) -> Self {
        let catalog = Arc::new(ProductCatalog::new(products.clone(), categories));
        let items = Arc::new(LineItemLedger::new(orders.clone(), products, line_items));
        let payments = Arc::new(PaymentLedger::new(payment_rows));
        let coordinator = Arc::new(OrderCoordinator::new(
            orders.clone(),
            items.clone(),
            payments.clone(),
        ));

        Self {
            customers,
            employees,
            orders,
            catalog,
            items,
            payments,
            coordinator,
            schema,
        }
    }

    pub fn with_memory_store() -> Self {
        let store = MemoryStore::new();
        Self::build(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    pub fn with_postgres(db: &DbClient) -> Self {
        let party = Arc::new(PgPartyRepository::new(db.pool.clone()));
        let catalog = Arc::new(PgCatalogRepository::new(db.pool.clone()));
        let orders = Arc::new(PgOrderRepository::new(db.pool.clone()));
        let payments = Arc::new(PgPaymentRepository::new(db.pool.clone()));
        let schema = Arc::new(PgSchemaAdmin::new(db.pool.clone()));
        Self::build(
            party.clone(),
            party,
            catalog.clone(),
            catalog,
            orders.clone(),
            orders,
            payments,
            schema,
        )
    }
}
