use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use till_core::repository::{
    CategoryRepository, CustomerRepository, EmployeeRepository, OrderRepository,
    ProductRepository,
};
use till_shared::models::{Category, Customer, Employee, Order, OrderStatus, Product};
use till_store::MemoryStore;

use crate::{LineItemLedger, OrderCoordinator, PaymentLedger};

/// Shared test setup: an in-memory store seeded with one open order for
/// John Doe, rung up by Alice Johnson, plus two catalog products.
pub struct Rig {
    pub store: MemoryStore,
    pub items: Arc<LineItemLedger>,
    pub payments: Arc<PaymentLedger>,
    pub coordinator: OrderCoordinator,
    pub order_id: Uuid,
    pub jeans_id: Uuid,
    pub belt_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
}

pub async fn rig() -> Rig {
    let store = MemoryStore::new();

    let customer = Customer::new("John Doe", Some("john.doe@example.com".into()), "416-555-0101");
    store.create_customer(&customer).await.unwrap();
    let employee = Employee::new(
        "Alice Johnson",
        "alice.johnson@example.com",
        "416-555-0201",
        "Cashier",
    );
    store.create_employee(&employee).await.unwrap();

    let category = Category::new("Men's Wear");
    store.create_category(&category).await.unwrap();
    let jeans = Product::new(
        "Blue Jeans",
        "M",
        "Blue",
        "Levis",
        Decimal::new(5999, 2),
        100,
        category.id,
    );
    store.create_product(&jeans).await.unwrap();
    let belt = Product::new(
        "Leather Belt",
        "L",
        "Brown",
        "Fossil",
        Decimal::new(1999, 2),
        200,
        category.id,
    );
    store.create_product(&belt).await.unwrap();

    let order = Order::new(customer.id, employee.id, None);
    store.create_order(&order).await.unwrap();

    let items = Arc::new(LineItemLedger::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    ));
    let payments = Arc::new(PaymentLedger::new(Arc::new(store.clone())));
    let coordinator = OrderCoordinator::new(
        Arc::new(store.clone()),
        Arc::clone(&items),
        Arc::clone(&payments),
    );

    Rig {
        store,
        items,
        payments,
        coordinator,
        order_id: order.id,
        jeans_id: jeans.id,
        belt_id: belt.id,
        customer_id: customer.id,
        employee_id: employee.id,
    }
}

pub async fn order_row(rig: &Rig, order_id: Uuid) -> Option<Order> {
    rig.store.get_order(order_id).await.unwrap()
}

pub async fn stored_total(rig: &Rig) -> Decimal {
    order_row(rig, rig.order_id).await.unwrap().total_amount
}

pub async fn stored_status(rig: &Rig) -> OrderStatus {
    stored_status_of(rig, rig.order_id).await
}

pub async fn stored_status_of(rig: &Rig, order_id: Uuid) -> OrderStatus {
    order_row(rig, order_id).await.unwrap().status
}

pub async fn create_order(rig: &Rig, order: &Order) {
    rig.store.create_order(order).await.unwrap();
}

pub async fn delete_order_row(rig: &Rig, order_id: Uuid) {
    rig.store.delete_order(order_id).await.unwrap();
}
