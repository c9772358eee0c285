use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use till_shared::models::{
    Category, Customer, Employee, LineItem, LineItemDetail, Order, OrderStatus, OrderSummary,
    Payment, PaymentDetail, Product,
};

use crate::CoreResult;

/// Repository trait for customer records
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create_customer(&self, customer: &Customer) -> CoreResult<()>;

    async fn get_customer(&self, id: Uuid) -> CoreResult<Option<Customer>>;

    /// Returns false when no row with the customer's id exists.
    async fn update_customer(&self, customer: &Customer) -> CoreResult<bool>;

    async fn delete_customer(&self, id: Uuid) -> CoreResult<bool>;

    async fn list_customers(&self) -> CoreResult<Vec<Customer>>;
}

/// Repository trait for employee records
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create_employee(&self, employee: &Employee) -> CoreResult<()>;

    async fn get_employee(&self, id: Uuid) -> CoreResult<Option<Employee>>;

    async fn update_employee(&self, employee: &Employee) -> CoreResult<bool>;

    async fn delete_employee(&self, id: Uuid) -> CoreResult<bool>;

    async fn list_employees(&self) -> CoreResult<Vec<Employee>>;
}

/// Repository trait for product categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create_category(&self, category: &Category) -> CoreResult<()>;

    async fn get_category(&self, id: Uuid) -> CoreResult<Option<Category>>;

    async fn update_category(&self, category: &Category) -> CoreResult<bool>;

    async fn delete_category(&self, id: Uuid) -> CoreResult<bool>;

    async fn list_categories(&self) -> CoreResult<Vec<Category>>;
}

/// Repository trait for the product catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: &Product) -> CoreResult<()>;

    async fn get_product(&self, id: Uuid) -> CoreResult<Option<Product>>;

    async fn update_product(&self, product: &Product) -> CoreResult<bool>;

    async fn delete_product(&self, id: Uuid) -> CoreResult<bool>;

    async fn list_products(&self) -> CoreResult<Vec<Product>>;

    async fn list_products_by_category(&self, category_id: Uuid) -> CoreResult<Vec<Product>>;
}

/// Repository trait for order rows. The derived columns (total, status) have
/// dedicated update methods so the rest of the row is never rewritten by a
/// recompute.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &Order) -> CoreResult<()>;

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>>;

    /// Rewrites the non-derived fields only.
    async fn update_order_details(
        &self,
        id: Uuid,
        order_date: DateTime<Utc>,
        customer_id: Uuid,
        employee_id: Uuid,
    ) -> CoreResult<bool>;

    async fn delete_order(&self, id: Uuid) -> CoreResult<bool>;

    async fn update_order_total(&self, id: Uuid, total: Decimal) -> CoreResult<bool>;

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> CoreResult<bool>;

    async fn get_order_total(&self, id: Uuid) -> CoreResult<Option<Decimal>>;

    async fn get_order_summary(&self, id: Uuid) -> CoreResult<Option<OrderSummary>>;

    /// All orders joined with party names, newest order date first.
    async fn list_order_summaries(&self) -> CoreResult<Vec<OrderSummary>>;

    /// Case-insensitive containment match over id, customer name, employee
    /// name and status.
    async fn search_order_summaries(&self, term: &str) -> CoreResult<Vec<OrderSummary>>;

    async fn order_summaries_for_customer(&self, customer_id: Uuid) -> CoreResult<Vec<OrderSummary>>;
}

/// Repository trait for order line items, keyed by (order, product)
#[async_trait]
pub trait LineItemRepository: Send + Sync {
    /// Inserts the row or replaces the quantity/unit price of an existing one.
    async fn upsert_line_item(&self, item: &LineItem) -> CoreResult<()>;

    async fn get_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<Option<LineItem>>;

    async fn delete_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<bool>;

    /// Returns the number of rows removed.
    async fn delete_line_items_for_order(&self, order_id: Uuid) -> CoreResult<u64>;

    async fn list_line_items(&self, order_id: Uuid) -> CoreResult<Vec<LineItem>>;

    /// Joined display rows, ordered by product name.
    async fn line_item_details(&self, order_id: Uuid) -> CoreResult<Vec<LineItemDetail>>;

    /// Exact-decimal `Σ(quantity × unit_price)`; zero for an item-less order.
    async fn line_items_total(&self, order_id: Uuid) -> CoreResult<Decimal>;
}

/// Repository trait for payment records
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create_payment(&self, payment: &Payment) -> CoreResult<()>;

    async fn get_payment(&self, id: Uuid) -> CoreResult<Option<Payment>>;

    async fn update_payment(&self, payment: &Payment) -> CoreResult<bool>;

    async fn delete_payment(&self, id: Uuid) -> CoreResult<bool>;

    /// Returns the number of rows removed.
    async fn delete_payments_for_order(&self, order_id: Uuid) -> CoreResult<u64>;

    async fn list_payments_for_order(&self, order_id: Uuid) -> CoreResult<Vec<Payment>>;

    async fn list_payment_details(&self) -> CoreResult<Vec<PaymentDetail>>;

    /// Case-insensitive containment match over id, order id, method, status
    /// and the amount rendered as text.
    async fn search_payment_details(&self, term: &str) -> CoreResult<Vec<PaymentDetail>>;

    /// Sum of `Paid` payments against the order; zero when there are none.
    async fn paid_total(&self, order_id: Uuid) -> CoreResult<Decimal>;
}
