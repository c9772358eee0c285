use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use till_core::repository::{
    CategoryRepository, CustomerRepository, EmployeeRepository, LineItemRepository,
    OrderRepository, PaymentRepository, ProductRepository,
};
use till_core::{search, CoreError, CoreResult};
use till_shared::models::{
    Category, Customer, Employee, LineItem, LineItemDetail, Order, OrderStatus, OrderSummary,
    Payment, PaymentDetail, Product,
};

use crate::bootstrap::{SchemaAdmin, TableCount};
use crate::seed;

#[derive(Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    employees: HashMap<Uuid, Employee>,
    categories: HashMap<Uuid, Category>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
    line_items: HashMap<(Uuid, Uuid), LineItem>,
    payments: HashMap<Uuid, Payment>,
}

impl Tables {
    fn order_summary(&self, order: &Order) -> Option<OrderSummary> {
        let customer = self.customers.get(&order.customer_id)?;
        let employee = self.employees.get(&order.employee_id)?;
        Some(OrderSummary {
            id: order.id,
            order_date: order.order_date,
            total_amount: order.total_amount,
            status: order.status,
            customer_id: order.customer_id,
            employee_id: order.employee_id,
            customer_name: customer.name.clone(),
            employee_name: employee.name.clone(),
        })
    }

    fn payment_detail(&self, payment: &Payment) -> Option<PaymentDetail> {
        let order = self.orders.get(&payment.order_id)?;
        let customer = self.customers.get(&order.customer_id)?;
        Some(PaymentDetail {
            id: payment.id,
            order_id: payment.order_id,
            method: payment.method,
            amount: payment.amount,
            status: payment.status,
            order_date: order.order_date,
            customer_name: customer.name.clone(),
        })
    }

    fn line_item_detail(&self, item: &LineItem) -> Option<LineItemDetail> {
        let product = self.products.get(&item.product_id)?;
        let category = self.categories.get(&product.category_id)?;
        Some(LineItemDetail {
            order_id: item.order_id,
            product_id: item.product_id,
            product_name: product.name.clone(),
            product_brand: product.brand.clone(),
            category_name: category.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
        })
    }
}

/// HashMap-backed store used for development and tests. It enforces the same
/// referential rules the Postgres schema declares, so a write that a foreign
/// key would reject there fails here too, with the same error category.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn fk_violation(reference: String) -> CoreError {
    CoreError::Storage(format!("foreign key violation: {reference}"))
}

fn still_referenced(what: &str) -> CoreError {
    CoreError::Storage(format!("restricted by dependent rows: {what}"))
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create_customer(&self, customer: &Customer) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        t.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn get_customer(&self, id: Uuid) -> CoreResult<Option<Customer>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn update_customer(&self, customer: &Customer) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.customers.get_mut(&customer.id) {
            Some(slot) => {
                *slot = customer.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_customer(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.orders.values().any(|o| o.customer_id == id) {
            return Err(still_referenced("customer has orders"));
        }
        Ok(t.customers.remove(&id).is_some())
    }

    async fn list_customers(&self) -> CoreResult<Vec<Customer>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Customer> = t.customers.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn create_employee(&self, employee: &Employee) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        t.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn get_employee(&self, id: Uuid) -> CoreResult<Option<Employee>> {
        Ok(self.tables.read().await.employees.get(&id).cloned())
    }

    async fn update_employee(&self, employee: &Employee) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.employees.get_mut(&employee.id) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_employee(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.orders.values().any(|o| o.employee_id == id) {
            return Err(still_referenced("employee has orders"));
        }
        Ok(t.employees.remove(&id).is_some())
    }

    async fn list_employees(&self) -> CoreResult<Vec<Employee>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Employee> = t.employees.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create_category(&self, category: &Category) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        t.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn get_category(&self, id: Uuid) -> CoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn update_category(&self, category: &Category) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.categories.get_mut(&category.id) {
            Some(slot) => {
                *slot = category.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.products.values().any(|p| p.category_id == id) {
            return Err(still_referenced("category has products"));
        }
        Ok(t.categories.remove(&id).is_some())
    }

    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Category> = t.categories.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create_product(&self, product: &Product) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if !t.categories.contains_key(&product.category_id) {
            return Err(fk_violation(format!(
                "category {} is not present",
                product.category_id
            )));
        }
        t.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> CoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn update_product(&self, product: &Product) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.categories.contains_key(&product.category_id) {
            return Err(fk_violation(format!(
                "category {} is not present",
                product.category_id
            )));
        }
        match t.products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.line_items.keys().any(|(_, product_id)| *product_id == id) {
            return Err(still_referenced("product appears on order lines"));
        }
        Ok(t.products.remove(&id).is_some())
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Product> = t.products.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_products_by_category(&self, category_id: Uuid) -> CoreResult<Vec<Product>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Product> = t
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create_order(&self, order: &Order) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if !t.customers.contains_key(&order.customer_id) {
            return Err(fk_violation(format!(
                "customer {} is not present",
                order.customer_id
            )));
        }
        if !t.employees.contains_key(&order.employee_id) {
            return Err(fk_violation(format!(
                "employee {} is not present",
                order.employee_id
            )));
        }
        t.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn update_order_details(
        &self,
        id: Uuid,
        order_date: DateTime<Utc>,
        customer_id: Uuid,
        employee_id: Uuid,
    ) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.customers.contains_key(&customer_id) {
            return Err(fk_violation(format!("customer {customer_id} is not present")));
        }
        if !t.employees.contains_key(&employee_id) {
            return Err(fk_violation(format!("employee {employee_id} is not present")));
        }
        match t.orders.get_mut(&id) {
            Some(order) => {
                order.order_date = order_date;
                order.customer_id = customer_id;
                order.employee_id = employee_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_order(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if t.line_items.keys().any(|(order_id, _)| *order_id == id) {
            return Err(still_referenced("order has line items"));
        }
        if t.payments.values().any(|p| p.order_id == id) {
            return Err(still_referenced("order has payments"));
        }
        Ok(t.orders.remove(&id).is_some())
    }

    async fn update_order_total(&self, id: Uuid, total: Decimal) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.orders.get_mut(&id) {
            Some(order) => {
                order.total_amount = total;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        match t.orders.get_mut(&id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_order_total(&self, id: Uuid) -> CoreResult<Option<Decimal>> {
        Ok(self
            .tables
            .read()
            .await
            .orders
            .get(&id)
            .map(|o| o.total_amount))
    }

    async fn get_order_summary(&self, id: Uuid) -> CoreResult<Option<OrderSummary>> {
        let t = self.tables.read().await;
        Ok(t.orders.get(&id).and_then(|o| t.order_summary(o)))
    }

    async fn list_order_summaries(&self) -> CoreResult<Vec<OrderSummary>> {
        let t = self.tables.read().await;
        let mut rows: Vec<OrderSummary> =
            t.orders.values().filter_map(|o| t.order_summary(o)).collect();
        rows.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(rows)
    }

    async fn search_order_summaries(&self, term: &str) -> CoreResult<Vec<OrderSummary>> {
        let mut rows = self.list_order_summaries().await?;
        rows.retain(|s| {
            let id = s.id.to_string();
            search::matches_any(
                term,
                [
                    id.as_str(),
                    s.customer_name.as_str(),
                    s.employee_name.as_str(),
                    s.status.as_str(),
                ],
            )
        });
        Ok(rows)
    }

    async fn order_summaries_for_customer(&self, customer_id: Uuid) -> CoreResult<Vec<OrderSummary>> {
        let t = self.tables.read().await;
        let mut rows: Vec<OrderSummary> = t
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .filter_map(|o| t.order_summary(o))
            .collect();
        rows.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(rows)
    }
}

#[async_trait]
impl LineItemRepository for MemoryStore {
    async fn upsert_line_item(&self, item: &LineItem) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if !t.orders.contains_key(&item.order_id) {
            return Err(fk_violation(format!("order {} is not present", item.order_id)));
        }
        if !t.products.contains_key(&item.product_id) {
            return Err(fk_violation(format!(
                "product {} is not present",
                item.product_id
            )));
        }
        t.line_items
            .insert((item.order_id, item.product_id), item.clone());
        Ok(())
    }

    async fn get_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<Option<LineItem>> {
        Ok(self
            .tables
            .read()
            .await
            .line_items
            .get(&(order_id, product_id))
            .cloned())
    }

    async fn delete_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        Ok(t.line_items.remove(&(order_id, product_id)).is_some())
    }

    async fn delete_line_items_for_order(&self, order_id: Uuid) -> CoreResult<u64> {
        let mut t = self.tables.write().await;
        let before = t.line_items.len();
        t.line_items.retain(|(oid, _), _| *oid != order_id);
        Ok((before - t.line_items.len()) as u64)
    }

    async fn list_line_items(&self, order_id: Uuid) -> CoreResult<Vec<LineItem>> {
        let t = self.tables.read().await;
        let mut rows: Vec<LineItem> = t
            .line_items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        Ok(rows)
    }

    async fn line_item_details(&self, order_id: Uuid) -> CoreResult<Vec<LineItemDetail>> {
        let t = self.tables.read().await;
        let mut rows: Vec<LineItemDetail> = t
            .line_items
            .values()
            .filter(|i| i.order_id == order_id)
            .filter_map(|i| t.line_item_detail(i))
            .collect();
        rows.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(rows)
    }

    async fn line_items_total(&self, order_id: Uuid) -> CoreResult<Decimal> {
        let t = self.tables.read().await;
        Ok(t.line_items
            .values()
            .filter(|i| i.order_id == order_id)
            .map(|i| i.line_total())
            .sum())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn create_payment(&self, payment: &Payment) -> CoreResult<()> {
        let mut t = self.tables.write().await;
        if !t.orders.contains_key(&payment.order_id) {
            return Err(fk_violation(format!(
                "order {} is not present",
                payment.order_id
            )));
        }
        t.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn get_payment(&self, id: Uuid) -> CoreResult<Option<Payment>> {
        Ok(self.tables.read().await.payments.get(&id).cloned())
    }

    async fn update_payment(&self, payment: &Payment) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.orders.contains_key(&payment.order_id) {
            return Err(fk_violation(format!(
                "order {} is not present",
                payment.order_id
            )));
        }
        match t.payments.get_mut(&payment.id) {
            Some(slot) => {
                *slot = payment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_payment(&self, id: Uuid) -> CoreResult<bool> {
        let mut t = self.tables.write().await;
        Ok(t.payments.remove(&id).is_some())
    }

    async fn delete_payments_for_order(&self, order_id: Uuid) -> CoreResult<u64> {
        let mut t = self.tables.write().await;
        let before = t.payments.len();
        t.payments.retain(|_, p| p.order_id != order_id);
        Ok((before - t.payments.len()) as u64)
    }

    async fn list_payments_for_order(&self, order_id: Uuid) -> CoreResult<Vec<Payment>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Payment> = t
            .payments
            .values()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn list_payment_details(&self) -> CoreResult<Vec<PaymentDetail>> {
        let t = self.tables.read().await;
        let mut rows: Vec<PaymentDetail> = t
            .payments
            .values()
            .filter_map(|p| t.payment_detail(p))
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn search_payment_details(&self, term: &str) -> CoreResult<Vec<PaymentDetail>> {
        let mut rows = self.list_payment_details().await?;
        rows.retain(|d| {
            let id = d.id.to_string();
            let order_id = d.order_id.to_string();
            let amount = d.amount.to_string();
            search::matches_any(
                term,
                [
                    id.as_str(),
                    order_id.as_str(),
                    d.method.as_str(),
                    d.status.as_str(),
                    amount.as_str(),
                ],
            )
        });
        Ok(rows)
    }

    async fn paid_total(&self, order_id: Uuid) -> CoreResult<Decimal> {
        let t = self.tables.read().await;
        Ok(t.payments
            .values()
            .filter(|p| p.order_id == order_id && p.counts_as_paid())
            .map(|p| p.amount)
            .sum())
    }
}

#[async_trait]
impl SchemaAdmin for MemoryStore {
    async fn drop_schema(&self) -> CoreResult<String> {
        let mut t = self.tables.write().await;
        *t = Tables::default();
        Ok("All records dropped".to_string())
    }

    async fn create_schema(&self) -> CoreResult<String> {
        Ok("Schema ready (in-memory tables need no DDL)".to_string())
    }

    async fn seed_sample_data(&self) -> CoreResult<String> {
        let data = seed::sample_data();
        let mut t = self.tables.write().await;
        for row in data.categories {
            t.categories.insert(row.id, row);
        }
        for row in data.customers {
            t.customers.insert(row.id, row);
        }
        for row in data.employees {
            t.employees.insert(row.id, row);
        }
        for row in data.products {
            t.products.insert(row.id, row);
        }
        for row in data.orders {
            t.orders.insert(row.id, row);
        }
        for row in data.line_items {
            t.line_items.insert((row.order_id, row.product_id), row);
        }
        for row in data.payments {
            t.payments.insert(row.id, row);
        }
        Ok("Sample data loaded".to_string())
    }

    async fn inspect(&self) -> CoreResult<Vec<TableCount>> {
        let t = self.tables.read().await;
        Ok(vec![
            TableCount { table: "customers".into(), rows: t.customers.len() as i64 },
            TableCount { table: "employees".into(), rows: t.employees.len() as i64 },
            TableCount { table: "categories".into(), rows: t.categories.len() as i64 },
            TableCount { table: "products".into(), rows: t.products.len() as i64 },
            TableCount { table: "orders".into(), rows: t.orders.len() as i64 },
            TableCount { table: "order_items".into(), rows: t.line_items.len() as i64 },
            TableCount { table: "payments".into(), rows: t.payments.len() as i64 },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_shared::models::{PaymentMethod, PaymentStatus};

    struct Seeded {
        store: MemoryStore,
        customer: Customer,
        employee: Employee,
        category: Category,
        product: Product,
        order: Order,
    }

    async fn seeded() -> Seeded {
        let store = MemoryStore::new();
        let customer = Customer::new("Jane Smith", Some("jane@example.com".into()), "416-555-0102");
        store.create_customer(&customer).await.unwrap();
        let employee = Employee::new("Bob Lee", "bob@example.com", "416-555-0202", "Cashier");
        store.create_employee(&employee).await.unwrap();
        let category = Category::new("Accessories");
        store.create_category(&category).await.unwrap();
        let product = Product::new(
            "Leather Belt",
            "L",
            "Brown",
            "Fossil",
            Decimal::new(1999, 2),
            200,
            category.id,
        );
        store.create_product(&product).await.unwrap();
        let order = Order::new(customer.id, employee.id, None);
        store.create_order(&order).await.unwrap();
        Seeded {
            store,
            customer,
            employee,
            category,
            product,
            order,
        }
    }

    #[tokio::test]
    async fn payment_for_missing_order_is_rejected() {
        let s = seeded().await;
        let payment = Payment::new(
            Uuid::new_v4(),
            PaymentMethod::Cash,
            Decimal::new(100, 2),
            PaymentStatus::Pending,
        );
        let err = s.store.create_payment(&payment).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn product_requires_existing_category() {
        let s = seeded().await;
        let product = Product::new(
            "Scarf",
            "One Size",
            "Grey",
            "Acme",
            Decimal::new(999, 2),
            10,
            Uuid::new_v4(),
        );
        let err = s.store.create_product(&product).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn order_requires_existing_parties() {
        let s = seeded().await;
        let order = Order::new(Uuid::new_v4(), s.employee.id, None);
        assert!(s.store.create_order(&order).await.is_err());
        let order = Order::new(s.customer.id, Uuid::new_v4(), None);
        assert!(s.store.create_order(&order).await.is_err());
    }

    #[tokio::test]
    async fn referenced_rows_cannot_be_deleted() {
        let s = seeded().await;
        assert!(s.store.delete_customer(s.customer.id).await.is_err());
        assert!(s.store.delete_employee(s.employee.id).await.is_err());
        assert!(s.store.delete_category(s.category.id).await.is_err());

        let item = LineItem::new(s.order.id, s.product.id, 1, Decimal::new(1999, 2));
        s.store.upsert_line_item(&item).await.unwrap();
        assert!(s.store.delete_product(s.product.id).await.is_err());
        assert!(s.store.delete_order(s.order.id).await.is_err());
    }

    #[tokio::test]
    async fn upsert_replaces_the_line_for_a_product() {
        let s = seeded().await;
        let first = LineItem::new(s.order.id, s.product.id, 1, Decimal::new(1999, 2));
        s.store.upsert_line_item(&first).await.unwrap();
        let second = LineItem::new(s.order.id, s.product.id, 4, Decimal::new(1500, 2));
        s.store.upsert_line_item(&second).await.unwrap();

        let rows = s.store.list_line_items(s.order.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 4);
        assert_eq!(
            s.store.line_items_total(s.order.id).await.unwrap(),
            Decimal::new(6000, 2)
        );
    }

    #[tokio::test]
    async fn customers_are_listed_by_name() {
        let s = seeded().await;
        let adam = Customer::new("Adam Young", None, "416-555-0110");
        s.store.create_customer(&adam).await.unwrap();

        let names: Vec<String> = s
            .store
            .list_customers()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Adam Young".to_string(), "Jane Smith".to_string()]);
    }

    #[tokio::test]
    async fn summaries_carry_party_names_and_sort_newest_first() {
        let s = seeded().await;
        let older = Order {
            order_date: Utc::now() - chrono::Duration::days(2),
            ..Order::new(s.customer.id, s.employee.id, None)
        };
        s.store.create_order(&older).await.unwrap();

        let rows = s.store.list_order_summaries().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, s.order.id);
        assert_eq!(rows[1].id, older.id);
        assert_eq!(rows[0].customer_name, "Jane Smith");
        assert_eq!(rows[0].employee_name, "Bob Lee");
    }

    #[tokio::test]
    async fn order_search_matches_names_and_status() {
        let s = seeded().await;
        let by_name = s.store.search_order_summaries("jane").await.unwrap();
        assert_eq!(by_name.len(), 1);
        let by_status = s.store.search_order_summaries("pend").await.unwrap();
        assert_eq!(by_status.len(), 1);
        let none = s.store.search_order_summaries("completed").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn payment_search_matches_amount_text() {
        let s = seeded().await;
        let payment = Payment::new(
            s.order.id,
            PaymentMethod::Credit,
            Decimal::new(8950, 2),
            PaymentStatus::Paid,
        );
        s.store.create_payment(&payment).await.unwrap();

        let by_amount = s.store.search_payment_details("89.50").await.unwrap();
        assert_eq!(by_amount.len(), 1);
        assert_eq!(by_amount[0].customer_name, "Jane Smith");
        let by_method = s.store.search_payment_details("credit").await.unwrap();
        assert_eq!(by_method.len(), 1);
        assert!(s.store.search_payment_details("debit").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeding_twice_does_not_duplicate_rows() {
        let store = MemoryStore::new();
        store.seed_sample_data().await.unwrap();
        let first: Vec<i64> = store.inspect().await.unwrap().iter().map(|c| c.rows).collect();
        store.seed_sample_data().await.unwrap();
        let second: Vec<i64> = store.inspect().await.unwrap().iter().map(|c| c.rows).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|rows| *rows > 0));
    }

    #[tokio::test]
    async fn drop_schema_clears_everything() {
        let store = MemoryStore::new();
        store.seed_sample_data().await.unwrap();
        store.drop_schema().await.unwrap();
        let counts = store.inspect().await.unwrap();
        assert!(counts.iter().all(|c| c.rows == 0));
    }
}
