use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use till_core::repository::{LineItemRepository, OrderRepository};
use till_core::{CoreError, CoreResult};
use till_shared::models::{
    LineItem, LineItemDetail, Order, OrderStatus, OrderSummary,
};

use super::db_err;

/// Orders and their line items live in one repository: the line-item queries
/// exist to derive order columns, so they share the order tables' lifecycle.
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_date: DateTime<Utc>,
    total_amount: Decimal,
    status: String,
    customer_id: Uuid,
    employee_id: Uuid,
}

fn to_order(row: OrderRow) -> CoreResult<Order> {
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    Ok(Order {
        id: row.id,
        order_date: row.order_date,
        total_amount: row.total_amount,
        status,
        customer_id: row.customer_id,
        employee_id: row.employee_id,
    })
}

#[derive(sqlx::FromRow)]
struct OrderSummaryRow {
    id: Uuid,
    order_date: DateTime<Utc>,
    total_amount: Decimal,
    status: String,
    customer_id: Uuid,
    employee_id: Uuid,
    customer_name: String,
    employee_name: String,
}

fn to_summary(row: OrderSummaryRow) -> CoreResult<OrderSummary> {
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    Ok(OrderSummary {
        id: row.id,
        order_date: row.order_date,
        total_amount: row.total_amount,
        status,
        customer_id: row.customer_id,
        employee_id: row.employee_id,
        customer_name: row.customer_name,
        employee_name: row.employee_name,
    })
}

#[derive(sqlx::FromRow)]
struct LineItemRow {
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LineItemDetailRow {
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    product_brand: String,
    category_name: String,
    quantity: i32,
    unit_price: Decimal,
    line_total: Decimal,
}

impl From<LineItemDetailRow> for LineItemDetail {
    fn from(row: LineItemDetailRow) -> Self {
        LineItemDetail {
            order_id: row.order_id,
            product_id: row.product_id,
            product_name: row.product_name,
            product_brand: row.product_brand,
            category_name: row.category_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            line_total: row.line_total,
        }
    }
}

const SUMMARY_SELECT: &str = "SELECT o.id, o.order_date, o.total_amount, o.status, \
    o.customer_id, o.employee_id, c.name AS customer_name, e.name AS employee_name \
    FROM orders o \
    JOIN customers c ON c.id = o.customer_id \
    JOIN employees e ON e.id = o.employee_id";

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(&self, order: &Order) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO orders (id, order_date, total_amount, status, customer_id, employee_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order.id)
        .bind(order.order_date)
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .bind(order.customer_id)
        .bind(order.employee_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, order_date, total_amount, status, customer_id, employee_id \
             FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(to_order).transpose()
    }

    async fn update_order_details(
        &self,
        id: Uuid,
        order_date: DateTime<Utc>,
        customer_id: Uuid,
        employee_id: Uuid,
    ) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE orders SET order_date = $2, customer_id = $3, employee_id = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(order_date)
        .bind(customer_id)
        .bind(employee_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_order(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_order_total(&self, id: Uuid, total: Decimal) -> CoreResult<bool> {
        let result = sqlx::query("UPDATE orders SET total_amount = $2 WHERE id = $1")
            .bind(id)
            .bind(total)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> CoreResult<bool> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_order_total(&self, id: Uuid) -> CoreResult<Option<Decimal>> {
        sqlx::query_scalar::<_, Decimal>("SELECT total_amount FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn get_order_summary(&self, id: Uuid) -> CoreResult<Option<OrderSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE o.id = $1");
        let row = sqlx::query_as::<_, OrderSummaryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(to_summary).transpose()
    }

    async fn list_order_summaries(&self) -> CoreResult<Vec<OrderSummary>> {
        let query = format!("{SUMMARY_SELECT} ORDER BY o.order_date DESC");
        let rows = sqlx::query_as::<_, OrderSummaryRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(to_summary).collect()
    }

    async fn search_order_summaries(&self, term: &str) -> CoreResult<Vec<OrderSummary>> {
        let query = format!(
            "{SUMMARY_SELECT} \
             WHERE o.id::text ILIKE $1 OR c.name ILIKE $1 OR e.name ILIKE $1 OR o.status ILIKE $1 \
             ORDER BY o.order_date DESC"
        );
        let rows = sqlx::query_as::<_, OrderSummaryRow>(&query)
            .bind(format!("%{term}%"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(to_summary).collect()
    }

    async fn order_summaries_for_customer(&self, customer_id: Uuid) -> CoreResult<Vec<OrderSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE o.customer_id = $1 ORDER BY o.order_date DESC");
        let rows = sqlx::query_as::<_, OrderSummaryRow>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(to_summary).collect()
    }
}

#[async_trait]
impl LineItemRepository for PgOrderRepository {
    async fn upsert_line_item(&self, item: &LineItem) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (order_id, product_id) \
             DO UPDATE SET quantity = EXCLUDED.quantity, unit_price = EXCLUDED.unit_price",
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<Option<LineItem>> {
        let row = sqlx::query_as::<_, LineItemRow>(
            "SELECT order_id, product_id, quantity, unit_price FROM order_items \
             WHERE order_id = $1 AND product_id = $2",
        )
        .bind(order_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(LineItem::from))
    }

    async fn delete_line_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND product_id = $2")
                .bind(order_id)
                .bind(product_id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_line_items_for_order(&self, order_id: Uuid) -> CoreResult<u64> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }

    async fn list_line_items(&self, order_id: Uuid) -> CoreResult<Vec<LineItem>> {
        let rows = sqlx::query_as::<_, LineItemRow>(
            "SELECT order_id, product_id, quantity, unit_price FROM order_items \
             WHERE order_id = $1 ORDER BY product_id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    async fn line_item_details(&self, order_id: Uuid) -> CoreResult<Vec<LineItemDetail>> {
        let rows = sqlx::query_as::<_, LineItemDetailRow>(
            "SELECT i.order_id, i.product_id, p.name AS product_name, p.brand AS product_brand, \
             g.name AS category_name, i.quantity, i.unit_price, \
             (i.quantity * i.unit_price) AS line_total \
             FROM order_items i \
             JOIN products p ON p.id = i.product_id \
             JOIN categories g ON g.id = p.category_id \
             WHERE i.order_id = $1 \
             ORDER BY p.name",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(LineItemDetail::from).collect())
    }

    async fn line_items_total(&self, order_id: Uuid) -> CoreResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(quantity * unit_price), 0) FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }
}
