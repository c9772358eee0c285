use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use till_core::repository::PaymentRepository;
use till_core::{CoreError, CoreResult};
use till_shared::models::{Payment, PaymentDetail, PaymentMethod, PaymentStatus};

use super::db_err;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    order_id: Uuid,
    method: String,
    amount: Decimal,
    status: String,
}

fn to_payment(row: PaymentRow) -> CoreResult<Payment> {
    let method = row
        .method
        .parse::<PaymentMethod>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    let status = row
        .status
        .parse::<PaymentStatus>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    Ok(Payment {
        id: row.id,
        order_id: row.order_id,
        method,
        amount: row.amount,
        status,
    })
}

#[derive(sqlx::FromRow)]
struct PaymentDetailRow {
    id: Uuid,
    order_id: Uuid,
    method: String,
    amount: Decimal,
    status: String,
    order_date: DateTime<Utc>,
    customer_name: String,
}

fn to_detail(row: PaymentDetailRow) -> CoreResult<PaymentDetail> {
    let method = row
        .method
        .parse::<PaymentMethod>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    let status = row
        .status
        .parse::<PaymentStatus>()
        .map_err(|e| CoreError::Storage(e.to_string()))?;
    Ok(PaymentDetail {
        id: row.id,
        order_id: row.order_id,
        method,
        amount: row.amount,
        status,
        order_date: row.order_date,
        customer_name: row.customer_name,
    })
}

const DETAIL_SELECT: &str = "SELECT p.id, p.order_id, p.method, p.amount, p.status, \
    o.order_date, c.name AS customer_name \
    FROM payments p \
    JOIN orders o ON o.id = p.order_id \
    JOIN customers c ON c.id = o.customer_id";

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn create_payment(&self, payment: &Payment) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO payments (id, order_id, method, amount, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(payment.id)
        .bind(payment.order_id)
        .bind(payment.method.as_str())
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_payment(&self, id: Uuid) -> CoreResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, order_id, method, amount, status FROM payments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(to_payment).transpose()
    }

    async fn update_payment(&self, payment: &Payment) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE payments SET order_id = $2, method = $3, amount = $4, status = $5 \
             WHERE id = $1",
        )
        .bind(payment.id)
        .bind(payment.order_id)
        .bind(payment.method.as_str())
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_payment(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_payments_for_order(&self, order_id: Uuid) -> CoreResult<u64> {
        let result = sqlx::query("DELETE FROM payments WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected())
    }

    async fn list_payments_for_order(&self, order_id: Uuid) -> CoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, order_id, method, amount, status FROM payments \
             WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(to_payment).collect()
    }

    async fn list_payment_details(&self) -> CoreResult<Vec<PaymentDetail>> {
        let query = format!("{DETAIL_SELECT} ORDER BY p.id");
        let rows = sqlx::query_as::<_, PaymentDetailRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(to_detail).collect()
    }

    async fn search_payment_details(&self, term: &str) -> CoreResult<Vec<PaymentDetail>> {
        let query = format!(
            "{DETAIL_SELECT} \
             WHERE p.id::text ILIKE $1 OR p.order_id::text ILIKE $1 OR p.method ILIKE $1 \
             OR p.status ILIKE $1 OR p.amount::text ILIKE $1 \
             ORDER BY p.id"
        );
        let rows = sqlx::query_as::<_, PaymentDetailRow>(&query)
            .bind(format!("%{term}%"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(to_detail).collect()
    }

    async fn paid_total(&self, order_id: Uuid) -> CoreResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE order_id = $1 AND status = $2",
        )
        .bind(order_id)
        .bind(PaymentStatus::Paid.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }
}
