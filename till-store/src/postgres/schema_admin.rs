use async_trait::async_trait;
use sqlx::PgPool;

use till_core::CoreResult;

use crate::bootstrap::{SchemaAdmin, TableCount};
use crate::seed;

use super::db_err;

/// Owns the DDL for the whole database. Checks on the derived order columns
/// (`total_amount >= 0`, the status whitelist) are a backstop only: the
/// coordinator keeps them consistent, the database keeps them sane.
pub struct PgSchemaAdmin {
    pool: PgPool,
}

impl PgSchemaAdmin {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Creation order; drops run reversed so referencing tables go first.
const TABLES: [&str; 7] = [
    "customers",
    "employees",
    "categories",
    "products",
    "orders",
    "order_items",
    "payments",
];

const CREATE_TABLES: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS customers (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS employees (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        role TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        size TEXT NOT NULL,
        colour TEXT NOT NULL,
        brand TEXT NOT NULL,
        price NUMERIC(10, 2) NOT NULL CHECK (price > 0),
        stock_qty INTEGER NOT NULL CHECK (stock_qty >= 0),
        category_id UUID NOT NULL REFERENCES categories(id)
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id UUID PRIMARY KEY,
        order_date TIMESTAMPTZ NOT NULL,
        total_amount NUMERIC(10, 2) NOT NULL CHECK (total_amount >= 0),
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'COMPLETED')),
        customer_id UUID NOT NULL REFERENCES customers(id),
        employee_id UUID NOT NULL REFERENCES employees(id)
    )",
    "CREATE TABLE IF NOT EXISTS order_items (
        order_id UUID NOT NULL REFERENCES orders(id),
        product_id UUID NOT NULL REFERENCES products(id),
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        unit_price NUMERIC(10, 2) NOT NULL CHECK (unit_price > 0),
        PRIMARY KEY (order_id, product_id)
    )",
    "CREATE TABLE IF NOT EXISTS payments (
        id UUID PRIMARY KEY,
        order_id UUID NOT NULL REFERENCES orders(id),
        method TEXT NOT NULL CHECK (method IN ('CASH', 'DEBIT', 'CREDIT')),
        amount NUMERIC(10, 2) NOT NULL CHECK (amount > 0),
        status TEXT NOT NULL CHECK (status IN ('PENDING', 'PAID'))
    )",
];

#[async_trait]
impl SchemaAdmin for PgSchemaAdmin {
    async fn drop_schema(&self) -> CoreResult<String> {
        for table in TABLES.iter().rev() {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table} CASCADE"))
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        }
        Ok("All tables dropped".to_string())
    }

    async fn create_schema(&self) -> CoreResult<String> {
        for ddl in CREATE_TABLES {
            sqlx::query(ddl).execute(&self.pool).await.map_err(db_err)?;
        }
        Ok("Schema created".to_string())
    }

    async fn seed_sample_data(&self) -> CoreResult<String> {
        let data = seed::sample_data();
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for category in &data.categories {
            sqlx::query(
                "INSERT INTO categories (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
            )
            .bind(category.id)
            .bind(&category.name)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for customer in &data.customers {
            sqlx::query(
                "INSERT INTO customers (id, name, email, phone) VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(customer.id)
            .bind(&customer.name)
            .bind(customer.email.as_ref().map(|e| e.as_inner().as_str()))
            .bind(customer.phone.as_inner())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for employee in &data.employees {
            sqlx::query(
                "INSERT INTO employees (id, name, email, phone, role) \
                 VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            )
            .bind(employee.id)
            .bind(&employee.name)
            .bind(employee.email.as_inner())
            .bind(employee.phone.as_inner())
            .bind(&employee.role)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for product in &data.products {
            sqlx::query(
                "INSERT INTO products (id, name, size, colour, brand, price, stock_qty, category_id) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) ON CONFLICT (id) DO NOTHING",
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.size)
            .bind(&product.colour)
            .bind(&product.brand)
            .bind(product.price)
            .bind(product.stock_qty)
            .bind(product.category_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for order in &data.orders {
            sqlx::query(
                "INSERT INTO orders (id, order_date, total_amount, status, customer_id, employee_id) \
                 VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (id) DO NOTHING",
            )
            .bind(order.id)
            .bind(order.order_date)
            .bind(order.total_amount)
            .bind(order.status.as_str())
            .bind(order.customer_id)
            .bind(order.employee_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for item in &data.line_items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (order_id, product_id) DO NOTHING",
            )
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        for payment in &data.payments {
            sqlx::query(
                "INSERT INTO payments (id, order_id, method, amount, status) \
                 VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            )
            .bind(payment.id)
            .bind(payment.order_id)
            .bind(payment.method.as_str())
            .bind(payment.amount)
            .bind(payment.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok("Sample data loaded".to_string())
    }

    async fn inspect(&self) -> CoreResult<Vec<TableCount>> {
        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
            counts.push(TableCount {
                table: table.to_string(),
                rows,
            });
        }
        Ok(counts)
    }
}
