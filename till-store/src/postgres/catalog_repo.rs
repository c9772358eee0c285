use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use till_core::repository::{CategoryRepository, ProductRepository};
use till_core::CoreResult;
use till_shared::models::{Category, Product};

use super::db_err;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    size: String,
    colour: String,
    brand: String,
    price: Decimal,
    stock_qty: i32,
    category_id: Uuid,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            size: row.size,
            colour: row.colour,
            brand: row.brand,
            price: row.price,
            stock_qty: row.stock_qty,
            category_id: row.category_id,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, size, colour, brand, price, stock_qty, category_id";

#[async_trait]
impl CategoryRepository for PgCatalogRepository {
    async fn create_category(&self, category: &Category) -> CoreResult<()> {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn get_category(&self, id: Uuid) -> CoreResult<Option<Category>> {
        let row =
            sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Category::from))
    }

    async fn update_category(&self, category: &Category) -> CoreResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_category(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        let rows =
            sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}

#[async_trait]
impl ProductRepository for PgCatalogRepository {
    async fn create_product(&self, product: &Product) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, size, colour, brand, price, stock_qty, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.size)
        .bind(&product.colour)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.stock_qty)
        .bind(product.category_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> CoreResult<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Product::from))
    }

    async fn update_product(&self, product: &Product) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, size = $3, colour = $4, brand = $5, price = $6, \
             stock_qty = $7, category_id = $8 WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.size)
        .bind(&product.colour)
        .bind(&product.brand)
        .bind(product.price)
        .bind(product.stock_qty)
        .bind(product.category_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_products(&self) -> CoreResult<Vec<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_products_by_category(&self, category_id: Uuid) -> CoreResult<Vec<Product>> {
        let query =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY name");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
