use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use till_core::repository::{CategoryRepository, ProductRepository};
use till_core::{CoreError, CoreResult};
use till_shared::models::{Category, Product};

/// Client-supplied product fields, validated before they become a `Product`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub size: String,
    pub colour: String,
    pub brand: String,
    pub price: Decimal,
    pub stock_qty: i32,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

/// Product and category maintenance. Owns the validation the storage schema
/// also enforces (positive price, non-negative stock, existing category) so
/// bad input is rejected with `InvalidInput`/`NotFound` before a write is
/// attempted.
pub struct ProductCatalog {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductCatalog {
    pub fn new(products: Arc<dyn ProductRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn create_product(&self, draft: ProductDraft) -> CoreResult<Product> {
        self.validate_product(&draft).await?;
        let product = Product::new(
            draft.name,
            draft.size,
            draft.colour,
            draft.brand,
            draft.price,
            draft.stock_qty,
            draft.category_id,
        );
        self.products.create_product(&product).await?;
        Ok(product)
    }

    pub async fn update_product(&self, id: Uuid, draft: ProductDraft) -> CoreResult<Product> {
        self.validate_product(&draft).await?;
        let mut product = self.get_product(id).await?;
        product.name = draft.name;
        product.size = draft.size;
        product.colour = draft.colour;
        product.brand = draft.brand;
        product.price = draft.price;
        product.stock_qty = draft.stock_qty;
        product.category_id = draft.category_id;
        if !self.products.update_product(&product).await? {
            return Err(CoreError::NotFound(format!("product {id}")));
        }
        Ok(product)
    }

    pub async fn get_product(&self, id: Uuid) -> CoreResult<Product> {
        self.products
            .get_product(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("product {id}")))
    }

    pub async fn delete_product(&self, id: Uuid) -> CoreResult<()> {
        if !self.products.delete_product(id).await? {
            return Err(CoreError::NotFound(format!("product {id}")));
        }
        Ok(())
    }

    pub async fn list_products(&self) -> CoreResult<Vec<Product>> {
        self.products.list_products().await
    }

    pub async fn products_in_category(&self, category_id: Uuid) -> CoreResult<Vec<Product>> {
        self.products.list_products_by_category(category_id).await
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> CoreResult<Category> {
        Self::validate_category(&draft)?;
        let category = Category::new(draft.name);
        self.categories.create_category(&category).await?;
        Ok(category)
    }

    pub async fn update_category(&self, id: Uuid, draft: CategoryDraft) -> CoreResult<Category> {
        Self::validate_category(&draft)?;
        let mut category = self.get_category(id).await?;
        category.name = draft.name;
        if !self.categories.update_category(&category).await? {
            return Err(CoreError::NotFound(format!("category {id}")));
        }
        Ok(category)
    }

    pub async fn get_category(&self, id: Uuid) -> CoreResult<Category> {
        self.categories
            .get_category(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("category {id}")))
    }

    pub async fn delete_category(&self, id: Uuid) -> CoreResult<()> {
        if !self.categories.delete_category(id).await? {
            return Err(CoreError::NotFound(format!("category {id}")));
        }
        Ok(())
    }

    pub async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        self.categories.list_categories().await
    }

    async fn validate_product(&self, draft: &ProductDraft) -> CoreResult<()> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::InvalidInput("product name must not be empty".into()));
        }
        if draft.brand.trim().is_empty() {
            return Err(CoreError::InvalidInput("product brand must not be empty".into()));
        }
        if draft.price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "product price must be positive, got {}",
                draft.price
            )));
        }
        if draft.stock_qty < 0 {
            return Err(CoreError::InvalidInput(format!(
                "stock quantity must not be negative, got {}",
                draft.stock_qty
            )));
        }
        self.categories
            .get_category(draft.category_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("category {}", draft.category_id)))?;
        Ok(())
    }

    fn validate_category(draft: &CategoryDraft) -> CoreResult<()> {
        if draft.name.trim().is_empty() {
            return Err(CoreError::InvalidInput("category name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_store::MemoryStore;

    fn catalog() -> ProductCatalog {
        let store = MemoryStore::new();
        ProductCatalog::new(Arc::new(store.clone()), Arc::new(store))
    }

    fn draft(category_id: Uuid) -> ProductDraft {
        ProductDraft {
            name: "Blue Jeans".into(),
            size: "M".into(),
            colour: "Blue".into(),
            brand: "Levis".into(),
            price: Decimal::new(5999, 2),
            stock_qty: 100,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_product_requires_existing_category() {
        let catalog = catalog();
        let err = catalog.create_product(draft(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_product_rejects_non_positive_price() {
        let catalog = catalog();
        let category = catalog
            .create_category(CategoryDraft { name: "Men's Wear".into() })
            .await
            .unwrap();
        let mut bad = draft(category.id);
        bad.price = Decimal::ZERO;
        let err = catalog.create_product(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_product_rejects_negative_stock() {
        let catalog = catalog();
        let category = catalog
            .create_category(CategoryDraft { name: "Accessories".into() })
            .await
            .unwrap();
        let mut bad = draft(category.id);
        bad.stock_qty = -1;
        let err = catalog.create_product(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn product_lifecycle_roundtrip() {
        let catalog = catalog();
        let category = catalog
            .create_category(CategoryDraft { name: "Men's Wear".into() })
            .await
            .unwrap();
        let created = catalog.create_product(draft(category.id)).await.unwrap();

        let fetched = catalog.get_product(created.id).await.unwrap();
        assert_eq!(fetched.name, "Blue Jeans");
        assert_eq!(fetched.price, Decimal::new(5999, 2));

        let mut updated = draft(category.id);
        updated.stock_qty = 42;
        let product = catalog.update_product(created.id, updated).await.unwrap();
        assert_eq!(product.stock_qty, 42);

        catalog.delete_product(created.id).await.unwrap();
        assert!(matches!(
            catalog.get_product(created.id).await.unwrap_err(),
            CoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn category_filter_lists_only_matching_products() {
        let catalog = catalog();
        let wear = catalog
            .create_category(CategoryDraft { name: "Women's Wear".into() })
            .await
            .unwrap();
        let accessories = catalog
            .create_category(CategoryDraft { name: "Accessories".into() })
            .await
            .unwrap();

        catalog.create_product(draft(wear.id)).await.unwrap();
        let mut belt = draft(accessories.id);
        belt.name = "Leather Belt".into();
        catalog.create_product(belt).await.unwrap();

        let in_accessories = catalog.products_in_category(accessories.id).await.unwrap();
        assert_eq!(in_accessories.len(), 1);
        assert_eq!(in_accessories[0].name, "Leather Belt");
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected() {
        let catalog = catalog();
        let err = catalog
            .create_category(CategoryDraft { name: "   ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
