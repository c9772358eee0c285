use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A sellable product. `price` is the current list price; line items snapshot
/// their own unit price at add time and are not affected by later changes here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub size: String,
    pub colour: String,
    pub brand: String,
    pub price: Decimal,
    pub stock_qty: i32,
    pub category_id: Uuid,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        colour: impl Into<String>,
        brand: impl Into<String>,
        price: Decimal,
        stock_qty: i32,
        category_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size: size.into(),
            colour: colour.into(),
            brand: brand.into(),
            price,
            stock_qty,
            category_id,
        }
    }
}
