use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use till_core::repository::{LineItemRepository, OrderRepository, ProductRepository};
use till_core::{CoreError, CoreResult};
use till_shared::models::{LineItem, LineItemDetail};

/// Owns the (order, product) quantity/price rows of an order and the sum
/// derived from them. Writing here never touches the order's stored total;
/// the coordinator re-derives that immediately after each mutation.
pub struct LineItemLedger {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    items: Arc<dyn LineItemRepository>,
}

impl LineItemLedger {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        items: Arc<dyn LineItemRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            items,
        }
    }

    /// Insert the line, or replace the quantity and unit price of an existing
    /// line for the same product. The unit price is stored as given; later
    /// catalog price changes do not reach back into recorded lines.
    pub async fn add_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> CoreResult<LineItem> {
        self.orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("order {order_id}")))?;
        self.products
            .get_product(product_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("product {product_id}")))?;
        if quantity <= 0 {
            return Err(CoreError::InvalidInput(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if unit_price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "unit price must be positive, got {unit_price}"
            )));
        }

        let item = LineItem::new(order_id, product_id, quantity, unit_price);
        self.items.upsert_line_item(&item).await?;
        Ok(item)
    }

    /// Removing a line that is not there is a no-op, not an error.
    pub async fn remove_item(&self, order_id: Uuid, product_id: Uuid) -> CoreResult<()> {
        self.items.delete_line_item(order_id, product_id).await?;
        Ok(())
    }

    /// Display rows for the order, ordered by product name, each with its
    /// computed line total.
    pub async fn items_for_order(&self, order_id: Uuid) -> CoreResult<Vec<LineItemDetail>> {
        self.items.line_item_details(order_id).await
    }

    /// `Σ(quantity × unit_price)` over the order's lines; zero when there are
    /// none.
    pub async fn total_for_order(&self, order_id: Uuid) -> CoreResult<Decimal> {
        self.items.line_items_total(order_id).await
    }

    pub(crate) async fn clear_order(&self, order_id: Uuid) -> CoreResult<u64> {
        self.items.delete_line_items_for_order(order_id).await
    }
}
