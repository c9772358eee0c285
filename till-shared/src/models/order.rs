use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PENDING") {
            Ok(OrderStatus::Pending)
        } else if s.eq_ignore_ascii_case("COMPLETED") {
            Ok(OrderStatus::Completed)
        } else {
            Err(UnknownVariant::new("order status", s))
        }
    }
}

/// A sales order. `total_amount` and `status` are derived: the total is the
/// sum of the order's line items and the status follows from the payments
/// recorded against the total. Both start at their empty-order values and are
/// only ever rewritten by recomputation, never taken from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
}

impl Order {
    pub fn new(customer_id: Uuid, employee_id: Uuid, order_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_date: order_date.unwrap_or_else(Utc::now),
            total_amount: Decimal::ZERO,
            status: OrderStatus::Pending,
            customer_id,
            employee_id,
        }
    }
}

/// Listing/search row: the order joined with the customer and employee names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub customer_name: String,
    pub employee_name: String,
}

/// One product line on an order, keyed by (order, product). The unit price is
/// snapshotted when the line is added and does not track the catalog price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(order_id: Uuid, product_id: Uuid, quantity: i32, unit_price: Decimal) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Display row for a line item: joined with the product and its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDetail {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_brand: String,
    pub category_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}
