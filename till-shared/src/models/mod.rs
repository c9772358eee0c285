pub mod catalog;
pub mod order;
pub mod party;
pub mod payment;

pub use catalog::{Category, Product};
pub use order::{LineItem, LineItemDetail, Order, OrderStatus, OrderSummary};
pub use party::{Customer, Employee};
pub use payment::{Payment, PaymentDetail, PaymentMethod, PaymentStatus};

/// Returned when a stored or submitted enum value is outside the known set.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
