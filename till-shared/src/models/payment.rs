use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Debit,
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Debit => "DEBIT",
            PaymentMethod::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("CASH") {
            Ok(PaymentMethod::Cash)
        } else if s.eq_ignore_ascii_case("DEBIT") {
            Ok(PaymentMethod::Debit)
        } else if s.eq_ignore_ascii_case("CREDIT") {
            Ok(PaymentMethod::Credit)
        } else {
            Err(UnknownVariant::new("payment method", s))
        }
    }
}

/// Only `Paid` payments count toward an order's paid total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PENDING") {
            Ok(PaymentStatus::Pending)
        } else if s.eq_ignore_ascii_case("PAID") {
            Ok(PaymentStatus::Paid)
        } else {
            Err(UnknownVariant::new("payment status", s))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub amount: Decimal,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn new(order_id: Uuid, method: PaymentMethod, amount: Decimal, status: PaymentStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            method,
            amount,
            status,
        }
    }

    pub fn counts_as_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// Listing/search row: the payment joined with its order's date and customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub order_date: DateTime<Utc>,
    pub customer_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Credit".parse::<PaymentMethod>().unwrap(), PaymentMethod::Credit);
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn only_paid_counts_toward_the_paid_total() {
        let order_id = Uuid::new_v4();
        let pending = Payment::new(order_id, PaymentMethod::Cash, Decimal::new(2000, 2), PaymentStatus::Pending);
        let paid = Payment::new(order_id, PaymentMethod::Debit, Decimal::new(2000, 2), PaymentStatus::Paid);
        assert!(!pending.counts_as_paid());
        assert!(paid.counts_as_paid());
    }
}
