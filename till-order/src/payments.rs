use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use till_core::repository::PaymentRepository;
use till_core::{CoreError, CoreResult};
use till_shared::models::{Payment, PaymentDetail, PaymentMethod, PaymentStatus};

/// Owns the payments recorded against orders and the paid-sum derived from
/// them. Only `Paid` payments count toward an order's paid total.
pub struct PaymentLedger {
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentLedger {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    /// Records a payment with a fresh identifier. Status defaults to
    /// `Pending` when the caller does not supply one. Whether the referenced
    /// order exists is left to the store's referential check.
    pub async fn add_payment(
        &self,
        order_id: Uuid,
        method: PaymentMethod,
        amount: Decimal,
        status: Option<PaymentStatus>,
    ) -> CoreResult<Payment> {
        Self::validate_amount(amount)?;
        let payment = Payment::new(order_id, method, amount, status.unwrap_or(PaymentStatus::Pending));
        self.payments.create_payment(&payment).await?;
        Ok(payment)
    }

    /// Overwrites every mutable field of the payment. Returns the updated
    /// payment together with the order it referenced before the update, so
    /// the caller can re-derive status on both sides of an order move.
    pub async fn update_payment(
        &self,
        payment_id: Uuid,
        order_id: Uuid,
        method: PaymentMethod,
        amount: Decimal,
        status: PaymentStatus,
    ) -> CoreResult<(Payment, Uuid)> {
        Self::validate_amount(amount)?;
        let existing = self.payment(payment_id).await?;
        let updated = Payment {
            id: payment_id,
            order_id,
            method,
            amount,
            status,
        };
        if !self.payments.update_payment(&updated).await? {
            return Err(CoreError::NotFound(format!("payment {payment_id}")));
        }
        Ok((updated, existing.order_id))
    }

    /// Removes the payment and returns it, so the caller still knows which
    /// order needs its status re-derived.
    pub async fn remove_payment(&self, payment_id: Uuid) -> CoreResult<Payment> {
        let existing = self.payment(payment_id).await?;
        self.payments.delete_payment(payment_id).await?;
        Ok(existing)
    }

    pub async fn payment(&self, payment_id: Uuid) -> CoreResult<Payment> {
        self.payments
            .get_payment(payment_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("payment {payment_id}")))
    }

    pub async fn payments_for_order(&self, order_id: Uuid) -> CoreResult<Vec<Payment>> {
        self.payments.list_payments_for_order(order_id).await
    }

    pub async fn list_details(&self) -> CoreResult<Vec<PaymentDetail>> {
        self.payments.list_payment_details().await
    }

    pub async fn search_details(&self, term: &str) -> CoreResult<Vec<PaymentDetail>> {
        self.payments.search_payment_details(term).await
    }

    /// Sum of `Paid` payments against the order; zero when there are none.
    pub async fn paid_total_for_order(&self, order_id: Uuid) -> CoreResult<Decimal> {
        self.payments.paid_total(order_id).await
    }

    pub(crate) async fn clear_order(&self, order_id: Uuid) -> CoreResult<u64> {
        self.payments.delete_payments_for_order(order_id).await
    }

    fn validate_amount(amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_add_payment_defaults_to_pending() {
        let rig = fixtures::rig().await;
        let payment = rig
            .payments
            .add_payment(rig.order_id, PaymentMethod::Cash, Decimal::new(2000, 2), None)
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(
            rig.payments.paid_total_for_order(rig.order_id).await.unwrap(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_add_payment_rejects_non_positive_amount() {
        let rig = fixtures::rig().await;
        for amount in [Decimal::ZERO, Decimal::new(-500, 2)] {
            let err = rig
                .payments
                .add_payment(rig.order_id, PaymentMethod::Credit, amount, None)
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_paid_total_counts_only_paid_payments() {
        let rig = fixtures::rig().await;
        rig.payments
            .add_payment(rig.order_id, PaymentMethod::Cash, Decimal::new(1500, 2), Some(PaymentStatus::Paid))
            .await
            .unwrap();
        rig.payments
            .add_payment(rig.order_id, PaymentMethod::Debit, Decimal::new(2500, 2), Some(PaymentStatus::Paid))
            .await
            .unwrap();
        rig.payments
            .add_payment(rig.order_id, PaymentMethod::Credit, Decimal::new(9900, 2), Some(PaymentStatus::Pending))
            .await
            .unwrap();

        assert_eq!(
            rig.payments.paid_total_for_order(rig.order_id).await.unwrap(),
            Decimal::new(4000, 2)
        );
    }

    #[tokio::test]
    async fn test_update_unknown_payment_is_not_found() {
        let rig = fixtures::rig().await;
        let err = rig
            .payments
            .update_payment(
                Uuid::new_v4(),
                rig.order_id,
                PaymentMethod::Cash,
                Decimal::new(100, 2),
                PaymentStatus::Paid,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_unknown_payment_is_not_found() {
        let rig = fixtures::rig().await;
        let err = rig.payments.remove_payment(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_payment_reports_the_previous_order() {
        let rig = fixtures::rig().await;
        let payment = rig
            .payments
            .add_payment(rig.order_id, PaymentMethod::Cash, Decimal::new(2000, 2), None)
            .await
            .unwrap();

        let (updated, previous_order) = rig
            .payments
            .update_payment(
                payment.id,
                rig.order_id,
                PaymentMethod::Debit,
                Decimal::new(2000, 2),
                PaymentStatus::Paid,
            )
            .await
            .unwrap();
        assert_eq!(previous_order, rig.order_id);
        assert_eq!(updated.method, PaymentMethod::Debit);
        assert_eq!(updated.status, PaymentStatus::Paid);
    }
}
