pub mod coordinator;
pub mod ledger;
pub mod payments;

pub use coordinator::OrderCoordinator;
pub use ledger::LineItemLedger;
pub use payments::PaymentLedger;

#[cfg(test)]
mod fixtures;
