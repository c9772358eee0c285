mod catalog_repo;
mod order_repo;
mod party_repo;
mod payment_repo;
mod schema_admin;

pub use catalog_repo::PgCatalogRepository;
pub use order_repo::PgOrderRepository;
pub use party_repo::PgPartyRepository;
pub use payment_repo::PgPaymentRepository;
pub use schema_admin::PgSchemaAdmin;

use till_core::CoreError;

pub(crate) fn db_err(err: sqlx::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}
