use async_trait::async_trait;
use serde::Serialize;

use till_core::CoreResult;

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

/// Administrative schema operations: tear down, build, load the sample data
/// set, and report per-table row counts. Both storage backends implement
/// this so an operator can reset either one the same way.
#[async_trait]
pub trait SchemaAdmin: Send + Sync {
    /// Removes every application table (and with it, every record).
    async fn drop_schema(&self) -> CoreResult<String>;

    /// Creates any application table that does not already exist.
    async fn create_schema(&self) -> CoreResult<String>;

    /// Loads the fixed-id sample data set; safe to run repeatedly.
    async fn seed_sample_data(&self) -> CoreResult<String>;

    /// Row counts per application table.
    async fn inspect(&self) -> CoreResult<Vec<TableCount>>;
}
