pub mod app_config;
pub mod bootstrap;
pub mod database;
pub mod memory;
pub mod postgres;
pub mod seed;

pub use app_config::Config;
pub use bootstrap::{SchemaAdmin, TableCount};
pub use database::DbClient;
pub use memory::MemoryStore;
pub use postgres::{
    PgCatalogRepository, PgOrderRepository, PgPartyRepository, PgPaymentRepository, PgSchemaAdmin,
};
