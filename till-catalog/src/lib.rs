pub mod catalog;

pub use catalog::{CategoryDraft, ProductCatalog, ProductDraft};
