pub mod repository;
pub mod search;

/// Failure taxonomy shared by every service and store in the workspace.
///
/// `NotFound` and `InvalidInput` are domain outcomes a caller can act on;
/// `Storage` means the underlying read or write failed and carries no
/// promise about whether partial effects were applied.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
