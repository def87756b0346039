//! Error types for the synchronizer.

use crate::backend::BackendError;

/// Synchronizer error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Engine error: {0}")]
    Engine(#[from] quiz_order_engine::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] BackendError),

    #[error("Synchronizer has been disposed")]
    Disposed,
}

impl Error {
    /// Whether the request was a move onto the item's own position.
    pub fn is_no_op(&self) -> bool {
        matches!(self, Error::Engine(e) if e.is_no_op())
    }

    /// Whether the referenced item does not exist locally.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Engine(quiz_order_engine::Error::ItemNotFound(_)))
    }
}

/// Result type alias for synchronizer operations.
pub type Result<T> = std::result::Result<T, Error>;
