//! Error types for the ordering engine.

use crate::ItemId;
use thiserror::Error;

/// All possible errors from the ordering engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("item already exists: {0}")]
    DuplicateItem(ItemId),

    // Benign: nothing to do
    #[error("item {id} is already at index {index}")]
    NoOp { id: ItemId, index: usize },

    // Pending reorder errors
    #[error("a reorder is already awaiting acknowledgment")]
    ReorderInFlight,

    #[error("no reorder is awaiting acknowledgment")]
    NoPendingReorder,
}

impl Error {
    /// Whether this error only signals that there was nothing to do.
    ///
    /// Callers reacting to drag gestures usually ignore these.
    pub fn is_no_op(&self) -> bool {
        matches!(self, Error::NoOp { .. })
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::ItemNotFound("q-7".into());
        assert_eq!(err.to_string(), "item not found: q-7");

        let err = Error::NoOp {
            id: "q-1".into(),
            index: 2,
        };
        assert_eq!(err.to_string(), "item q-1 is already at index 2");

        let err = Error::ReorderInFlight;
        assert_eq!(
            err.to_string(),
            "a reorder is already awaiting acknowledgment"
        );
    }

    #[test]
    fn no_op_is_distinguishable() {
        assert!(Error::NoOp {
            id: "a".into(),
            index: 0
        }
        .is_no_op());
        assert!(!Error::ItemNotFound("a".into()).is_no_op());
        assert!(!Error::NoPendingReorder.is_no_op());
    }
}
