//! Change notifications for the presentation layer.
//!
//! Every event is JSON-serializable and uses snake_case for field names.

use std::fmt;

use quiz_order_engine::{ItemId, Snapshot};
use serde::Serialize;

/// Emitted whenever the local order changes or a reconciliation completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    /// The authoritative order was loaded from the backend.
    Refreshed { order: Snapshot },

    /// A move was applied locally, before the backend confirmed it.
    Reordered { order: Snapshot },

    /// The backend confirmed the pending move.
    Persisted { order: Snapshot },

    /// The backend rejected the pending move; the order was rolled back.
    ReorderFailed {
        error: String,
        /// Whether the authoritative order was re-fetched after rollback
        refetched: bool,
        order: Snapshot,
    },

    /// An item was removed after the backend confirmed the delete.
    Removed { id: ItemId, order: Snapshot },

    /// The backend refused to delete an item; nothing changed locally.
    RemoveFailed { id: ItemId, error: String },

    /// A new item was created at the backend and appended locally.
    Created { id: ItemId, order: Snapshot },

    /// The backend refused to create an item; nothing changed locally.
    CreateFailed { error: String },
}

impl SyncEvent {
    /// Whether the user should see this as an error notification.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SyncEvent::ReorderFailed { .. }
                | SyncEvent::RemoveFailed { .. }
                | SyncEvent::CreateFailed { .. }
        )
    }

    /// The order after this event, when it changed one.
    pub fn order(&self) -> Option<&Snapshot> {
        match self {
            SyncEvent::Refreshed { order }
            | SyncEvent::Reordered { order }
            | SyncEvent::Persisted { order }
            | SyncEvent::ReorderFailed { order, .. }
            | SyncEvent::Removed { order, .. }
            | SyncEvent::Created { order, .. } => Some(order),
            SyncEvent::RemoveFailed { .. } | SyncEvent::CreateFailed { .. } => None,
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::Refreshed { order } => write!(f, "Loaded {} questions", order.len()),
            SyncEvent::Reordered { .. } => write!(f, "Saving question order"),
            SyncEvent::Persisted { .. } => write!(f, "Question order saved"),
            SyncEvent::ReorderFailed { .. } => write!(f, "Failed to update question order"),
            SyncEvent::Removed { .. } => write!(f, "Question removed from quiz"),
            SyncEvent::RemoveFailed { .. } => write!(f, "Failed to remove question"),
            SyncEvent::Created { .. } => write!(f, "Question created and added to quiz"),
            SyncEvent::CreateFailed { .. } => write!(f, "Failed to create question"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_order_engine::Item;
    use serde_json::json;

    #[test]
    fn failure_classification() {
        let order = Snapshot::empty();
        assert!(!SyncEvent::Persisted {
            order: order.clone()
        }
        .is_failure());
        assert!(SyncEvent::ReorderFailed {
            error: "boom".into(),
            refetched: true,
            order,
        }
        .is_failure());
        assert!(SyncEvent::RemoveFailed {
            id: "q-1".into(),
            error: "boom".into()
        }
        .is_failure());
    }

    #[test]
    fn notification_text() {
        let event = SyncEvent::Refreshed {
            order: Snapshot::new(vec![Item::new("a", json!({})), Item::new("b", json!({}))]),
        };
        assert_eq!(event.to_string(), "Loaded 2 questions");
        assert_eq!(event.order().unwrap().len(), 2);

        let event = SyncEvent::RemoveFailed {
            id: "q-1".into(),
            error: "status 500".into(),
        };
        assert_eq!(event.to_string(), "Failed to remove question");
        assert!(event.order().is_none());

        let event = SyncEvent::CreateFailed {
            error: "status 422".into(),
        };
        assert_eq!(event.to_string(), "Failed to create question");
        assert!(event.is_failure());
        assert!(event.order().is_none());
    }

    #[test]
    fn created_event() {
        let event = SyncEvent::Created {
            id: "q-9".into(),
            order: Snapshot::new(vec![Item::new("q-9", json!({})).with_rank(1)]),
        };

        assert_eq!(event.to_string(), "Question created and added to quiz");
        assert!(!event.is_failure());
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "created",
                "id": "q-9",
                "order": [{"id": "q-9", "rank": 1}]
            })
        );
    }

    #[test]
    fn event_serialization() {
        let event = SyncEvent::ReorderFailed {
            error: "timeout".into(),
            refetched: false,
            order: Snapshot::new(vec![Item::new("a", json!({})).with_rank(1)]),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "reorder_failed",
                "error": "timeout",
                "refetched": false,
                "order": [{"id": "a", "rank": 1}]
            })
        );
    }
}
