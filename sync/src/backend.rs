//! Backend collaborator contract.
//!
//! The backend owns the durable order and is the source of truth whenever the
//! local order has to be reconciled.

use std::time::Duration;

use async_trait::async_trait;
use quiz_order_engine::{AttachRequest, Item, ReorderRequest};
use serde_json::Value;

/// Errors talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Remote persistence for one ordered collection.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Fetch the authoritative order.
    async fn fetch_order(&self) -> Result<Vec<Item>, BackendError>;

    /// Persist a full new order. All-or-nothing.
    async fn persist_order(&self, request: &ReorderRequest) -> Result<(), BackendError>;

    /// Remove an item from the collection.
    async fn delete_item(&self, id: &str) -> Result<(), BackendError>;

    /// Attach existing items to the end of the collection.
    async fn attach_items(&self, request: &AttachRequest) -> Result<(), BackendError>;

    /// Create a new item in the collection and return it as stored, id included.
    async fn create_item(&self, payload: &Value) -> Result<Item, BackendError>;
}
