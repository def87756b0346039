//! # Quiz Order Sync
//!
//! Keeps a locally displayed ordered list (the questions of a quiz) in step
//! with the backend that persists it.
//!
//! A move is shown immediately, then the full new order is sent to the
//! backend. If the backend rejects it, the local order is rolled back to the
//! pre-move state and the authoritative order is re-fetched. Subscribers are
//! told about every change through [`SyncEvent`]s so they can re-render and
//! notify the user.
//!
//! ```no_run
//! use quiz_order_sync::{Config, HttpBackend, Synchronizer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("http://localhost:3000")
//!     .with_collection_path("/api/admin/quiz/42/questions");
//! let backend = HttpBackend::new(&config)?;
//! let sync = Synchronizer::connect(backend, config.request_timeout).await?;
//!
//! let outcome = sync.move_item("q-3", 0).await?;
//! if !outcome.is_persisted() {
//!     println!("order was restored: {:?}", outcome.order().ids());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod synchronizer;

pub use backend::{BackendError, OrderBackend};
pub use command::{Cli, Command};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use events::SyncEvent;
pub use http::HttpBackend;
pub use synchronizer::{MoveOutcome, Synchronizer};
