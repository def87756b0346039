//! # Quiz Order Engine
//!
//! Client-side ordering state for reorderable lists such as the questions of
//! a quiz.
//!
//! This crate holds the ordered sequence of items and performs structurally
//! valid moves, inserts and removals while keeping ranks contiguous. It has no
//! knowledge of the network; the `quiz-order-sync` crate drives it against a
//! backend.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never talks to files, network or a UI toolkit
//! - **Contiguous ranks**: after every completed operation the ranks of a
//!   collection of size N are exactly `1..=N`
//! - **Full-list persistence**: moves produce a [`ReorderRequest`] carrying
//!   every `(itemId, rank)` pair, never a delta
//!
//! ## Core Concepts
//!
//! ### Items
//!
//! An [`Item`] is a stable id, a 1-based rank and an opaque JSON payload that
//! the ordering logic never inspects.
//!
//! ### Ordered Collection
//!
//! [`OrderedCollection`] owns the sequence. Position `i` always holds rank
//! `i + 1`.
//!
//! ### Pending Reorder
//!
//! [`OrderedCollection::begin_move`] applies a move optimistically and records
//! a [`PendingReorder`] holding the pre-move [`Snapshot`] for rollback. The
//! caller later either acknowledges it or rolls it back.
//!
//! ## Quick Start
//!
//! ```rust
//! use quiz_order_engine::{Item, OrderedCollection};
//! use serde_json::json;
//!
//! let mut collection = OrderedCollection::new();
//! collection.load(vec![
//!     Item::new("1", json!({"title": "Capital of France"})),
//!     Item::new("2", json!({"title": "Largest planet"})),
//!     Item::new("3", json!({"title": "Boiling point of water"})),
//! ]);
//!
//! // Drag question 3 to the top
//! let request = collection.begin_move("3", 0).unwrap();
//! assert_eq!(collection.ids(), vec!["3", "1", "2"]);
//! assert_eq!(request.orders[0].item_id, "3");
//! assert_eq!(request.orders[0].rank, 1);
//!
//! // The backend rejected it: restore the pre-move order
//! collection.rollback().unwrap();
//! assert_eq!(collection.ids(), vec!["1", "2", "3"]);
//! ```

pub mod collection;
pub mod error;
pub mod item;
pub mod request;
pub mod snapshot;

// Re-export main types at crate root
pub use collection::{OrderedCollection, PendingReorder};
pub use error::Error;
pub use item::Item;
pub use request::{AttachRequest, RankEntry, ReorderRequest};
pub use snapshot::Snapshot;

/// Type aliases for clarity
pub type ItemId = String;
pub type Rank = u32;
