//! OrderedCollection - the in-memory ordered sequence.
//!
//! The collection holds items in order and the at-most-one reorder that is
//! waiting for the backend. Every completed operation leaves ranks contiguous:
//! the item at position `i` has rank `i + 1`.

use crate::{error::Result, Error, Item, ItemId, Rank, ReorderRequest, Snapshot};
use serde::{Deserialize, Serialize};

/// A reorder applied locally but not yet confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReorder {
    /// Order before the move, restored on rollback
    pub before: Snapshot,
    /// Order after the move, as shown optimistically
    pub after: Snapshot,
    /// The full-list request persisting `after`
    pub request: ReorderRequest,
}

/// An ordered sequence of items with contiguous 1-based ranks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedCollection {
    /// Items in order
    items: Vec<Item>,
    /// Reorder awaiting acknowledgment
    pending: Option<PendingReorder>,
}

impl OrderedCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            pending: None,
        }
    }

    /// Create a collection from items in order.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut collection = Self::new();
        collection.load(items);
        collection
    }

    /// Replace the entire collection.
    ///
    /// Input order is authoritative: any rank carried by the input is
    /// overwritten with `position + 1`. Any pending reorder is dropped.
    pub fn load(&mut self, items: Vec<Item>) {
        self.items = items;
        self.pending = None;
        self.rerank_from(0);
    }

    /// Move an item to `target_index`.
    ///
    /// The target is clamped to `[0, len - 1]`. Returns the new order.
    ///
    /// Fails with [`Error::ItemNotFound`] if the id is absent and with
    /// [`Error::NoOp`] if the (clamped) target is the item's current index;
    /// neither mutates the collection.
    pub fn move_item(&mut self, id: &str, target_index: usize) -> Result<Snapshot> {
        let from = self
            .index_of(id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;

        let to = target_index.min(self.items.len() - 1);
        if to == from {
            return Err(Error::NoOp {
                id: id.to_string(),
                index: from,
            });
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.rerank_from(from.min(to));

        debug_assert!(self.is_contiguous());
        Ok(self.snapshot())
    }

    /// Remove an item, shifting every later item up by one rank.
    pub fn remove_item(&mut self, id: &str) -> Result<Item> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;

        let removed = self.items.remove(index);
        self.rerank_from(index);

        debug_assert!(self.is_contiguous());
        Ok(removed)
    }

    /// Insert an item at `index`, clamped to `[0, len]`.
    pub fn insert_item(&mut self, item: Item, index: usize) -> Result<()> {
        if self.index_of(&item.id).is_some() {
            return Err(Error::DuplicateItem(item.id));
        }

        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.rerank_from(index);

        debug_assert!(self.is_contiguous());
        Ok(())
    }

    /// Append an item at the end.
    pub fn push_item(&mut self, item: Item) -> Result<()> {
        let len = self.items.len();
        self.insert_item(item, len)
    }

    /// An immutable copy of the current order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.items.clone())
    }

    /// The full-list request that would persist the current order.
    pub fn reorder_request(&self) -> ReorderRequest {
        ReorderRequest::from_items(&self.items)
    }

    /// Position of an item.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Get an item by ID.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Check if an item exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }

    /// Whether ranks are exactly `1..=len` in position order.
    pub fn is_contiguous(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(index, item)| item.rank as usize == index + 1)
    }

    /// Apply a move optimistically and record it as pending.
    ///
    /// Returns the request that persists the new order. A failed move leaves
    /// no pending state behind.
    pub fn begin_move(&mut self, id: &str, target_index: usize) -> Result<ReorderRequest> {
        if self.pending.is_some() {
            return Err(Error::ReorderInFlight);
        }

        let before = self.snapshot();
        let after = self.move_item(id, target_index)?;
        let request = ReorderRequest::from_items(&after);

        self.pending = Some(PendingReorder {
            before,
            after,
            request: request.clone(),
        });

        Ok(request)
    }

    /// The reorder awaiting acknowledgment, if any.
    pub fn pending(&self) -> Option<&PendingReorder> {
        self.pending.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The backend confirmed the pending reorder; forget it.
    pub fn acknowledge(&mut self) -> Result<PendingReorder> {
        self.pending.take().ok_or(Error::NoPendingReorder)
    }

    /// The backend rejected the pending reorder; restore the pre-move order.
    pub fn rollback(&mut self) -> Result<PendingReorder> {
        let pending = self.pending.take().ok_or(Error::NoPendingReorder)?;
        self.load(pending.before.to_vec());
        Ok(pending)
    }

    /// Reassign ranks for every position from `start` on.
    fn rerank_from(&mut self, start: usize) {
        for (index, item) in self.items.iter_mut().enumerate().skip(start) {
            item.rank = index as Rank + 1;
        }
    }
}

impl From<Vec<Item>> for OrderedCollection {
    fn from(items: Vec<Item>) -> Self {
        Self::from_items(items)
    }
}

impl From<&OrderedCollection> for Vec<ItemId> {
    fn from(collection: &OrderedCollection) -> Self {
        collection.iter().map(|item| item.id.clone()).collect()
    }
}
