//! Immutable point-in-time copies of a collection.
//!
//! Snapshots capture the pre-move order for rollback and give the
//! presentation layer a read-only view it can hold on to while the store keeps
//! changing. Cloning a snapshot is cheap: the items are shared.

use crate::Item;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A read-only copy of a collection's ordered items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct Snapshot {
    items: Arc<[Item]>,
}

impl Snapshot {
    /// Create a snapshot from items in order.
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Item at a position.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id.as_str()).collect()
    }

    /// Copy the items out, e.g. to feed [`crate::OrderedCollection::load`].
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.to_vec()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Item>> for Snapshot {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl From<Snapshot> for Vec<Item> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.to_vec()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
