//! Wire bodies sent to the backend.

use crate::{Item, ItemId, Rank};
use serde::{Deserialize, Serialize};

/// One `(itemId, rank)` pair of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    pub item_id: ItemId,
    pub rank: Rank,
}

/// Full-list replacement of the persisted order.
///
/// Every item is listed, so sending the same request twice is harmless and
/// any earlier drift at the backend is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub orders: Vec<RankEntry>,
}

impl ReorderRequest {
    /// Build a request from items in their intended order.
    ///
    /// Ranks are derived from position, not read from the items.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let orders = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| RankEntry {
                item_id: item.id.clone(),
                rank: index as Rank + 1,
            })
            .collect();

        Self { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Ids in request order.
    pub fn item_ids(&self) -> Vec<&str> {
        self.orders.iter().map(|e| e.item_id.as_str()).collect()
    }
}

/// Attach existing items (e.g. from a question bank) to the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRequest {
    pub item_ids: Vec<ItemId>,
}

impl AttachRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        Self {
            item_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ranks_follow_position() {
        // Stale ranks on the items are ignored
        let items = vec![
            Item::new("3", json!({})).with_rank(3),
            Item::new("1", json!({})).with_rank(1),
            Item::new("2", json!({})).with_rank(2),
        ];

        let request = ReorderRequest::from_items(&items);
        assert_eq!(request.item_ids(), vec!["3", "1", "2"]);
        assert_eq!(
            request.orders.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn reorder_wire_format() {
        let request = ReorderRequest {
            orders: vec![
                RankEntry {
                    item_id: "3".into(),
                    rank: 1,
                },
                RankEntry {
                    item_id: "1".into(),
                    rank: 2,
                },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"orders": [{"itemId": "3", "rank": 1}, {"itemId": "1", "rank": 2}]})
        );
    }

    #[test]
    fn attach_wire_format() {
        let request = AttachRequest::new(["q-9", "q-10"]);
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"itemIds":["q-9","q-10"]}"#);
    }

    #[test]
    fn empty_request() {
        let request = ReorderRequest::from_items(&Vec::<Item>::new());
        assert!(request.is_empty());
        assert_eq!(request.len(), 0);
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"orders":[]}"#);
    }
}
