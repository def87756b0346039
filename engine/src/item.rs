//! Item types held by an ordered collection.

use crate::{ItemId, Rank};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An entry of an ordered collection.
///
/// Only `id` and `rank` matter to ordering. Every other field the backend
/// sends (title, type, difficulty, points, ...) is kept in `payload` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable unique identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ItemId,
    /// 1-based position in the authoritative order
    #[serde(default, alias = "order")]
    pub rank: Rank,
    /// Opaque descriptive fields
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Item {
    /// Create an unranked item. The rank is assigned when it joins a collection.
    ///
    /// A non-object payload is stored under the `value` key.
    pub fn new(id: impl Into<ItemId>, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        Self {
            id: id.into(),
            rank: 0,
            payload,
        }
    }

    /// Set the rank, builder style.
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// The `title` payload field, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.payload.get("title").and_then(Value::as_str)
    }
}

/// Accept ids sent either as JSON strings or as numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_item_is_unranked() {
        let item = Item::new("q-1", json!({"title": "Capital of France"}));
        assert_eq!(item.id, "q-1");
        assert_eq!(item.rank, 0);
        assert_eq!(item.title(), Some("Capital of France"));
    }

    #[test]
    fn non_object_payload() {
        let item = Item::new("q-1", json!("plain"));
        assert_eq!(item.payload["value"], "plain");

        let item = Item::new("q-2", Value::Null);
        assert!(item.payload.is_empty());
    }

    #[test]
    fn deserialize_backend_question() {
        let json = r#"{
            "id": "clx1",
            "title": "Largest planet",
            "type": "MULTIPLE_CHOICE",
            "options": ["Mars", "Jupiter"],
            "order": 4,
            "points": 1.0
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "clx1");
        assert_eq!(item.rank, 4);
        assert_eq!(item.payload["type"], "MULTIPLE_CHOICE");
        assert!(!item.payload.contains_key("order"));
        assert!(!item.payload.contains_key("id"));
    }

    #[test]
    fn deserialize_numeric_id_and_missing_rank() {
        let item: Item = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.rank, 0);
    }

    #[test]
    fn serialize_flattens_payload() {
        let item = Item::new("q-1", json!({"title": "T"})).with_rank(3);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"id": "q-1", "rank": 3, "title": "T"}));
    }
}
