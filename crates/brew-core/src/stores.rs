//! Coffee store shapes shared by the fetcher, the repositories and the API.

use serde::{Deserialize, Serialize};

/// Central London. Used when a caller has no location to offer.
pub const DEFAULT_LAT_LONG: &str = "51.5131768,-0.1399411";

/// A coffee shop as returned by the places provider.
///
/// `img_url` is only illustrative: photos are assigned by position, not by
/// matching the store, and may be empty when the photo list ran short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeStore {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighbourhood: String,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub voting: i64,
}

/// A coffee store persisted in the store table.
///
/// `record_id` is the table's own key; `store.id` is the provider id that
/// lookups filter on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeStoreRecord {
    pub record_id: String,
    #[serde(flatten)]
    pub store: CoffeeStore,
}

impl CoffeeStoreRecord {
    #[must_use]
    pub fn new(record_id: impl Into<String>, store: CoffeeStore) -> Self {
        Self {
            record_id: record_id.into(),
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coffee_store_serializes_camel_case() {
        let store = CoffeeStore {
            id: "abc".to_string(),
            name: "Joe's".to_string(),
            img_url: "https://images.example.com/1.jpg".to_string(),
            ..CoffeeStore::default()
        };
        let json = serde_json::to_value(&store).expect("serialize");
        assert_eq!(json["imgUrl"], "https://images.example.com/1.jpg");
        assert_eq!(json["voting"], 0);
        assert_eq!(json["neighbourhood"], "");
    }

    #[test]
    fn coffee_store_defaults_missing_optional_fields() {
        let store: CoffeeStore =
            serde_json::from_str(r#"{"id":"abc","name":"Joe's"}"#).expect("deserialize");
        assert_eq!(store.address, "");
        assert_eq!(store.voting, 0);
    }

    #[test]
    fn record_flattens_store_fields_next_to_record_id() {
        let record = CoffeeStoreRecord::new(
            "rec123",
            CoffeeStore {
                id: "abc".to_string(),
                name: "Joe's".to_string(),
                voting: 3,
                ..CoffeeStore::default()
            },
        );
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["recordId"], "rec123");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["voting"], 3);
    }
}
