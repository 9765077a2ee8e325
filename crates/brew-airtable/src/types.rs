//! Airtable record envelopes and the coffee store field set.

use brew_core::{CoffeeStore, CoffeeStoreRecord};
use serde::{Deserialize, Serialize};

/// `{"records": [...]}`, the envelope of every list, create and update call.
#[derive(Debug, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime", default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: StoreFields,
}

/// Columns of the store table.
///
/// Airtable leaves empty cells out of responses, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreFields {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighbourhood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting: Option<i64>,
    #[serde(default)]
    pub img_url: String,
}

impl From<&CoffeeStore> for StoreFields {
    fn from(store: &CoffeeStore) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            address: store.address.clone(),
            neighbourhood: store.neighbourhood.clone(),
            voting: Some(store.voting),
            img_url: store.img_url.clone(),
        }
    }
}

impl From<Record> for CoffeeStoreRecord {
    fn from(record: Record) -> Self {
        let fields = record.fields;
        CoffeeStoreRecord::new(
            record.id,
            CoffeeStore {
                id: fields.id,
                name: fields.name,
                address: fields.address,
                neighbourhood: fields.neighbourhood,
                img_url: fields.img_url,
                // A blank voting cell counts as no votes yet.
                voting: fields.voting.unwrap_or(0),
            },
        )
    }
}
