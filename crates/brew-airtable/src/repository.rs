use async_trait::async_trait;
use brew_core::{
    AirtableSettings, CoffeeStore, CoffeeStoreRecord, RepositoryError, StoreRepository,
};

use crate::client::{id_equals_formula, AirtableClient};
use crate::error::AirtableError;
use crate::types::StoreFields;

/// [`StoreRepository`] backed by an Airtable table.
pub struct AirtableStoreRepository {
    client: AirtableClient,
}

impl AirtableStoreRepository {
    #[must_use]
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_settings(
        settings: &AirtableSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AirtableError> {
        let client = AirtableClient::new(
            &settings.api_key,
            &settings.base_id,
            &settings.table,
            timeout_secs,
            user_agent,
        )?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl StoreRepository for AirtableStoreRepository {
    async fn find_by_store_id(&self, id: &str) -> Result<Vec<CoffeeStoreRecord>, RepositoryError> {
        let records = self.client.select(&id_equals_formula(id)).await?;
        Ok(records.into_iter().map(CoffeeStoreRecord::from).collect())
    }

    async fn insert(&self, store: &CoffeeStore) -> Result<CoffeeStoreRecord, RepositoryError> {
        let record = self.client.create(&StoreFields::from(store)).await?;
        Ok(record.into())
    }

    async fn set_voting(
        &self,
        record_id: &str,
        voting: i64,
    ) -> Result<CoffeeStoreRecord, RepositoryError> {
        let record = self
            .client
            .update_voting(record_id, voting)
            .await
            .map_err(|err| match err {
                AirtableError::Api { status: 404, .. } => {
                    RepositoryError::MissingRecord(record_id.to_string())
                }
                other => other.into(),
            })?;
        Ok(record.into())
    }
}
