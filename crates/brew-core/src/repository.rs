use async_trait::async_trait;
use thiserror::Error;

use crate::stores::{CoffeeStore, CoffeeStoreRecord};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed or answered with something unusable.
    #[error("store backend error: {0}")]
    Backend(String),
    #[error("record {0} does not exist")]
    MissingRecord(String),
}

/// Persistence for upvotable coffee stores.
///
/// Implementations only move rows; the create-if-absent and vote rules live in
/// [`crate::service`].
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Returns every row whose provider `id` equals `id`.
    async fn find_by_store_id(&self, id: &str) -> Result<Vec<CoffeeStoreRecord>, RepositoryError>;

    /// Inserts a new row holding `store` as given.
    async fn insert(&self, store: &CoffeeStore) -> Result<CoffeeStoreRecord, RepositoryError>;

    /// Overwrites the vote count of the row keyed by `record_id`.
    async fn set_voting(
        &self,
        record_id: &str,
        voting: i64,
    ) -> Result<CoffeeStoreRecord, RepositoryError>;
}
