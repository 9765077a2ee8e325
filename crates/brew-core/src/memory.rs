//! Process-local [`StoreRepository`] used in tests and for development runs
//! without table credentials. Contents are lost on exit.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repository::{RepositoryError, StoreRepository};
use crate::stores::{CoffeeStore, CoffeeStoreRecord};

#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<CoffeeStoreRecord>,
    next_id: u64,
}

impl InMemoryStoreRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn find_by_store_id(&self, id: &str) -> Result<Vec<CoffeeStoreRecord>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|record| record.store.id == id)
            .cloned()
            .collect())
    }

    async fn insert(&self, store: &CoffeeStore) -> Result<CoffeeStoreRecord, RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let record = CoffeeStoreRecord::new(format!("mem{:08}", inner.next_id), store.clone());
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn set_voting(
        &self,
        record_id: &str,
        voting: i64,
    ) -> Result<CoffeeStoreRecord, RepositoryError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .iter_mut()
            .find(|record| record.record_id == record_id)
            .ok_or_else(|| RepositoryError::MissingRecord(record_id.to_string()))?;
        record.store.voting = voting;
        Ok(record.clone())
    }
}
