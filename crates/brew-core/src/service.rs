//! Create-if-absent and upvote rules on top of a [`StoreRepository`].
//!
//! Lookup and write are separate round trips. Two increments racing on the
//! same id can both read `v` and both write `v + 1`; low-contention use makes
//! this acceptable, and a backend with an atomic counter would be needed to
//! close it.

use thiserror::Error;

use crate::repository::{RepositoryError, StoreRepository};
use crate::stores::{CoffeeStore, CoffeeStoreRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The id of the coffee store is missing from the request")]
    MissingId,
    #[error("The coffee store name is missing from the request")]
    MissingName,
    #[error("The coffee store could not be found for id: {0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Returns the persisted record for `store.id`, creating it on first visit.
///
/// An existing record is returned as-is; its fields are never refreshed from
/// `store`. New records start with `voting = 0` whatever `store.voting` says.
///
/// # Errors
///
/// [`StoreError::MissingId`] for a blank id, [`StoreError::MissingName`] when
/// a record would be created without a name, [`StoreError::Repository`] when
/// the backend fails.
pub async fn ensure_store(
    repo: &dyn StoreRepository,
    store: &CoffeeStore,
) -> Result<CoffeeStoreRecord, StoreError> {
    if store.id.trim().is_empty() {
        return Err(StoreError::MissingId);
    }

    if let Some(existing) = repo.find_by_store_id(&store.id).await?.into_iter().next() {
        tracing::debug!(
            id = %store.id,
            record_id = %existing.record_id,
            "coffee store already persisted"
        );
        return Ok(existing);
    }

    if store.name.trim().is_empty() {
        return Err(StoreError::MissingName);
    }

    let new_store = CoffeeStore {
        voting: 0,
        ..store.clone()
    };
    let created = repo.insert(&new_store).await?;
    tracing::info!(id = %store.id, record_id = %created.record_id, "coffee store persisted");
    Ok(created)
}

/// Adds one vote to the store persisted under `id`.
///
/// # Errors
///
/// [`StoreError::NotFound`] when no record exists (nothing is written),
/// [`StoreError::MissingId`] for a blank id, [`StoreError::Repository`] when
/// the backend fails.
pub async fn increment_vote(
    repo: &dyn StoreRepository,
    id: &str,
) -> Result<CoffeeStoreRecord, StoreError> {
    if id.trim().is_empty() {
        return Err(StoreError::MissingId);
    }

    let record = repo
        .find_by_store_id(id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    let voting = record.store.voting.saturating_add(1);
    let updated = repo.set_voting(&record.record_id, voting).await?;
    tracing::info!(id, voting, "coffee store upvoted");
    Ok(updated)
}

/// Returns every record persisted under `id`.
///
/// # Errors
///
/// [`StoreError::NotFound`] when there is none, [`StoreError::MissingId`] for
/// a blank id, [`StoreError::Repository`] when the backend fails.
pub async fn find_store(
    repo: &dyn StoreRepository,
    id: &str,
) -> Result<Vec<CoffeeStoreRecord>, StoreError> {
    if id.trim().is_empty() {
        return Err(StoreError::MissingId);
    }

    let records = repo.find_by_store_id(id).await?;
    if records.is_empty() {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(records)
}
