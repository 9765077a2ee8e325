//! One terminal session: location lookup, fetched store list, persistence.
//!
//! The [`StoreHandle`] plays the part of the page-level state shared by the
//! list and detail views. Store lists land in it through `SET_COFFEE_STORES`
//! and the tracker publishes `SET_LAT_LONG` on a successful lookup.

use async_trait::async_trait;
use brew_core::{
    CoffeeStore, Coordinates, Geolocator, LocationTracker, PositionError, StoreAction, StoreHandle,
};

use crate::api::{ApiClientError, BrewApiClient};

/// Geolocator fed by a `"lat,long"` string from a flag or `BREW_LAT_LONG`.
///
/// The string is parsed on every lookup; a malformed value surfaces as an
/// unavailable position.
pub struct ConfiguredGeolocator {
    lat_long: String,
}

impl ConfiguredGeolocator {
    #[must_use]
    pub fn new(lat_long: impl Into<String>) -> Self {
        Self {
            lat_long: lat_long.into(),
        }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        self.lat_long.parse()
    }
}

/// Builds a tracker over `state`; `None` means this terminal has no location.
#[must_use]
pub fn tracker_for(lat_long: Option<&str>, state: StoreHandle) -> LocationTracker {
    let geolocator = lat_long
        .filter(|s| !s.trim().is_empty())
        .map(|s| Box::new(ConfiguredGeolocator::new(s)) as Box<dyn Geolocator>);
    LocationTracker::new(geolocator, state)
}

/// What the nearby view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyView {
    pub heading: &'static str,
    pub stores: Vec<CoffeeStore>,
    /// Set when the lookup failed and the default location was used instead.
    pub location_error: Option<String>,
}

pub struct Session {
    api: BrewApiClient,
    state: StoreHandle,
}

impl Session {
    #[must_use]
    pub fn new(api: BrewApiClient, state: StoreHandle) -> Self {
        Self { api, state }
    }

    #[must_use]
    pub fn state(&self) -> &StoreHandle {
        &self.state
    }

    /// Fetches stores around `lat_long` (server default when `None`) and
    /// publishes them as the current list.
    ///
    /// # Errors
    ///
    /// Any [`ApiClientError`] from the server call; state is left untouched.
    pub async fn refresh_stores(
        &self,
        lat_long: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<CoffeeStore>, ApiClientError> {
        let stores = self.api.stores_by_location(lat_long, limit).await?;
        self.state.dispatch(StoreAction::SetCoffeeStores(stores.clone()));
        Ok(stores)
    }

    /// Resolves the location, then lists stores there. A failed lookup is
    /// reported alongside the default-location list.
    ///
    /// # Errors
    ///
    /// Any [`ApiClientError`] from the server call.
    pub async fn view_nearby(
        &self,
        tracker: &mut LocationTracker,
        limit: Option<u32>,
    ) -> Result<NearbyView, ApiClientError> {
        if let Some(lat_long) = tracker.handle_track_location().await {
            let stores = self.refresh_stores(Some(&lat_long), limit).await?;
            return Ok(NearbyView {
                heading: "Stores near me",
                stores,
                location_error: None,
            });
        }

        tracing::debug!(
            error = tracker.location_error_msg(),
            "no location; listing stores around the default location"
        );
        let stores = self.refresh_stores(None, limit).await?;
        Ok(NearbyView {
            heading: "Popular stores",
            stores,
            location_error: Some(tracker.location_error_msg().to_string()),
        })
    }

    /// Detail view for `id`.
    ///
    /// A store in the current list is persisted first (create-if-absent) so
    /// it can be upvoted later; otherwise the persisted record is looked up.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::Api`] with status 404 when the store is neither in
    /// the current list nor persisted.
    pub async fn view_store(&self, id: &str) -> Result<CoffeeStore, ApiClientError> {
        let records = match self.state.find_store(id) {
            Some(store) => self.api.create_store(&store).await?,
            None => self.api.store_by_id(id).await?,
        };
        first_store(records, id)
    }

    /// Adds one vote and returns the updated store.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::Api`] with status 404 when nothing is persisted
    /// under `id`.
    pub async fn upvote(&self, id: &str) -> Result<CoffeeStore, ApiClientError> {
        let records = self.api.favourite(id).await?;
        first_store(records, id)
    }
}

fn first_store(
    records: Vec<brew_core::CoffeeStoreRecord>,
    id: &str,
) -> Result<CoffeeStore, ApiClientError> {
    records
        .into_iter()
        .next()
        .map(|record| record.store)
        .ok_or_else(|| ApiClientError::Api {
            status: 404,
            code: "not_found".to_string(),
            message: format!("The coffee store could not be found for id: {id}"),
        })
}
