//! Nearby coffee store lookup: places plus decorative photos.

use brew_core::{AppConfig, CoffeeStore, DEFAULT_LAT_LONG};

use crate::error::PlacesError;
use crate::foursquare::FoursquareClient;
use crate::images::{ImagePolicy, PositionalImages};
use crate::normalize::normalize_place;
use crate::unsplash::{Orientation, UnsplashClient};

pub const DEFAULT_LIMIT: u32 = 6;
pub const DEFAULT_QUERY: &str = "coffee";

const PHOTO_QUERY: &str = "coffee cafe";
const PHOTO_PAGE_SIZE: u32 = 40;

/// Looks up cafés near a location and dresses them with stock photos.
pub struct NearbyStoreFetcher {
    places: FoursquareClient,
    photos: UnsplashClient,
    image_policy: Box<dyn ImagePolicy>,
    default_lat_long: String,
}

impl NearbyStoreFetcher {
    #[must_use]
    pub fn new(places: FoursquareClient, photos: UnsplashClient) -> Self {
        Self {
            places,
            photos,
            image_policy: Box::new(PositionalImages),
            default_lat_long: DEFAULT_LAT_LONG.to_string(),
        }
    }

    /// Builds both clients from the application config.
    ///
    /// Missing API keys are allowed here; fetches then come back empty.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if a `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        let places = FoursquareClient::new(
            config.foursquare_api_key.as_deref(),
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        let photos = UnsplashClient::new(
            config.unsplash_access_key.as_deref(),
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        Ok(Self::new(places, photos).with_default_lat_long(&config.default_lat_long))
    }

    #[must_use]
    pub fn with_image_policy(mut self, policy: impl ImagePolicy + 'static) -> Self {
        self.image_policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_default_lat_long(mut self, lat_long: &str) -> Self {
        self.default_lat_long = lat_long.to_string();
        self
    }

    /// Returns up to `limit` stores near `lat_long`, or an empty list if
    /// anything upstream fails.
    ///
    /// Failures are logged, not returned, so an empty result does not tell
    /// "nothing nearby" apart from "upstream down". Use
    /// [`Self::try_fetch_nearby_stores`] when the difference matters.
    pub async fn fetch_nearby_stores(
        &self,
        lat_long: Option<&str>,
        limit: Option<u32>,
        query: Option<&str>,
    ) -> Vec<CoffeeStore> {
        match self.try_fetch_nearby_stores(lat_long, limit, query).await {
            Ok(stores) => stores,
            Err(err) => {
                if !self.places.has_credentials() || !self.photos.has_credentials() {
                    tracing::error!(
                        "places or photo API key missing; set FOURSQUARE_API_KEY and UNSPLASH_ACCESS_KEY"
                    );
                }
                tracing::error!(error = %err, "failed to fetch nearby coffee stores");
                Vec::new()
            }
        }
    }

    /// Same lookup as [`Self::fetch_nearby_stores`] but surfaces the error.
    ///
    /// # Errors
    ///
    /// Any [`PlacesError`] from the photo search or the places search.
    pub async fn try_fetch_nearby_stores(
        &self,
        lat_long: Option<&str>,
        limit: Option<u32>,
        query: Option<&str>,
    ) -> Result<Vec<CoffeeStore>, PlacesError> {
        let lat_long = lat_long
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.default_lat_long.as_str());
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let query = query.filter(|s| !s.trim().is_empty()).unwrap_or(DEFAULT_QUERY);

        let photos = self
            .photos
            .search_photo_urls(PHOTO_QUERY, PHOTO_PAGE_SIZE, Orientation::Landscape)
            .await?;
        let places = self.places.nearby(lat_long, query, limit).await?;

        let stores: Vec<CoffeeStore> = places
            .into_iter()
            .enumerate()
            .map(|(idx, place)| {
                let img_url = self.image_policy.image_for(idx, &place, &photos);
                normalize_place(place, img_url)
            })
            .collect();

        tracing::info!(
            count = stores.len(),
            lat_long,
            limit,
            "fetched nearby coffee stores"
        );
        Ok(stores)
    }
}
