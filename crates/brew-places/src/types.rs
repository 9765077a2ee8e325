//! Upstream response shapes. Only the fields this service reads are modelled.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Foursquare Places: GET /v3/places/nearby
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<FoursquarePlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoursquarePlace {
    pub fsq_id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<FoursquareLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoursquareLocation {
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Foursquare lists every neighborhood the place falls into.
    #[serde(default, deserialize_with = "null_as_default")]
    pub neighborhood: Vec<String>,
}

// ---------------------------------------------------------------------------
// Unsplash: GET /search/photos
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashPhoto {
    pub urls: UnsplashPhotoUrls,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashPhotoUrls {
    pub small: String,
}
