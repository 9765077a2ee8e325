//! HTTP client for Unsplash photo search.

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::http::{build_client, parse_base_url, send_json};
use crate::types::PhotoSearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com/";

/// Photo orientation filter accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Squarish => "squarish",
        }
    }
}

/// Client for Unsplash's public search API, authenticated with an access key.
pub struct UnsplashClient {
    client: Client,
    access_key: Option<String>,
    base_url: Url,
}

impl UnsplashClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        access_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(access_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            access_key: access_key.map(ToOwned::to_owned),
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.access_key.is_some()
    }

    /// Returns the small-size URLs of the first page of matching photos, in
    /// the order Unsplash ranked them.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::MissingCredentials`] when no access key is configured.
    /// - [`PlacesError::Http`] on network failure or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn search_photo_urls(
        &self,
        query: &str,
        per_page: u32,
        orientation: Orientation,
    ) -> Result<Vec<String>, PlacesError> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(PlacesError::MissingCredentials("UNSPLASH_ACCESS_KEY"))?;

        let mut url = self
            .base_url
            .join("search/photos")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("per_page", &per_page.to_string())
            .append_pair("orientation", orientation.as_str());

        let request = self
            .client
            .get(url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Client-ID {access_key}"),
            )
            .header("Accept-Version", "v1");

        let response: PhotoSearchResponse =
            send_json(request, &format!("search/photos(query={query})")).await?;
        Ok(response
            .results
            .into_iter()
            .map(|photo| photo.urls.small)
            .collect())
    }
}
