//! HTTP client for the Foursquare Places v3 `nearby` search.

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::http::{build_client, parse_base_url, send_json};
use crate::types::{FoursquarePlace, PlacesResponse};

const DEFAULT_BASE_URL: &str = "https://api.foursquare.com/";

/// Client for Foursquare's place search.
///
/// The API key goes in the `Authorization` header as-is (no scheme prefix).
/// A client built without a key fails every call with
/// [`PlacesError::MissingCredentials`] instead of sending the request.
pub struct FoursquareClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl FoursquareClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            api_key: api_key.map(ToOwned::to_owned),
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Searches for places near `lat_long` matching `query`, at most `limit`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::MissingCredentials`] when no API key is configured.
    /// - [`PlacesError::Http`] on network failure or non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not the expected shape.
    pub async fn nearby(
        &self,
        lat_long: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<FoursquarePlace>, PlacesError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PlacesError::MissingCredentials("FOURSQUARE_API_KEY"))?;

        let url = self.nearby_url(lat_long, query, limit)?;
        let request = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, api_key);

        let response: PlacesResponse =
            send_json(request, &format!("places/nearby(ll={lat_long})")).await?;
        tracing::debug!(
            count = response.results.len(),
            lat_long,
            "foursquare places fetched"
        );
        Ok(response.results)
    }

    fn nearby_url(&self, lat_long: &str, query: &str, limit: u32) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join("v3/places/nearby")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("ll", lat_long)
            .append_pair("query", query)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_url_carries_search_parameters() {
        let client = FoursquareClient::with_base_url(
            Some("key"),
            5,
            "brew-test/0.1",
            "https://api.foursquare.com",
        )
        .expect("client");
        let url = client.nearby_url("51.5,-0.13", "coffee", 6).expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.foursquare.com/v3/places/nearby?ll=51.5%2C-0.13&query=coffee&limit=6"
        );
    }

    #[tokio::test]
    async fn nearby_without_key_fails_before_sending() {
        let client = FoursquareClient::with_base_url(None, 5, "brew-test/0.1", "http://127.0.0.1:9")
            .expect("client");
        assert!(!client.has_credentials());
        let err = client.nearby("1,2", "coffee", 6).await.unwrap_err();
        assert!(matches!(err, PlacesError::MissingCredentials("FOURSQUARE_API_KEY")));
    }
}
