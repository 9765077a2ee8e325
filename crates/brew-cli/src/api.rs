//! HTTP client for the brew server's JSON API.

use std::time::Duration;

use brew_core::{CoffeeStore, CoffeeStoreRecord};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope.
    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to deserialize response ({context}): {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiClientError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Client for the four coffee-store routes.
pub struct BrewApiClient {
    client: Client,
    base_url: Url,
}

impl BrewApiClient {
    /// # Errors
    ///
    /// Returns [`ApiClientError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ApiClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("brew-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let normalised = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalised).map_err(|e| ApiClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// `GET /getCoffeeStoresByLocation`. `None` lets the server pick its
    /// default location and limit.
    ///
    /// # Errors
    ///
    /// Any [`ApiClientError`] from the request or the response body.
    pub async fn stores_by_location(
        &self,
        lat_long: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<CoffeeStore>, ApiClientError> {
        let mut url = self.endpoint("getCoffeeStoresByLocation")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(lat_long) = lat_long {
                pairs.append_pair("latLong", lat_long);
            }
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        self.send(self.client.get(url), "getCoffeeStoresByLocation")
            .await
    }

    /// `POST /createCoffeeStore`: returns the persisted record, creating it
    /// on first call.
    ///
    /// # Errors
    ///
    /// Any [`ApiClientError`] from the request or the response body.
    pub async fn create_store(
        &self,
        store: &CoffeeStore,
    ) -> Result<Vec<CoffeeStoreRecord>, ApiClientError> {
        let url = self.endpoint("createCoffeeStore")?;
        self.send(self.client.post(url).json(store), "createCoffeeStore")
            .await
    }

    /// `GET /getCoffeeStoreById`.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::Api`] with status 404 when nothing is persisted
    /// under `id`.
    pub async fn store_by_id(&self, id: &str) -> Result<Vec<CoffeeStoreRecord>, ApiClientError> {
        let mut url = self.endpoint("getCoffeeStoreById")?;
        url.query_pairs_mut().append_pair("id", id);
        self.send(self.client.get(url), "getCoffeeStoreById").await
    }

    /// `PUT /favouriteCoffeeStoreById`.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::Api`] with status 404 when nothing is persisted
    /// under `id`.
    pub async fn favourite(&self, id: &str) -> Result<Vec<CoffeeStoreRecord>, ApiClientError> {
        let url = self.endpoint("favouriteCoffeeStoreById")?;
        self.send(
            self.client.put(url).json(&json!({ "id": id })),
            "favouriteCoffeeStoreById",
        )
        .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => ApiClientError::Api {
                    status: status.as_u16(),
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                Err(_) => ApiClientError::Api {
                    status: status.as_u16(),
                    code: "http_error".to_string(),
                    message: body,
                },
            });
        }

        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|source| ApiClientError::Deserialize {
                context: context.to_string(),
                source,
            })
    }
}
