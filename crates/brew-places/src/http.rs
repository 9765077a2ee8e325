//! Request plumbing shared by the Foursquare and Unsplash clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlacesError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses `base_url`, forcing exactly one trailing slash so relative joins
/// append to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, PlacesError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Sends `request`, asserts a 2xx status and decodes the body as `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, PlacesError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
