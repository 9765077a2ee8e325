//! HTTP client for one Airtable table.
//!
//! Wraps `reqwest` with bearer authentication, Airtable's `{"records": [...]}`
//! envelope and its `{"error": ...}` failure bodies.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::json;

use crate::error::AirtableError;
use crate::types::{Record, RecordList, StoreFields};

const DEFAULT_BASE_URL: &str = "https://api.airtable.com/";

/// Client for a single table in an Airtable base.
pub struct AirtableClient {
    client: Client,
    api_key: String,
    table_url: Url,
}

impl AirtableClient {
    /// Creates a client for `base_id`/`table` on the production API.
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        base_id: &str,
        table: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AirtableError> {
        Self::with_base_url(
            api_key,
            base_id,
            table,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`AirtableError::InvalidBaseUrl`] if `base_url` cannot carry
    /// a path.
    pub fn with_base_url(
        api_key: &str,
        base_id: &str,
        table: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AirtableError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| AirtableError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut table_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        // Segments are pushed individually so the table name gets percent-encoded.
        table_url
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v0", base_id, table]);

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            table_url,
        })
    }

    /// Lists the first page of records matching `formula`.
    ///
    /// # Errors
    ///
    /// [`AirtableError::Api`] on a non-2xx status, [`AirtableError::Http`] on
    /// network failure, [`AirtableError::Deserialize`] on an unexpected body.
    pub async fn select(&self, formula: &str) -> Result<Vec<Record>, AirtableError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("filterByFormula", formula);

        let request = self.request(Method::GET, url);
        let list = Self::send(request, "select").await?;
        tracing::debug!(formula, count = list.records.len(), "airtable select");
        Ok(list.records)
    }

    /// Creates one record and returns it as stored.
    ///
    /// # Errors
    ///
    /// As [`Self::select`], plus [`AirtableError::EmptyResponse`] if the
    /// response lists no record.
    pub async fn create(&self, fields: &StoreFields) -> Result<Record, AirtableError> {
        let body = json!({ "records": [{ "fields": fields }] });
        let request = self.request(Method::POST, self.table_url.clone()).json(&body);
        let list = Self::send(request, "create").await?;
        list.records
            .into_iter()
            .next()
            .ok_or(AirtableError::EmptyResponse("create"))
    }

    /// Overwrites `voting` on the record `record_id`, leaving other cells alone.
    ///
    /// # Errors
    ///
    /// As [`Self::create`].
    pub async fn update_voting(
        &self,
        record_id: &str,
        voting: i64,
    ) -> Result<Record, AirtableError> {
        let body = json!({ "records": [{ "id": record_id, "fields": { "voting": voting } }] });
        let request = self.request(Method::PATCH, self.table_url.clone()).json(&body);
        let list = Self::send(request, "update").await?;
        list.records
            .into_iter()
            .next()
            .ok_or(AirtableError::EmptyResponse("update"))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).bearer_auth(&self.api_key)
    }

    async fn send(
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<RecordList, AirtableError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                context,
                %message,
                "airtable request rejected"
            );
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| AirtableError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Builds an `id="..."` equality formula, escaping the string literal.
#[must_use]
pub fn id_equals_formula(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("id=\"{escaped}\"")
}

/// Pulls a readable message out of Airtable's error body.
///
/// Airtable sends either `{"error": {"type": .., "message": ..}}` or
/// `{"error": "NOT_FOUND"}`; anything else is returned raw.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    match value.get("error") {
        Some(serde_json::Value::String(kind)) => kind.clone(),
        Some(err) => err
            .get("message")
            .or_else(|| err.get("type"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| err.to_string(), ToOwned::to_owned),
        None => body.to_string(),
    }
}
