use brew_core::RepositoryError;
use thiserror::Error;

/// Errors returned by the Airtable client.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Airtable answered with a non-2xx status.
    #[error("Airtable returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A write succeeded but the response listed no records.
    #[error("Airtable {0} response contained no records")]
    EmptyResponse(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<AirtableError> for RepositoryError {
    fn from(err: AirtableError) -> Self {
        RepositoryError::Backend(err.to_string())
    }
}
