use thiserror::Error;

/// Errors returned by the places and photo clients.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx status from the upstream API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The credential named by the environment variable is not configured.
    #[error("missing API credential {0}")]
    MissingCredentials(&'static str),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
