use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials and location of the hosted store table.
#[derive(Clone)]
pub struct AirtableSettings {
    pub api_key: String,
    pub base_id: String,
    pub table: String,
}

impl std::fmt::Debug for AirtableSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableSettings")
            .field("api_key", &"[redacted]")
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub default_lat_long: String,
    pub foursquare_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    /// `None` when either the Airtable key or base id is unset.
    pub airtable: Option<AirtableSettings>,
}

impl AppConfig {
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_lat_long", &self.default_lat_long)
            .field(
                "foursquare_api_key",
                &self.foursquare_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "unsplash_access_key",
                &self.unsplash_access_key.as_ref().map(|_| "[redacted]"),
            )
            .field("airtable", &self.airtable)
            .finish()
    }
}
