use crate::app_config::{AirtableSettings, AppConfig, Environment};
use crate::stores::DEFAULT_LAT_LONG;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset, matching how a blank `.env` entry reads.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("BREW_ENV", "development"))
        .ok_or_else(|| invalid("BREW_ENV", "expected development, test or production".into()))?;

    let bind_addr = or_default("BREW_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BREW_BIND_ADDR", e.to_string()))?;

    let http_timeout_secs = or_default("BREW_HTTP_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("BREW_HTTP_TIMEOUT_SECS", e.to_string()))?;

    let log_level = or_default("BREW_LOG_LEVEL", "info");
    let user_agent = or_default("BREW_USER_AGENT", "brew/0.1 (coffee-discovery)");
    let default_lat_long = or_default("BREW_DEFAULT_LAT_LONG", DEFAULT_LAT_LONG);

    let airtable = match (optional("AIRTABLE_API_KEY"), optional("AIRTABLE_BASE_ID")) {
        (Some(api_key), Some(base_id)) => Some(AirtableSettings {
            api_key,
            base_id,
            table: or_default("AIRTABLE_TABLE", "coffee-stores"),
        }),
        _ => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        http_timeout_secs,
        user_agent,
        default_lat_long,
        foursquare_api_key: optional("FOURSQUARE_API_KEY"),
        unsplash_access_key: optional("UNSPLASH_ACCESS_KEY"),
        airtable,
    })
}

fn parse_environment(s: &str) -> Option<Environment> {
    match s.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Some(Environment::Development),
        "test" => Some(Environment::Test),
        "production" | "prod" => Some(Environment::Production),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should load");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "brew/0.1 (coffee-discovery)");
        assert_eq!(cfg.default_lat_long, DEFAULT_LAT_LONG);
        assert!(cfg.foursquare_api_key.is_none());
        assert!(cfg.unsplash_access_key.is_none());
        assert!(cfg.airtable.is_none());
    }

    #[test]
    fn parse_environment_accepts_known_values() {
        assert_eq!(parse_environment("production"), Some(Environment::Production));
        assert_eq!(parse_environment("TEST"), Some(Environment::Test));
        assert_eq!(parse_environment("dev"), Some(Environment::Development));
        assert_eq!(parse_environment("staging"), None);
    }

    #[test]
    fn build_app_config_rejects_unknown_environment() {
        let mut map = HashMap::new();
        map.insert("BREW_ENV", "staging");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BREW_ENV"
            ),
            "expected InvalidEnvVar(BREW_ENV), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("BREW_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BREW_BIND_ADDR"
            ),
            "expected InvalidEnvVar(BREW_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("BREW_HTTP_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(
                result,
                Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BREW_HTTP_TIMEOUT_SECS"
            ),
            "expected InvalidEnvVar(BREW_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn airtable_settings_require_key_and_base() {
        let mut map = HashMap::new();
        map.insert("AIRTABLE_API_KEY", "pat-123");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert!(cfg.airtable.is_none(), "base id missing");

        map.insert("AIRTABLE_BASE_ID", "appXYZ");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        let airtable = cfg.airtable.expect("airtable settings");
        assert_eq!(airtable.base_id, "appXYZ");
        assert_eq!(airtable.table, "coffee-stores");
    }

    #[test]
    fn blank_api_keys_are_treated_as_unset() {
        let mut map = HashMap::new();
        map.insert("FOURSQUARE_API_KEY", "   ");
        map.insert("UNSPLASH_ACCESS_KEY", "unsplash-key");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert!(cfg.foursquare_api_key.is_none());
        assert_eq!(cfg.unsplash_access_key.as_deref(), Some("unsplash-key"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut map = HashMap::new();
        map.insert("FOURSQUARE_API_KEY", "fsq-secret");
        map.insert("AIRTABLE_API_KEY", "pat-secret");
        map.insert("AIRTABLE_BASE_ID", "appXYZ");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("fsq-secret"));
        assert!(!rendered.contains("pat-secret"));
        assert!(rendered.contains("appXYZ"));
    }
}
