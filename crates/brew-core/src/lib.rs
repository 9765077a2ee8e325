pub mod app_config;
pub mod config;
pub mod location;
pub mod memory;
pub mod repository;
pub mod service;
pub mod state;
pub mod stores;

use thiserror::Error;

pub use app_config::{AirtableSettings, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{
    resolve_location, Coordinates, FixedGeolocator, Geolocator, LocationError, LocationTracker,
    PositionError,
};
pub use memory::InMemoryStoreRepository;
pub use repository::{RepositoryError, StoreRepository};
pub use service::{ensure_store, find_store, increment_vote, StoreError};
pub use state::{reduce, StoreAction, StoreHandle, StoreState};
pub use stores::{CoffeeStore, CoffeeStoreRecord, DEFAULT_LAT_LONG};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
