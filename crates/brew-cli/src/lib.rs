pub mod api;
pub mod render;
pub mod session;

pub use api::{ApiClientError, BrewApiClient, DEFAULT_API_URL};
pub use render::{render_store_detail, render_store_list, DEFAULT_IMAGE_URL};
pub use session::{tracker_for, ConfiguredGeolocator, NearbyView, Session};
