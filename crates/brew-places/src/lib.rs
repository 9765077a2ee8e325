pub mod error;
pub mod fetcher;
pub mod foursquare;
mod http;
pub mod images;
pub mod normalize;
pub mod types;
pub mod unsplash;

pub use error::PlacesError;
pub use fetcher::{NearbyStoreFetcher, DEFAULT_LIMIT, DEFAULT_QUERY};
pub use foursquare::FoursquareClient;
pub use images::{ImagePolicy, PositionalImages};
pub use normalize::normalize_place;
pub use types::{FoursquareLocation, FoursquarePlace};
pub use unsplash::{Orientation, UnsplashClient};
