//! Location resolution for a client session.

use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::{StoreAction, StoreHandle};

/// A position fix reported by a [`Geolocator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Formats as the `"lat,long"` string the places API and state expect.
    #[must_use]
    pub fn to_lat_long(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, long) = s.split_once(',').ok_or(PositionError::PositionUnavailable)?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| PositionError::PositionUnavailable)?;
        let longitude = long
            .trim()
            .parse::<f64>()
            .map_err(|_| PositionError::PositionUnavailable)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Why a position request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
}

/// User-facing location failures. The display strings are shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Unable to retrieve your location")]
    Unavailable(PositionError),
}

/// A source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// Reports a fixed position, e.g. one passed on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coordinates: Coordinates,
}

impl FixedGeolocator {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Ok(self.coordinates)
    }
}

/// Resolves the current location once and publishes it as `SET_LAT_LONG`.
///
/// No retry and no reuse of an earlier fix.
///
/// # Errors
///
/// [`LocationError::Unsupported`] without a geolocator,
/// [`LocationError::Unavailable`] when the geolocator fails.
pub async fn resolve_location(
    geolocator: Option<&dyn Geolocator>,
    state: &StoreHandle,
) -> Result<String, LocationError> {
    let geolocator = geolocator.ok_or(LocationError::Unsupported)?;
    let position = geolocator
        .current_position()
        .await
        .map_err(LocationError::Unavailable)?;

    let lat_long = position.to_lat_long();
    state.dispatch(StoreAction::SetLatLong(lat_long.clone()));
    Ok(lat_long)
}

/// Tracks an in-flight location lookup and its last error for display.
pub struct LocationTracker {
    geolocator: Option<Box<dyn Geolocator>>,
    state: StoreHandle,
    is_finding_location: bool,
    location_error_msg: String,
}

impl LocationTracker {
    #[must_use]
    pub fn new(geolocator: Option<Box<dyn Geolocator>>, state: StoreHandle) -> Self {
        Self {
            geolocator,
            state,
            is_finding_location: false,
            location_error_msg: String::new(),
        }
    }

    /// Runs one lookup. On failure the message is kept for display rather
    /// than returned as an error.
    pub async fn handle_track_location(&mut self) -> Option<String> {
        self.is_finding_location = true;
        let result = resolve_location(self.geolocator.as_deref(), &self.state).await;
        self.is_finding_location = false;

        match result {
            Ok(lat_long) => {
                self.location_error_msg.clear();
                Some(lat_long)
            }
            Err(err) => {
                tracing::warn!(error = ?err, "location lookup failed");
                self.location_error_msg = err.to_string();
                None
            }
        }
    }

    #[must_use]
    pub fn is_finding_location(&self) -> bool {
        self.is_finding_location
    }

    #[must_use]
    pub fn location_error_msg(&self) -> &str {
        &self.location_error_msg
    }
}
