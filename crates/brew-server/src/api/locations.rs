use axum::{
    extract::{Query, State},
    Extension, Json,
};
use brew_core::CoffeeStore;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

const MAX_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationQuery {
    pub lat_long: Option<String>,
    pub limit: Option<String>,
}

/// Parses the `limit` query value and clamps it to `1..=50`.
///
/// An absent or blank value yields `None` so the fetcher default applies.
pub(super) fn normalize_limit(raw: Option<&str>) -> Result<Option<u32>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let parsed: u32 = raw
        .parse()
        .map_err(|_| format!("limit must be a positive integer, got {raw:?}"))?;
    Ok(Some(parsed.clamp(1, MAX_LIMIT)))
}

pub(super) async fn get_coffee_stores_by_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<Vec<CoffeeStore>>>, ApiError> {
    let limit = normalize_limit(query.limit.as_deref())
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;

    let stores = state
        .fetcher
        .fetch_nearby_stores(query.lat_long.as_deref(), limit, None)
        .await;

    Ok(Json(ApiResponse::new(stores, req_id.0)))
}
