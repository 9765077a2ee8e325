use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use brew_core::{ensure_store, find_store, increment_vote, CoffeeStore, CoffeeStoreRecord};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{json_body, map_store_error, ApiError, ApiResponse, AppState};

/// Body of `POST /createCoffeeStore`. Every field may be omitted; blank
/// strings stand in for absent text and the vote count is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateStoreBody {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub neighbourhood: Option<String>,
    pub img_url: Option<String>,
    pub voting: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoreIdBody {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoreIdQuery {
    pub id: Option<String>,
}

impl From<CreateStoreBody> for CoffeeStore {
    fn from(body: CreateStoreBody) -> Self {
        Self {
            id: body.id.unwrap_or_default(),
            name: body.name.unwrap_or_default(),
            address: body.address.unwrap_or_default(),
            neighbourhood: body.neighbourhood.unwrap_or_default(),
            img_url: body.img_url.unwrap_or_default(),
            voting: body.voting.unwrap_or_default(),
        }
    }
}

pub(super) async fn create_coffee_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<CreateStoreBody>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<CoffeeStoreRecord>>>, ApiError> {
    let store = CoffeeStore::from(json_body(&req_id.0, payload)?);
    let record = ensure_store(state.stores.as_ref(), &store)
        .await
        .map_err(|e| {
            map_store_error(
                req_id.0.clone(),
                "There has been an issue trying to create or find a coffee store",
                e,
            )
        })?;

    Ok(Json(ApiResponse::new(vec![record], req_id.0)))
}

pub(super) async fn favourite_coffee_store_by_id(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<StoreIdBody>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<CoffeeStoreRecord>>>, ApiError> {
    let id = json_body(&req_id.0, payload)?.id.unwrap_or_default();
    let record = increment_vote(state.stores.as_ref(), &id)
        .await
        .map_err(|e| {
            map_store_error(
                req_id.0.clone(),
                "There has been an error upvoting the coffee store",
                e,
            )
        })?;

    Ok(Json(ApiResponse::new(vec![record], req_id.0)))
}

pub(super) async fn get_coffee_store_by_id(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StoreIdQuery>,
) -> Result<Json<ApiResponse<Vec<CoffeeStoreRecord>>>, ApiError> {
    let id = query.id.unwrap_or_default();
    let records = find_store(state.stores.as_ref(), &id)
        .await
        .map_err(|e| {
            map_store_error(
                req_id.0.clone(),
                "Something went wrong while trying to get a coffee store by id",
                e,
            )
        })?;

    Ok(Json(ApiResponse::new(records, req_id.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_accepts_camel_case_and_missing_fields() {
        let body: CreateStoreBody =
            serde_json::from_str(r#"{"id":"abc","name":"Joe's","imgUrl":"https://img/1.jpg"}"#)
                .expect("body should parse");
        let store = CoffeeStore::from(body);
        assert_eq!(store.id, "abc");
        assert_eq!(store.img_url, "https://img/1.jpg");
        assert_eq!(store.neighbourhood, "");
        assert_eq!(store.voting, 0);
    }
}
