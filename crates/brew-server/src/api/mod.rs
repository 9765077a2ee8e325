mod locations;
mod stores;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use brew_core::{StoreError, StoreRepository};
use brew_places::NearbyStoreFetcher;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<dyn StoreRepository>,
    pub fetcher: Arc<NearbyStoreFetcher>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a store service failure onto the API error envelope.
///
/// Every not-found answers 404. Backend failures are logged and reported as
/// `"{context}, {error}"` so callers see the underlying cause.
pub(super) fn map_store_error(request_id: String, context: &str, error: StoreError) -> ApiError {
    match error {
        StoreError::MissingId | StoreError::MissingName => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        StoreError::NotFound(_) => ApiError::new(request_id, "not_found", error.to_string()),
        StoreError::Repository(e) => {
            tracing::error!(error = %e, request_id = %request_id, "{context}");
            ApiError::new(request_id, "internal_error", format!("{context}, {e}"))
        }
    }
}

/// Unwraps a JSON body, turning a missing content type or a malformed body
/// into a 400 `validation_error` instead of axum's plain-text rejection.
pub(super) fn json_body<T>(
    request_id: &str,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::new(request_id, "validation_error", rejection.body_text()))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/createCoffeeStore", post(stores::create_coffee_store))
        .route(
            "/favouriteCoffeeStoreById",
            put(stores::favourite_coffee_store_by_id),
        )
        .route("/getCoffeeStoreById", get(stores::get_coffee_store_by_id))
        .route(
            "/getCoffeeStoresByLocation",
            get(locations::get_coffee_stores_by_location),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::new(HealthData { status: "ok" }, req_id.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use brew_core::InMemoryStoreRepository;
    use brew_places::{FoursquareClient, UnsplashClient};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Fetcher whose upstreams live at `base_url` (or nowhere, for port 9).
    fn fetcher(base_url: &str) -> Arc<NearbyStoreFetcher> {
        let places = FoursquareClient::with_base_url(Some("fsq-key"), 5, "brew-test/0.1", base_url)
            .expect("foursquare client");
        let photos =
            UnsplashClient::with_base_url(Some("unsplash-key"), 5, "brew-test/0.1", base_url)
                .expect("unsplash client");
        Arc::new(NearbyStoreFetcher::new(places, photos))
    }

    fn test_app() -> Router {
        build_app(AppState {
            stores: Arc::new(InMemoryStoreRepository::new()),
            fetcher: fetcher("http://127.0.0.1:9"),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_not_found_maps_to_404() {
        let response = ApiError::new("req-1", "not_found", "missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn repository_failures_keep_the_underlying_message() {
        let err = map_store_error(
            "req-1".to_string(),
            "There has been an error upvoting the coffee store",
            StoreError::Repository(brew_core::RepositoryError::Backend("boom".to_string())),
        );
        assert_eq!(err.error.code, "internal_error");
        assert_eq!(
            err.error.message,
            "There has been an error upvoting the coffee store, store backend error: boom"
        );
    }

    #[tokio::test]
    async fn health_returns_ok_and_echoes_request_id() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).map(|v| v.as_bytes()),
            Some(&b"req-abc"[..])
        );
    }

    #[tokio::test]
    async fn create_coffee_store_is_idempotent() {
        let app = test_app();
        let body = json!({ "id": "abc", "name": "Joe's" });

        let (status, first) = send(&app, json_request("POST", "/createCoffeeStore", &body)).await;
        assert_eq!(status, StatusCode::OK);
        let data = first["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], "abc");
        assert_eq!(data[0]["voting"], 0);

        let (status, second) = send(&app, json_request("POST", "/createCoffeeStore", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["data"], first["data"]);

        let (_, lookup) = send(&app, get_request("/getCoffeeStoreById?id=abc")).await;
        assert_eq!(lookup["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn create_coffee_store_requires_id_and_name() {
        let app = test_app();

        let (status, json) = send(
            &app,
            json_request("POST", "/createCoffeeStore", &json!({ "name": "Joe's" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");

        let (status, json) = send(
            &app,
            json_request("POST", "/createCoffeeStore", &json!({ "id": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"]["message"],
            "The coffee store name is missing from the request"
        );
    }

    #[tokio::test]
    async fn malformed_json_bodies_use_the_error_envelope() {
        let app = test_app();

        let (status, json) = send(
            &app,
            json_request("POST", "/createCoffeeStore", &json!({ "id": 42 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(json["meta"]["request_id"].is_string());

        let (status, json) = send(
            &app,
            Request::builder()
                .method("PUT")
                .uri("/favouriteCoffeeStoreById")
                .body(Body::from(r#"{"id":"abc"}"#))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn favourite_increments_vote() {
        let app = test_app();
        send(
            &app,
            json_request("POST", "/createCoffeeStore", &json!({ "id": "abc", "name": "Joe's" })),
        )
        .await;

        let (status, json) = send(
            &app,
            json_request("PUT", "/favouriteCoffeeStoreById", &json!({ "id": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["id"], "abc");
        assert_eq!(json["data"][0]["voting"], 1);
    }

    #[tokio::test]
    async fn favourite_unknown_store_is_not_found() {
        let app = test_app();
        let (status, json) = send(
            &app,
            json_request("PUT", "/favouriteCoffeeStoreById", &json!({ "id": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json["error"]["message"],
            "The coffee store could not be found for id: nope"
        );

        let (status, _) = send(
            &app,
            json_request("PUT", "/favouriteCoffeeStoreById", &json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_coffee_store_by_id_validates_and_reports_missing() {
        let app = test_app();

        let (status, _) = send(&app, get_request("/getCoffeeStoreById")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(&app, get_request("/getCoffeeStoreById?id=ghost")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn stores_by_location_is_empty_when_upstream_is_down() {
        let app = test_app();
        let (status, json) = send(
            &app,
            get_request("/getCoffeeStoresByLocation?latLong=51.5,-0.13&limit=6"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn stores_by_location_rejects_bad_limit() {
        let app = test_app();
        let (status, json) = send(
            &app,
            get_request("/getCoffeeStoresByLocation?limit=lots"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn stores_by_location_returns_fetched_stores() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "results": [{ "urls": { "small": "https://images.example.com/0.jpg" } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3/places/nearby"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
                "results": [{ "fsq_id": "fsq-1", "name": "Flat White" }]
            })))
            .mount(&server)
            .await;

        let app = build_app(AppState {
            stores: Arc::new(InMemoryStoreRepository::new()),
            fetcher: fetcher(&server.uri()),
        });
        let (status, json) = send(&app, get_request("/getCoffeeStoresByLocation")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["id"], "fsq-1");
        assert_eq!(json["data"][0]["imgUrl"], "https://images.example.com/0.jpg");
        assert_eq!(json["data"][0]["address"], "");
    }
}
