//! REST API for the Airsense daemon
//!
//! Axum router and handlers. Handlers only ever read the cache; the ingestion
//! loop is the sole writer.

pub(crate) mod handlers;

use crate::advisor::AdvisorClient;
use crate::cache::ReadingCache;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Application state shared across all handlers
#[derive(Clone)]
pub(crate) struct AppState {
    /// Shared reading cache (read-only from handlers)
    pub cache: ReadingCache,
    /// Advisor proxy client
    pub advisor: Arc<AdvisorClient>,
    /// Serial device path, None in mock mode
    pub device: Option<String>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(cache: ReadingCache, advisor: AdvisorClient, device: Option<String>) -> Self {
        Self {
            cache,
            advisor: Arc::new(advisor),
            device,
            start_time: Instant::now(),
        }
    }
}

/// Create the main API router with all endpoints
pub(crate) fn create_router(state: AppState) -> Router {
    info!("Setting up API router...");

    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(64 * 1024)); // chat messages stay small

    Router::new()
        // Sensor endpoints
        .route("/sensor/latest", get(handlers::readings::get_latest))
        .route("/sensor/history", get(handlers::readings::get_history))
        // Advisor proxy endpoints
        .route("/ai/advice", get(handlers::advice::get_recommendation))
        .route("/chat", post(handlers::advice::chat))
        // Daemon info endpoint
        .route("/info", get(handlers::info::get_info))
        // Root endpoint
        .route("/", get(handlers::info::root))
        .layer(middleware_stack)
        .with_state(state)
}

/// Error handling utilities
pub(crate) mod error {
    use airsense_core::api::ApiResponse;
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use tracing::error;

    /// Custom error type for API responses
    #[derive(Debug)]
    pub struct ApiError {
        pub status_code: StatusCode,
        pub message: String,
    }

    impl ApiError {
        /// Create a new API error
        pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
            Self {
                status_code,
                message: message.into(),
            }
        }

        /// Create a bad request error
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self::new(StatusCode::BAD_REQUEST, message)
        }

        /// Create an internal server error
        pub fn internal_error(message: impl Into<String>) -> Self {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }

        /// Create a bad gateway error (upstream advisor/sink issues)
        pub fn bad_gateway(message: impl Into<String>) -> Self {
            Self::new(StatusCode::BAD_GATEWAY, message)
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            error!("API Error {}: {}", self.status_code, self.message);

            let response: ApiResponse<()> = ApiResponse::error(self.message);

            (self.status_code, Json(response)).into_response()
        }
    }

    /// Convert AirsenseError to ApiError
    impl From<airsense_core::AirsenseError> for ApiError {
        fn from(err: airsense_core::AirsenseError) -> Self {
            match err {
                airsense_core::AirsenseError::InvalidInput(msg) => Self::bad_request(msg),
                airsense_core::AirsenseError::Advisor(msg) => Self::bad_gateway(msg),
                airsense_core::AirsenseError::Forward(msg) => Self::bad_gateway(msg),
                airsense_core::AirsenseError::Timeout(msg) => Self::bad_gateway(msg),
                _ => Self::internal_error(err.to_string()),
            }
        }
    }
}

/// Helper macros for common responses
#[macro_export]
macro_rules! api_ok {
    ($data:expr) => {
        Ok(axum::Json(airsense_core::api::ApiResponse::success($data)))
    };
}

#[macro_export]
macro_rules! api_fail {
    ($message:expr) => {
        Err($crate::api::error::ApiError::bad_request($message))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use airsense_core::{AdvisorConfig, Reading};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(cache: ReadingCache, device: Option<String>) -> Router {
        // Advisor points at a placeholder URL; these tests never call it
        let advisor = AdvisorClient::from_config(&AdvisorConfig::default());
        create_router(AppState::new(cache, advisor, device))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_latest_with_empty_cache_is_success_without_data() {
        let app = test_router(ReadingCache::new(10), None);

        let response = app
            .oneshot(Request::get("/sensor/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert!(json["data"].get("reading").is_none());
    }

    #[tokio::test]
    async fn test_latest_returns_cached_reading() {
        let cache = ReadingCache::new(10);
        cache.accept(Reading::new(21.5, 40.0, 410, 80, 1)).await;
        let app = test_router(cache, None);

        let response = app
            .oneshot(Request::get("/sensor/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["reading"]["temperature"], 21.5);
        assert_eq!(json["data"]["reading"]["eco2"], 410);
    }

    #[tokio::test]
    async fn test_history_returns_snapshot_oldest_first() {
        let cache = ReadingCache::new(10);
        cache.accept(Reading::new(20.0, 50.0, 400, 10, 1)).await;
        cache.accept(Reading::new(21.0, 50.0, 400, 10, 1)).await;
        let app = test_router(cache, None);

        let response = app
            .oneshot(Request::get("/sensor/history").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["count"], 2);
        assert_eq!(json["data"]["readings"][0]["temperature"], 20.0);
        assert_eq!(json["data"]["readings"][1]["temperature"], 21.0);
    }

    #[tokio::test]
    async fn test_advice_with_empty_cache_is_bad_request() {
        let app = test_router(ReadingCache::new(10), None);

        let response = app
            .oneshot(Request::get("/ai/advice").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let app = test_router(ReadingCache::new(10), None);

        let response = app
            .oneshot(
                Request::post("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message":"  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_without_message_field_is_bad_request() {
        let app = test_router(ReadingCache::new(10), None);

        let response = app
            .oneshot(
                Request::post("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        // A body without `message` is the same user error as an empty one
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn test_info_reports_cache_and_device_state() {
        let cache = ReadingCache::new(25);
        cache.accept(Reading::new(20.0, 50.0, 400, 10, 1)).await;
        let app = test_router(cache, Some("/dev/ttyUSB0".to_string()));

        let response = app
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["device_connected"], true);
        assert_eq!(json["data"]["device"], "/dev/ttyUSB0");
        assert_eq!(json["data"]["history_len"], 1);
        assert_eq!(json["data"]["history_capacity"], 25);
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let app = test_router(ReadingCache::new(10), None);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/sensor/latest"));
        assert!(html.contains("/ai/advice"));
    }
}
