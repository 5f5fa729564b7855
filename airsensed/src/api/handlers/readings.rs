//! Sensor reading endpoints

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::api_ok;
use airsense_core::api::{ApiResponse, HistoryResponse, LatestResponse};
use axum::{extract::State, Json};
use tracing::debug;

/// Return the latest reading.
///
/// An empty cache is an expected startup transient and answers success with no
/// reading rather than an error.
///
/// # Endpoint
///
/// `GET /sensor/latest`
pub(crate) async fn get_latest(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LatestResponse>>, ApiError> {
    debug!("Request: GET /sensor/latest");

    let reading = state.cache.latest().await;
    api_ok!(LatestResponse { reading })
}

/// Return the cached history, oldest first.
///
/// The response is a snapshot: it never aliases the live buffer, so an
/// in-flight ingestion write cannot tear it.
///
/// # Endpoint
///
/// `GET /sensor/history`
pub(crate) async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    debug!("Request: GET /sensor/history");

    let readings = state.cache.history().await;
    let count = readings.len();
    api_ok!(HistoryResponse { readings, count })
}
