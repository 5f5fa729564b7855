//! Advisor proxy endpoints

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::{api_fail, api_ok};
use airsense_core::api::{AdviceResponse, ApiResponse, ChatRequest, ChatResponse};
use axum::{extract::State, Json};
use tracing::debug;

/// Ask the advisor service for a recommendation based on the latest reading.
///
/// With an empty cache there is nothing to advise on, so this (unlike the
/// sensor endpoints) answers 400.
///
/// # Endpoint
///
/// `GET /ai/advice`
pub(crate) async fn get_recommendation(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdviceResponse>>, ApiError> {
    debug!("Request: GET /ai/advice");

    let Some(reading) = state.cache.latest().await else {
        return api_fail!("No reading available yet");
    };

    let recommendation = state.advisor.recommendation(&reading).await?;
    api_ok!(AdviceResponse { recommendation })
}

/// Forward a chat message to the advisor service.
///
/// # Endpoint
///
/// `POST /chat` with body `{"message": "..."}`
pub(crate) async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, ApiError> {
    debug!("Request: POST /chat");

    if request.message.trim().is_empty() {
        return api_fail!("No message provided");
    }

    let response = state.advisor.chat(&request.message).await?;
    api_ok!(ChatResponse { response })
}
