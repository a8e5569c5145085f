use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::{CallerId, RequestId},
    models::{ApiResponse, ListeningInsights, RecordPlayRequest, Track},
};

use super::{extract::ApiJson, AppState};

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Tracks the caller has not played yet, best matches first
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    CallerId(user_id): CallerId,
) -> AppResult<Json<ApiResponse<Vec<Track>>>> {
    tracing::info!(request_id = %request_id, user_id = %user_id, "Processing recommendations request");

    let tracks = state.analytics.recommendations(user_id).await?;
    Ok(Json(ApiResponse::ok(tracks)))
}

/// Listening insights, top artists and weekday profile for the caller
pub async fn get_insights(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    CallerId(user_id): CallerId,
) -> AppResult<Json<ApiResponse<ListeningInsights>>> {
    tracing::info!(request_id = %request_id, user_id = %user_id, "Processing insights request");

    let insights = state.analytics.insights(user_id).await?;
    Ok(Json(ApiResponse::ok(insights)))
}

/// Play-tracking signal
pub async fn record_play(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    ApiJson(request): ApiJson<RecordPlayRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    state
        .analytics
        .record_play(user_id, request, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
