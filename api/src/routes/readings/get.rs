use super::RECENT_LIMIT;
use super::common::{CurrentReading, ReadingResponse};
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

/// GET /api/data
///
/// Returns the most recent readings, newest first, at most 100 of them.
///
/// ### Responses
/// - `200 OK` — array of readings; `[]` when nothing has been stored yet
/// ```json
/// [
///   { "id": 2, "value": 46.2, "timestamp": "2025-12-03T17:00:02+00:00" },
///   { "id": 1, "value": 45.5, "timestamp": "2025-12-03T17:00:00+00:00" }
/// ]
/// ```
/// - `500 Internal Server Error` — the store could not be read
pub async fn get_recent_readings(State(app_state): State<AppState>) -> Response {
    match app_state.store().recent(RECENT_LIMIT).await {
        Ok(readings) => {
            let body: Vec<ReadingResponse> = readings.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load recent readings");
            ApiResponse::<Empty>::internal_error("Failed to load readings")
        }
    }
}

/// GET /api/current
///
/// Returns the latest reading.
///
/// ### Responses
/// - `200 OK` — `{ "id": 100, "value": 47.3, "timestamp": "..." }`, or `{}` when
///   nothing has been stored yet
/// - `500 Internal Server Error` — the store could not be read
pub async fn get_current_reading(State(app_state): State<AppState>) -> Response {
    match app_state.store().latest().await {
        Ok(reading) => Json(CurrentReading::from(reading)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to load current reading");
            ApiResponse::<Empty>::internal_error("Failed to load current reading")
        }
    }
}
