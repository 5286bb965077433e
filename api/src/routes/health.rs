use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use ingestor::StatusSnapshot;
use serde::Serialize;

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub ingestor: StatusSnapshot,
}

/// GET /health
///
/// Reports that the API is up, together with the ingestor's connection state
/// and message counters.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "status": "ok",
///     "ingestor": { "state": "subscribed", "received": 12, "stored": 11, ... }
///   },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let report = HealthReport {
        status: "ok",
        ingestor: app_state.ingestor().snapshot(),
    };
    Json(ApiResponse::success(report, "Health check passed"))
}

#[cfg(test)]
mod tests {
    use super::health_check;
    use crate::state::AppState;
    use axum::body::to_bytes;
    use axum::extract::State;
    use axum::response::IntoResponse;
    use db::test_utils::setup_test_store;
    use ingestor::{ConnectionState, IngestorStatus};
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    async fn health_check_reports_ingestor_state() {
        let status = Arc::new(IngestorStatus::new());
        status.set_state(ConnectionState::Subscribed);
        let state = AppState::new(setup_test_store().await, status);

        let response = health_check(State(state)).await.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["ingestor"]["state"], "subscribed");
        assert_eq!(json["message"], "Health check passed");
    }
}
