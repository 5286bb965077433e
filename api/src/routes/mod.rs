//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness plus ingestor status
//! - `/data`, `/current` → moisture readings (read-only)

use crate::routes::{health::health_routes, readings::readings_routes};
use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod readings;

/// Builds the `/api` router with its state attached.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(readings_routes())
        .with_state(app_state)
}
