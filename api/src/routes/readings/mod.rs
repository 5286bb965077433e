//! Reading routes.
//!
//! - `GET /data` → newest readings, at most [`RECENT_LIMIT`]
//! - `GET /current` → the latest reading, or `{}`

use crate::state::AppState;
use axum::{Router, routing::get};

pub mod common;
pub mod get;

/// Maximum number of readings returned by `GET /data`.
pub const RECENT_LIMIT: u64 = 100;

pub fn readings_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(get::get_recent_readings))
        .route("/current", get(get::get_current_reading))
}
