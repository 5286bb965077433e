pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn};
use state::AppState;
use tower_http::cors::CorsLayer;

/// Builds the full HTTP application: `/api` routes, request logging and CORS.
///
/// The dashboard is served from a different origin, so CORS is fully permissive.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::routes(app_state))
        .layer(from_fn(middleware::log_request))
        .layer(CorsLayer::very_permissive())
}
