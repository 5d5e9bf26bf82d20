use axum::{Router, routing::get};

use crate::controllers::calculation_controller::{calculate, calculate_query, get_defaults, health};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/calculate", get(calculate_query).post(calculate))
        .route("/defaults", get(get_defaults))
        .route("/health", get(health))
        .with_state(state)
}
