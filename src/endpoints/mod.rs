pub mod batches;
pub mod forms;
pub mod species;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(batches::batches_routes(state.clone()))
        .merge(species::species_routes(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
