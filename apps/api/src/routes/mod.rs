pub mod health;

use axum::{http::Uri, routing::get, Router};

use crate::analytics::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analytics", get(handlers::handle_get_analytics))
        .fallback(not_found)
        .with_state(state)
}
