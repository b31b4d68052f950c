use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod dashboard;
pub mod health;
pub mod search;
pub mod woo;

pub fn create_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/health", get(health::health_check))
        .route("/search", get(search::search_page))
        .route("/api/search", post(search::search_emails))
        .route("/woo", get(woo::woo_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
