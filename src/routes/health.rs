use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;
use tracing::error;

use crate::error::AppResult;
use crate::state::AppState;
use crate::store;

/// Liveness probe for process orchestration: checks that a connection can be
/// checked out and the database answers a trivial query.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match probe(&state) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(err) => {
            error!(error = %err.message(), "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "unhealthy", "error": err.message() })),
            )
        }
    }
}

fn probe(state: &AppState) -> AppResult<()> {
    let mut conn = state.db()?;
    store::connectivity_probe(&mut conn)?;
    Ok(())
}
