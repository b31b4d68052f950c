use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::error::AppResult;
use crate::pages;
use crate::state::AppState;
use crate::store;

const RECENT_WOO_LIMIT: i64 = 5;

pub async fn dashboard(State(state): State<AppState>) -> Response {
    match render(&state) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(error = %err.message(), "dashboard error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Dashboard tijdelijk niet beschikbaar: {}", err.message()),
            )
                .into_response()
        }
    }
}

fn render(state: &AppState) -> AppResult<String> {
    let mut conn = state.db()?;
    let stats = store::dashboard_stats(&mut conn)?;
    let recent = store::recent_woo_requests(&mut conn, RECENT_WOO_LIMIT)?;
    Ok(pages::dashboard_page(&stats, &recent))
}
