use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use crate::error::AppResult;
use crate::pages;
use crate::state::AppState;
use crate::store;

pub async fn woo_dashboard(State(state): State<AppState>) -> Response {
    match render(&state) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(error = %err.message(), "WOO dashboard error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("WOO dashboard tijdelijk niet beschikbaar: {}", err.message()),
            )
                .into_response()
        }
    }
}

fn render(state: &AppState) -> AppResult<String> {
    let mut conn = state.db()?;
    let requests = store::woo_requests_with_match_counts(&mut conn)?;
    Ok(pages::woo_page(&requests))
}
