use axum::extract::{Json, State};
use axum::response::Html;
use serde::Serialize;
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::pages;
use crate::search::SearchFilters;
use crate::state::AppState;
use crate::store::{self, EmailSearchRow};

pub async fn search_page() -> Html<String> {
    Html(pages::search_page())
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<EmailSearchRow>,
    pub total: usize,
}

pub async fn search_emails(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> AppResult<Json<SearchResponse>> {
    let mut conn = state.db()?;
    let outcome = store::search_emails(&mut conn, &filters).map_err(|err| {
        error!(error = %err, "email search failed");
        AppError::from(err)
    })?;

    Ok(Json(SearchResponse {
        results: outcome.results,
        total: outcome.total,
    }))
}
