//! Book search endpoints

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::types::ApiError;
use crate::domain::{BookSearchService, QuickFilter, SearchResults};

#[derive(Clone)]
pub struct BooksApiState {
    pub search: Arc<BookSearchService>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QuickFilterInfo {
    pub name: QuickFilter,
    pub title: &'static str,
    pub query: &'static str,
}

pub fn routes(search: Arc<BookSearchService>) -> Router<()> {
    let state = BooksApiState { search };

    Router::new()
        .route("/search", post(search_books))
        .route("/quick", get(list_quick_filters))
        .route("/quick/{name}", get(run_quick_filter))
        .with_state(state)
}

pub async fn search_books(
    State(state): State<BooksApiState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Json(request) = body?;
    let results = state.search.search(&request.query).await?;
    Ok(Json(results))
}

pub async fn list_quick_filters() -> Json<Vec<QuickFilterInfo>> {
    Json(
        QuickFilter::ALL
            .into_iter()
            .map(|filter| QuickFilterInfo {
                name: filter,
                title: filter.title(),
                query: filter.query(),
            })
            .collect(),
    )
}

pub async fn run_quick_filter(
    State(state): State<BooksApiState>,
    Path(name): Path<String>,
) -> Result<Json<SearchResults>, ApiError> {
    let filter: QuickFilter = name
        .parse()
        .map_err(|e: String| ApiError::not_found("QUICK_FILTER_NOT_FOUND", e))?;
    let results = state.search.quick(filter).await?;
    Ok(Json(results))
}
