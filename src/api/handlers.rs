use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{MovieDetail, Notification, SearchState};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SubmitSearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePageRequest {
    pub page: u32,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current search state snapshot
pub async fn get_search(State(state): State<AppState>) -> Json<SearchState> {
    Json(state.controller.snapshot())
}

/// Submit a new search query
///
/// Waits for the fetch to settle. Fetch failures are reported through the
/// snapshot's `status`, not as an HTTP error.
pub async fn submit_search(
    State(state): State<AppState>,
    Json(request): Json<SubmitSearchRequest>,
) -> AppResult<Json<SearchState>> {
    state
        .controller
        .submit_query(&request.query)?
        .settled()
        .await?;
    Ok(Json(state.controller.snapshot()))
}

/// Move to another page of the current query
pub async fn change_page(
    State(state): State<AppState>,
    Json(request): Json<ChangePageRequest>,
) -> AppResult<Json<SearchState>> {
    state.controller.change_page(request.page)?.settled().await?;
    Ok(Json(state.controller.snapshot()))
}

/// Re-issue the fetch for the current query and page
pub async fn retry_search(State(state): State<AppState>) -> AppResult<Json<SearchState>> {
    state.controller.retry()?.settled().await?;
    Ok(Json(state.controller.snapshot()))
}

/// Open the detail view for a movie in the current results
pub async fn select_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<MovieDetail>> {
    let detail = state.controller.select_movie(movie_id)?;
    Ok(Json(detail))
}

/// Currently open detail view, if any
pub async fn get_selection(State(state): State<AppState>) -> Json<Option<MovieDetail>> {
    Json(state.controller.selection())
}

/// Close the detail view
pub async fn close_selection(State(state): State<AppState>) -> StatusCode {
    state.controller.close_detail();
    StatusCode::NO_CONTENT
}

/// Drain pending notifications
pub async fn get_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    let mut receiver = state.notifications.lock().await;
    let mut pending = Vec::new();
    while let Ok(notification) = receiver.try_recv() {
        pending.push(notification);
    }
    Json(pending)
}
