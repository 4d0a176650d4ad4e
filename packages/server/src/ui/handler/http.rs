//! HTTP API endpoint handlers.
//!
//! Detection failures never surface as error statuses: every endpoint
//! answers with a valid, possibly unchanged, snapshot.

use std::sync::Arc;

use axum::{Json, extract::State, response::Html};

use crate::{
    infrastructure::dto::http::{ForceCheckDto, HistoryDto, StatusDto, UsersDto},
    ui::state::AppState,
};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Status page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Run a confirmed update, then return the snapshot
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    state.update_status_usecase.execute().await;
    let snapshot = state.get_status_usecase.execute().await;
    Json(StatusDto::from_snapshot(snapshot, state.locale))
}

/// Get the full retained history
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<HistoryDto> {
    let history = state.get_history_usecase.execute().await;
    Json(HistoryDto::from_entries(&history, state.locale))
}

/// Commit a single detection immediately, then return the snapshot
pub async fn force_check(State(state): State<Arc<AppState>>) -> Json<ForceCheckDto> {
    state.force_check_usecase.execute().await;
    let snapshot = state.get_status_usecase.execute().await;
    Json(ForceCheckDto::from_snapshot(snapshot, state.locale))
}

/// Live user list, independent of the tracker state
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<UsersDto> {
    let users = state.list_remote_users_usecase.execute().await;
    Json(users.into())
}
