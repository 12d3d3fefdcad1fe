//! Landing page and dashboard

use std::sync::Arc;

use axum::{extract::State, response::Html};
use serde_json::json;
use tracing::debug;

use crate::state::AppState;
use crate::utils::errors::Result;
use crate::views;

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    views::render_static(&state.templates, views::HOME)
}

/// All meetings, newest first
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let meetings = state.meetings().list_meetings().await?;
    debug!(count = meetings.len(), "Rendering dashboard");

    views::render(&state.templates, views::DASHBOARD, &json!({ "meetings": meetings }))
}
