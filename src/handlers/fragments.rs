//! Stateless form-field fragments requested by the creation form

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::state::AppState;
use crate::utils::errors::Result;
use crate::views;

pub async fn add_timeslot_field(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    views::render_static(&state.templates, views::TIMESLOT_FIELD)
}

pub async fn add_location_field(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    views::render_static(&state.templates, views::LOCATION_FIELD)
}
