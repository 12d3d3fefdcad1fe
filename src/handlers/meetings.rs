//! Meeting creation, confirmation and deletion handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde_json::json;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::handlers::parse_meeting_id;
use crate::services::CreateMeetingForm;
use crate::state::AppState;
use crate::utils::errors::{MeetPollError, Result};
use crate::views;

/// Collect the creation form, keeping every repeated `timeslots[]` and `locations[]` entry
pub fn create_form_from_pairs(pairs: Vec<(String, String)>) -> CreateMeetingForm {
    let mut form = CreateMeetingForm::default();
    for (key, value) in pairs {
        match key.as_str() {
            "name" => form.name = value,
            "description" => form.description = value,
            "timeslots[]" | "timeslots" => form.timeslots.push(value),
            "locations[]" | "locations" => form.locations.push(value),
            _ => {}
        }
    }
    form
}

/// Absolute link participants use to reach the voting form
pub fn share_url(public_url: &str, meeting_id: Uuid) -> Result<String> {
    let mut base = Url::parse(public_url)
        .map_err(|e| MeetPollError::Config(format!("Invalid public URL '{}': {}", public_url, e)))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let url = base
        .join(&format!("meeting/{}/", meeting_id))
        .map_err(|e| MeetPollError::Config(format!("Cannot build share link: {}", e)))?;
    Ok(url.to_string())
}

fn render_create(state: &AppState, form: &CreateMeetingForm, error: Option<&str>) -> Result<Html<String>> {
    views::render(&state.templates, views::CREATE, &json!({ "form": form, "error": error }))
}

pub async fn create_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_create(&state, &CreateMeetingForm::default(), None)
}

pub async fn create_meeting(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let form = create_form_from_pairs(pairs);
    debug!(
        timeslots = form.timeslots.len(),
        locations = form.locations.len(),
        "Meeting creation submitted"
    );

    match state.meetings().create_meeting(&form).await {
        Ok(details) => {
            let target = format!("/meeting/{}/success/", details.meeting.id);
            Ok(Redirect::to(&target).into_response())
        }
        Err(MeetPollError::InvalidInput(message)) => {
            info!(reason = %message, "Meeting creation rejected");
            Ok(render_create(&state, &form, Some(&message))?.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn meeting_success(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let meeting_id = parse_meeting_id(&id)?;
    let meeting = state.meetings().get_meeting(meeting_id).await?;
    let share_url = share_url(&state.settings.server.public_url, meeting.id)?;

    views::render(
        &state.templates,
        views::SUCCESS,
        &json!({ "meeting": meeting, "share_url": share_url }),
    )
}

pub async fn delete_meeting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let meeting_id = parse_meeting_id(&id)?;
    state.meetings().delete_meeting(meeting_id).await?;

    Ok(Redirect::to("/dashboard/"))
}
