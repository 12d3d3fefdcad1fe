//! Voting form, vote submission and results handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use tracing::info;

use crate::handlers::parse_meeting_id;
use crate::services::{VoteFormView, VoteSubmission};
use crate::state::AppState;
use crate::utils::errors::{MeetPollError, Result};
use crate::views;

#[derive(Serialize)]
struct VotePage<'a> {
    #[serde(flatten)]
    view: &'a VoteFormView,
    name: &'a str,
    error: Option<&'a str>,
}

/// Split a vote form into the participant name and the per-option choice fields
pub fn vote_submission_from_pairs(pairs: Vec<(String, String)>) -> VoteSubmission {
    let mut submission = VoteSubmission::default();
    for (key, value) in pairs {
        if key == "name" {
            submission.name = value;
        } else {
            submission.choices.insert(key, value);
        }
    }
    submission
}

fn render_vote_page(state: &AppState, view: &VoteFormView, name: &str, error: Option<&str>) -> Result<Html<String>> {
    views::render(&state.templates, views::VOTE, &VotePage { view, name, error })
}

pub async fn vote_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let meeting_id = parse_meeting_id(&id)?;
    let view = state.meetings().vote_form(meeting_id).await?;

    render_vote_page(&state, &view, "", None)
}

pub async fn submit_vote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let meeting_id = parse_meeting_id(&id)?;
    let submission = vote_submission_from_pairs(pairs);

    match state.meetings().submit_vote(meeting_id, &submission).await {
        Ok(_) => Ok(Redirect::to(&format!("/meeting/{}/results/", meeting_id)).into_response()),
        Err(MeetPollError::InvalidInput(message)) => {
            info!(meeting_id = %meeting_id, reason = %message, "Vote rejected");
            let view = state.meetings().vote_form(meeting_id).await?;
            Ok(render_vote_page(&state, &view, submission.name.trim(), Some(&message))?.into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let meeting_id = parse_meeting_id(&id)?;
    let view = state.meetings().results(meeting_id).await?;

    views::render(&state.templates, views::RESULTS, &view)
}
