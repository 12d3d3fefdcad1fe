//! HTTP handlers module
//!
//! This module contains all request handlers organized by area:
//! - Page handlers for the landing page and dashboard
//! - Meeting handlers for creation, confirmation and deletion
//! - Vote handlers for the voting form, submission and results
//! - Fragment handlers for the dynamic form fields
//! - Health check

pub mod fragments;
pub mod health;
pub mod meetings;
pub mod pages;
pub mod router;
pub mod votes;

pub use router::create_router;

use uuid::Uuid;

use crate::utils::errors::{MeetPollError, Result};

/// Parse a meeting id from the path; anything malformed is simply not found
pub(crate) fn parse_meeting_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| MeetPollError::MeetingNotFound {
        meeting_id: raw.to_string(),
    })
}
