//! Participant model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Upper bound on participant display names
pub const MAX_PARTICIPANT_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
