//! Meeting model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::option::{Location, TimeSlot};

/// Upper bound on meeting and location names
pub const MAX_NAME_LENGTH: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Meeting {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Dashboard row: a meeting together with how many people have voted
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeetingSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub participant_count: i64,
}

/// Everything needed to create a meeting in one store call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeeting {
    pub name: String,
    pub description: String,
    pub time_slots: Vec<DateTime<Utc>>,
    pub locations: Vec<String>,
}

/// A meeting with its candidate options in listing order
#[derive(Debug, Clone, Serialize)]
pub struct MeetingDetails {
    pub meeting: Meeting,
    pub time_slots: Vec<TimeSlot>,
    pub locations: Vec<Location>,
}

impl MeetingDetails {
    pub fn has_options(&self) -> bool {
        !self.time_slots.is_empty() || !self.locations.is_empty()
    }
}
