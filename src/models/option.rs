//! Candidate option models: time slots and locations

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::vote::VoteTarget;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub starts_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Location {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub name: String,
    pub position: i32,
}

impl TimeSlot {
    pub fn target(&self) -> VoteTarget {
        VoteTarget::TimeSlot(self.id)
    }
}

impl Location {
    pub fn target(&self) -> VoteTarget {
        VoteTarget::Location(self.id)
    }
}

/// Either kind of option a participant can vote on
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeetingOption {
    TimeSlot(TimeSlot),
    Location(Location),
}

impl MeetingOption {
    pub fn target(&self) -> VoteTarget {
        match self {
            MeetingOption::TimeSlot(slot) => slot.target(),
            MeetingOption::Location(location) => location.target(),
        }
    }
}
