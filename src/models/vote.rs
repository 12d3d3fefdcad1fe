//! Vote model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::MeetPollError;

/// A participant's stance on one option
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
    Maybe,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Yes, Choice::No, Choice::Maybe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Yes => "yes",
            Choice::No => "no",
            Choice::Maybe => "maybe",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = MeetPollError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "yes" => Ok(Choice::Yes),
            "no" => Ok(Choice::No),
            "maybe" => Ok(Choice::Maybe),
            other => Err(MeetPollError::InvalidInput(format!("Unknown choice: {}", other))),
        }
    }
}

/// The single option a vote refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum VoteTarget {
    TimeSlot(Uuid),
    Location(Uuid),
}

impl VoteTarget {
    /// Name of the form field carrying a choice for this option
    pub fn field_name(&self) -> String {
        match self {
            VoteTarget::TimeSlot(id) => format!("timeslot_{}", id),
            VoteTarget::Location(id) => format!("location_{}", id),
        }
    }

    /// Split into the (time slot, location) foreign key pair stored in SQL
    pub fn as_columns(&self) -> (Option<Uuid>, Option<Uuid>) {
        match *self {
            VoteTarget::TimeSlot(id) => (Some(id), None),
            VoteTarget::Location(id) => (None, Some(id)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Vote {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub target: VoteTarget,
    pub choice: Choice,
}

/// Vote as stored: two nullable foreign keys and a text choice
#[derive(Debug, Clone, FromRow)]
pub struct VoteRow {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub time_slot_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub choice: String,
}

impl TryFrom<VoteRow> for Vote {
    type Error = MeetPollError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        let target = match (row.time_slot_id, row.location_id) {
            (Some(slot), None) => VoteTarget::TimeSlot(slot),
            (None, Some(location)) => VoteTarget::Location(location),
            _ => {
                return Err(MeetPollError::CorruptRecord(format!(
                    "Vote {} must reference exactly one option",
                    row.id
                )))
            }
        };

        Ok(Vote {
            id: row.id,
            participant_id: row.participant_id,
            target,
            choice: row.choice.parse().map_err(|_| {
                MeetPollError::CorruptRecord(format!("Vote {} has unknown choice '{}'", row.id, row.choice))
            })?,
        })
    }
}
