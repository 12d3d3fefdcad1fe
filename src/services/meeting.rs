//! Meeting service implementation
//!
//! This service handles meeting creation and deletion, vote submission and
//! assembling the data shown on the voting and results pages.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::MeetingsConfig;
use crate::database::MeetingStore;
use crate::models::meeting::MAX_NAME_LENGTH;
use crate::models::participant::MAX_PARTICIPANT_NAME_LENGTH;
use crate::models::{
    Choice, Location, Meeting, MeetingDetails, MeetingOption, MeetingSummary, NewMeeting,
    Participant, TimeSlot, VoteTarget,
};
use crate::services::aggregation::{
    best_option, participant_matrix, tallies_by_target, ParticipantChoice, Tally, VoteIndex,
};
use crate::utils::errors::{MeetPollError, Result};
use crate::utils::helpers::{format_time_slot, non_blank, parse_datetime_input};
use crate::utils::logging::{log_meeting_action, log_vote_submission};

/// Raw meeting creation form
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMeetingForm {
    pub name: String,
    pub description: String,
    pub timeslots: Vec<String>,
    pub locations: Vec<String>,
}

/// Raw vote submission: participant name plus choice fields keyed by field name
#[derive(Debug, Clone, Default)]
pub struct VoteSubmission {
    pub name: String,
    pub choices: HashMap<String, String>,
}

impl VoteSubmission {
    /// The submitted choice for an option, if present and valid
    pub fn choice_for(&self, target: VoteTarget) -> Option<Choice> {
        self.choices
            .get(&target.field_name())
            .and_then(|value| value.parse::<Choice>().ok())
    }
}

/// One option as shown on the voting and results pages
#[derive(Debug, Clone, Serialize)]
pub struct OptionSummary {
    pub option: MeetingOption,
    pub label: String,
    pub field_name: String,
    pub tally: Tally,
    /// Per-participant choices; only filled in for results
    pub votes: Vec<ParticipantChoice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestOptionSummary {
    pub option: MeetingOption,
    pub label: String,
    pub tally: Tally,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteFormView {
    pub meeting: Meeting,
    pub time_slots: Vec<OptionSummary>,
    pub locations: Vec<OptionSummary>,
    pub participant_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub meeting: Meeting,
    pub time_slots: Vec<OptionSummary>,
    pub locations: Vec<OptionSummary>,
    pub participants: Vec<Participant>,
    pub best_option: Option<BestOptionSummary>,
}

/// Outcome of a successful vote submission
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    pub participant: Participant,
    pub created_participant: bool,
    pub votes_recorded: usize,
}

/// Meeting service for all meeting and voting operations
#[derive(Clone)]
pub struct MeetingService {
    store: Arc<dyn MeetingStore>,
    default_tz: Tz,
}

impl fmt::Debug for MeetingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeetingService")
            .field("backend", &self.store.backend())
            .field("default_tz", &self.default_tz)
            .finish_non_exhaustive()
    }
}

impl MeetingService {
    /// Create a new MeetingService using the configured default time zone
    pub fn new(store: Arc<dyn MeetingStore>, config: &MeetingsConfig) -> Result<Self> {
        let default_tz = config
            .default_timezone
            .parse::<Tz>()
            .map_err(|_| MeetPollError::Config(format!("Unknown time zone: {}", config.default_timezone)))?;

        Ok(Self::with_timezone(store, default_tz))
    }

    pub fn with_timezone(store: Arc<dyn MeetingStore>, default_tz: Tz) -> Self {
        Self { store, default_tz }
    }

    /// All meetings, most recently created first
    pub async fn list_meetings(&self) -> Result<Vec<MeetingSummary>> {
        self.store.list_meetings().await
    }

    /// Get a meeting or fail with `MeetingNotFound`
    pub async fn get_meeting(&self, id: Uuid) -> Result<Meeting> {
        self.store
            .find_meeting(id)
            .await?
            .ok_or_else(|| MeetPollError::MeetingNotFound { meeting_id: id.to_string() })
    }

    /// Validate a creation form and turn it into a `NewMeeting`.
    ///
    /// Blank or unparseable date-times and blank locations are skipped; a
    /// missing or overlong name, or an overlong location, is rejected.
    pub fn prepare_meeting(&self, form: &CreateMeetingForm) -> Result<NewMeeting> {
        let name = non_blank(Some(&form.name))
            .ok_or_else(|| MeetPollError::InvalidInput("Meeting name is required".to_string()))?;
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(MeetPollError::InvalidInput(format!(
                "Meeting name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        let mut time_slots = Vec::new();
        for raw in &form.timeslots {
            if raw.trim().is_empty() {
                continue;
            }
            match parse_datetime_input(raw, self.default_tz) {
                Some(starts_at) => time_slots.push(starts_at),
                None => debug!(input = %raw, "Skipping unparseable time slot"),
            }
        }

        let mut locations = Vec::new();
        for raw in &form.locations {
            let Some(location) = non_blank(Some(raw)) else {
                continue;
            };
            if location.chars().count() > MAX_NAME_LENGTH {
                return Err(MeetPollError::InvalidInput(format!(
                    "Location names must be at most {} characters",
                    MAX_NAME_LENGTH
                )));
            }
            locations.push(location);
        }

        Ok(NewMeeting {
            name,
            description: form.description.trim().to_string(),
            time_slots,
            locations,
        })
    }

    /// Create a meeting with its time slots and locations
    pub async fn create_meeting(&self, form: &CreateMeetingForm) -> Result<MeetingDetails> {
        let new_meeting = self.prepare_meeting(form)?;
        let details = self.store.create_meeting(new_meeting).await?;

        log_meeting_action(
            details.meeting.id,
            "created",
            Some(&format!(
                "{} time slots, {} locations",
                details.time_slots.len(),
                details.locations.len()
            )),
        );

        Ok(details)
    }

    /// Delete a meeting and everything it owns
    pub async fn delete_meeting(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_meeting(id).await? {
            warn!(meeting_id = %id, "Attempted to delete unknown meeting");
            return Err(MeetPollError::MeetingNotFound { meeting_id: id.to_string() });
        }

        log_meeting_action(id, "deleted", None);
        Ok(())
    }

    /// Data for the voting form: every option with its current tally
    pub async fn vote_form(&self, id: Uuid) -> Result<VoteFormView> {
        let details = self.load_details(id).await?;
        let votes = self.store.list_votes(id).await?;
        let participant_count = self.store.count_participants(id).await?;
        let tallies = tallies_by_target(&votes);

        let time_slots = details
            .time_slots
            .iter()
            .map(|slot| self.summarize_time_slot(slot, tallies.get(&slot.target()).copied(), Vec::new()))
            .collect();
        let locations = details
            .locations
            .iter()
            .map(|location| summarize_location(location, tallies.get(&location.target()).copied(), Vec::new()))
            .collect();

        Ok(VoteFormView {
            meeting: details.meeting,
            time_slots,
            locations,
            participant_count,
        })
    }

    /// Record a participant's choices.
    ///
    /// The participant is looked up by name within the meeting and created on
    /// first vote. Options without a valid submitted choice are left as they are.
    pub async fn submit_vote(&self, id: Uuid, submission: &VoteSubmission) -> Result<VoteReceipt> {
        let details = self.load_details(id).await?;

        let name = non_blank(Some(&submission.name))
            .ok_or_else(|| MeetPollError::InvalidInput("Please enter your name".to_string()))?;
        if name.chars().count() > MAX_PARTICIPANT_NAME_LENGTH {
            return Err(MeetPollError::InvalidInput(format!(
                "Names must be at most {} characters",
                MAX_PARTICIPANT_NAME_LENGTH
            )));
        }

        let (participant, created_participant) = self.get_or_create_participant(id, &name).await?;

        let targets = details
            .time_slots
            .iter()
            .map(TimeSlot::target)
            .chain(details.locations.iter().map(Location::target));

        let mut votes_recorded = 0;
        for target in targets {
            if let Some(choice) = submission.choice_for(target) {
                self.store.upsert_vote(participant.id, target, choice).await?;
                votes_recorded += 1;
            }
        }

        log_vote_submission(id, participant.id, created_participant, votes_recorded);

        Ok(VoteReceipt {
            participant,
            created_participant,
            votes_recorded,
        })
    }

    /// Aggregated results: tallies, the participant matrix and the best option
    pub async fn results(&self, id: Uuid) -> Result<ResultsView> {
        let details = self.load_details(id).await?;
        let participants = self.store.list_participants(id).await?;
        let votes = self.store.list_votes(id).await?;

        let tallies = tallies_by_target(&votes);
        let index = VoteIndex::new(&votes);

        let time_slots = details
            .time_slots
            .iter()
            .map(|slot| {
                let matrix = participant_matrix(&participants, slot.target(), &index);
                self.summarize_time_slot(slot, tallies.get(&slot.target()).copied(), matrix)
            })
            .collect();
        let locations = details
            .locations
            .iter()
            .map(|location| {
                let matrix = participant_matrix(&participants, location.target(), &index);
                summarize_location(location, tallies.get(&location.target()).copied(), matrix)
            })
            .collect();

        let best_option = best_option(&details.time_slots, &details.locations, &votes).map(|best| {
            BestOptionSummary {
                label: self.option_label(&best.option),
                option: best.option,
                tally: best.tally,
            }
        });

        Ok(ResultsView {
            meeting: details.meeting,
            time_slots,
            locations,
            participants,
            best_option,
        })
    }

    async fn load_details(&self, id: Uuid) -> Result<MeetingDetails> {
        self.store
            .find_meeting_details(id)
            .await?
            .ok_or_else(|| MeetPollError::MeetingNotFound { meeting_id: id.to_string() })
    }

    async fn get_or_create_participant(&self, meeting_id: Uuid, name: &str) -> Result<(Participant, bool)> {
        if let Some(existing) = self.store.find_participant(meeting_id, name).await? {
            return Ok((existing, false));
        }

        match self.store.create_participant(meeting_id, name).await {
            Ok(participant) => {
                info!(meeting_id = %meeting_id, participant_id = %participant.id, "New participant joined");
                Ok((participant, true))
            }
            // Lost a race with a concurrent first vote under the same name
            Err(MeetPollError::DuplicateKey(what)) => self
                .store
                .find_participant(meeting_id, name)
                .await?
                .map(|participant| (participant, false))
                .ok_or(MeetPollError::DuplicateKey(what)),
            Err(e) => Err(e),
        }
    }

    fn option_label(&self, option: &MeetingOption) -> String {
        match option {
            MeetingOption::TimeSlot(slot) => format_time_slot(slot.starts_at, self.default_tz),
            MeetingOption::Location(location) => location.name.clone(),
        }
    }

    fn summarize_time_slot(&self, slot: &TimeSlot, tally: Option<Tally>, votes: Vec<ParticipantChoice>) -> OptionSummary {
        OptionSummary {
            option: MeetingOption::TimeSlot(slot.clone()),
            label: format_time_slot(slot.starts_at, self.default_tz),
            field_name: slot.target().field_name(),
            tally: tally.unwrap_or_default(),
            votes,
        }
    }
}

fn summarize_location(location: &Location, tally: Option<Tally>, votes: Vec<ParticipantChoice>) -> OptionSummary {
    OptionSummary {
        option: MeetingOption::Location(location.clone()),
        label: location.name.clone(),
        field_name: location.target().field_name(),
        tally: tally.unwrap_or_default(),
        votes,
    }
}
