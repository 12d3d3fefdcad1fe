//! Data access contract shared by the PostgreSQL and SQLite backends

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Choice, Location, Meeting, MeetingDetails, MeetingSummary, NewMeeting, Participant, TimeSlot,
    Vote, VoteTarget,
};
use crate::utils::errors::Result;

/// Persistent storage for meetings and everything they own.
///
/// Deleting a meeting cascades to its time slots, locations, participants and
/// votes. Unique constraint violations surface as `MeetPollError::DuplicateKey`.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Insert a meeting together with its options in one transaction
    async fn create_meeting(&self, new_meeting: NewMeeting) -> Result<MeetingDetails>;

    async fn find_meeting(&self, id: Uuid) -> Result<Option<Meeting>>;

    /// All meetings with participant counts, most recently created first
    async fn list_meetings(&self) -> Result<Vec<MeetingSummary>>;

    /// Returns `false` when no meeting had that id
    async fn delete_meeting(&self, id: Uuid) -> Result<bool>;

    /// Time slots ordered by date-time ascending
    async fn list_time_slots(&self, meeting_id: Uuid) -> Result<Vec<TimeSlot>>;

    /// Locations in the order they were submitted
    async fn list_locations(&self, meeting_id: Uuid) -> Result<Vec<Location>>;

    /// Participants in the order they first voted
    async fn list_participants(&self, meeting_id: Uuid) -> Result<Vec<Participant>>;

    async fn count_participants(&self, meeting_id: Uuid) -> Result<i64>;

    async fn find_participant(&self, meeting_id: Uuid, name: &str) -> Result<Option<Participant>>;

    /// Fails with `DuplicateKey` when the name is already taken within the meeting
    async fn create_participant(&self, meeting_id: Uuid, name: &str) -> Result<Participant>;

    /// Insert or overwrite the participant's vote for one option
    async fn upsert_vote(&self, participant_id: Uuid, target: VoteTarget, choice: Choice) -> Result<Vote>;

    /// Every vote cast by the meeting's participants
    async fn list_votes(&self, meeting_id: Uuid) -> Result<Vec<Vote>>;

    async fn health_check(&self) -> Result<()>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Load a meeting with its ordered options
    async fn find_meeting_details(&self, id: Uuid) -> Result<Option<MeetingDetails>> {
        let Some(meeting) = self.find_meeting(id).await? else {
            return Ok(None);
        };
        let time_slots = self.list_time_slots(id).await?;
        let locations = self.list_locations(id).await?;

        Ok(Some(MeetingDetails {
            meeting,
            time_slots,
            locations,
        }))
    }
}
