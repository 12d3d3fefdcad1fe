//! PostgreSQL meeting store

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::MeetingStore;
use crate::models::{
    Choice, Location, Meeting, MeetingDetails, MeetingSummary, NewMeeting, Participant, TimeSlot,
    Vote, VoteRow, VoteTarget,
};
use crate::utils::errors::{MeetPollError, Result};
use crate::utils::logging::log_database_operation;

#[derive(Clone, Debug)]
pub struct PostgresMeetingStore {
    pool: PgPool,
}

impl PostgresMeetingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the meeting and its options in one transaction
    async fn insert_meeting(&self, new_meeting: NewMeeting) -> Result<MeetingDetails> {
        let mut tx = self.pool.begin().await?;

        let meeting = sqlx::query_as::<_, Meeting>(
            r#"
            INSERT INTO meetings (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&new_meeting.name)
        .bind(&new_meeting.description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let mut time_slots = Vec::with_capacity(new_meeting.time_slots.len());
        for starts_at in &new_meeting.time_slots {
            let slot = sqlx::query_as::<_, TimeSlot>(
                "INSERT INTO time_slots (id, meeting_id, starts_at) VALUES ($1, $2, $3) RETURNING id, meeting_id, starts_at"
            )
            .bind(Uuid::new_v4())
            .bind(meeting.id)
            .bind(starts_at)
            .fetch_one(&mut *tx)
            .await?;
            time_slots.push(slot);
        }

        let mut locations = Vec::with_capacity(new_meeting.locations.len());
        for (position, name) in new_meeting.locations.iter().enumerate() {
            let location = sqlx::query_as::<_, Location>(
                "INSERT INTO locations (id, meeting_id, name, position) VALUES ($1, $2, $3, $4) RETURNING id, meeting_id, name, position"
            )
            .bind(Uuid::new_v4())
            .bind(meeting.id)
            .bind(name)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;
            locations.push(location);
        }

        tx.commit().await?;

        time_slots.sort_by_key(|slot| slot.starts_at);

        Ok(MeetingDetails {
            meeting,
            time_slots,
            locations,
        })
    }

    async fn remove_meeting(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MeetingStore for PostgresMeetingStore {
    async fn create_meeting(&self, new_meeting: NewMeeting) -> Result<MeetingDetails> {
        let started = Instant::now();
        let result = self.insert_meeting(new_meeting).await;
        log_database_operation("create_meeting", "meetings", started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn find_meeting(&self, id: Uuid) -> Result<Option<Meeting>> {
        let meeting = sqlx::query_as::<_, Meeting>(
            "SELECT id, name, description, created_at FROM meetings WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meeting)
    }

    async fn list_meetings(&self) -> Result<Vec<MeetingSummary>> {
        let meetings = sqlx::query_as::<_, MeetingSummary>(
            r#"
            SELECT m.id, m.name, m.description, m.created_at,
                   (SELECT COUNT(*) FROM participants p WHERE p.meeting_id = m.id) AS participant_count
            FROM meetings m
            ORDER BY m.created_at DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(meetings)
    }

    async fn delete_meeting(&self, id: Uuid) -> Result<bool> {
        let started = Instant::now();
        let result = self.remove_meeting(id).await;
        log_database_operation("delete_meeting", "meetings", started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn list_time_slots(&self, meeting_id: Uuid) -> Result<Vec<TimeSlot>> {
        let slots = sqlx::query_as::<_, TimeSlot>(
            "SELECT id, meeting_id, starts_at FROM time_slots WHERE meeting_id = $1 ORDER BY starts_at ASC, id ASC"
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn list_locations(&self, meeting_id: Uuid) -> Result<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, meeting_id, name, position FROM locations WHERE meeting_id = $1 ORDER BY position ASC"
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn list_participants(&self, meeting_id: Uuid) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, meeting_id, name, created_at FROM participants WHERE meeting_id = $1 ORDER BY created_at ASC, name ASC"
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    async fn count_participants(&self, meeting_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants WHERE meeting_id = $1")
            .bind(meeting_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn find_participant(&self, meeting_id: Uuid, name: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, meeting_id, name, created_at FROM participants WHERE meeting_id = $1 AND name = $2"
        )
        .bind(meeting_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    async fn create_participant(&self, meeting_id: Uuid, name: &str) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (id, meeting_id, name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, meeting_id, name, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(meeting_id)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MeetPollError::from_store(e, &format!("participant '{}' already exists in this meeting", name)))
    }

    async fn upsert_vote(&self, participant_id: Uuid, target: VoteTarget, choice: Choice) -> Result<Vote> {
        let sql = match target {
            VoteTarget::TimeSlot(_) => {
                r#"
                INSERT INTO votes (id, participant_id, time_slot_id, location_id, choice)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (participant_id, time_slot_id) DO UPDATE SET choice = EXCLUDED.choice
                RETURNING id, participant_id, time_slot_id, location_id, choice
                "#
            }
            VoteTarget::Location(_) => {
                r#"
                INSERT INTO votes (id, participant_id, time_slot_id, location_id, choice)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (participant_id, location_id) DO UPDATE SET choice = EXCLUDED.choice
                RETURNING id, participant_id, time_slot_id, location_id, choice
                "#
            }
        };
        let (time_slot_id, location_id) = target.as_columns();

        let row = sqlx::query_as::<_, VoteRow>(sql)
            .bind(Uuid::new_v4())
            .bind(participant_id)
            .bind(time_slot_id)
            .bind(location_id)
            .bind(choice.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| MeetPollError::from_store(e, "vote"))?;

        Vote::try_from(row)
    }

    async fn list_votes(&self, meeting_id: Uuid) -> Result<Vec<Vote>> {
        let rows = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT v.id, v.participant_id, v.time_slot_id, v.location_id, v.choice
            FROM votes v
            INNER JOIN participants p ON p.id = v.participant_id
            WHERE p.meeting_id = $1
            "#
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vote::try_from).collect()
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
