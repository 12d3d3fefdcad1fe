//! Integration tests for voting and results

use axum::http::StatusCode;
use chrono_tz::Tz;
use serial_test::serial;
use MeetPoll::models::{Choice, MeetingOption};
use MeetPoll::services::MeetingService;

use crate::helpers::TestContext;

#[tokio::test]
#[serial]
async fn test_vote_redirects_to_results() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Standup", &["2025-06-01T10:00"], &["Office"]).await;
    let details = ctx.database.store.find_meeting_details(id).await.unwrap().unwrap();

    let response = ctx
        .vote(
            id,
            "  Alice  ",
            &[
                (details.time_slots[0].target().field_name(), "yes"),
                (details.locations[0].target().field_name(), "maybe"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some(format!("/meeting/{}/results/", id).as_str()));

    let participants = ctx.database.store.list_participants(id).await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].name, "Alice");
    assert_eq!(ctx.database.count_records("votes").await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_empty_name_changes_nothing() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Standup", &["2025-06-01T10:00"], &[]).await;
    let slots = ctx.database.store.list_time_slots(id).await.unwrap();

    let response = ctx.vote(id, "   ", &[(slots[0].target().field_name(), "yes")]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Please enter your name"));
    assert!(response.body.contains("Standup"));
    assert_eq!(ctx.database.count_records("participants").await.unwrap(), 0);
    assert_eq!(ctx.database.count_records("votes").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_overlong_participant_name_is_rejected() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Standup", &[], &["Office"]).await;

    let response = ctx.vote(id, &"a".repeat(101), &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Names must be at most 100 characters"));
    assert_eq!(ctx.database.count_records("participants").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_revote_overwrites_previous_choice() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Standup", &["2025-06-01T10:00"], &["Office"]).await;
    let details = ctx.database.store.find_meeting_details(id).await.unwrap().unwrap();
    let slot_field = details.time_slots[0].target().field_name();
    let place_field = details.locations[0].target().field_name();

    ctx.vote(id, "Alice", &[(slot_field.clone(), "yes"), (place_field.clone(), "no")]).await;
    // Second submission only touches the time slot
    ctx.vote(id, "Alice", &[(slot_field, "maybe")]).await;

    assert_eq!(ctx.database.count_records("participants").await.unwrap(), 1);
    assert_eq!(ctx.database.count_records("votes").await.unwrap(), 2);

    let votes = ctx.database.store.list_votes(id).await.unwrap();
    let slot_vote = votes.iter().find(|v| v.target == details.time_slots[0].target()).unwrap();
    let place_vote = votes.iter().find(|v| v.target == details.locations[0].target()).unwrap();
    assert_eq!(slot_vote.choice, Choice::Maybe);
    assert_eq!(place_vote.choice, Choice::No);
}

#[tokio::test]
#[serial]
async fn test_invalid_and_foreign_choices_are_ignored() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Mine", &["2025-06-01T10:00"], &[]).await;
    let other = ctx.create_meeting("Other", &["2025-06-02T10:00"], &[]).await;
    let mine = ctx.database.store.list_time_slots(id).await.unwrap();
    let theirs = ctx.database.store.list_time_slots(other).await.unwrap();

    let response = ctx
        .vote(
            id,
            "Alice",
            &[
                (mine[0].target().field_name(), "perhaps"),
                (theirs[0].target().field_name(), "yes"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(ctx.database.count_records("participants").await.unwrap(), 1);
    assert_eq!(ctx.database.count_records("votes").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_same_name_in_different_meetings() {
    let ctx = TestContext::new().await;
    let first = ctx.create_meeting("First", &[], &["Office"]).await;
    let second = ctx.create_meeting("Second", &[], &["Office"]).await;

    ctx.vote(first, "Alice", &[]).await;
    ctx.vote(second, "Alice", &[]).await;
    ctx.vote(first, "Alice", &[]).await;

    assert_eq!(ctx.database.count_records("participants").await.unwrap(), 2);
    assert_eq!(ctx.database.store.count_participants(first).await.unwrap(), 1);
    assert_eq!(ctx.database.store.count_participants(second).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_results_pick_best_option() {
    let ctx = TestContext::new().await;
    let id = ctx
        .create_meeting("Offsite", &["2025-06-01T10:00", "2025-06-02T15:30"], &["Office"])
        .await;
    let details = ctx.database.store.find_meeting_details(id).await.unwrap().unwrap();
    let first = details.time_slots[0].target().field_name();
    let second = details.time_slots[1].target().field_name();

    ctx.vote(id, "Alice", &[(first.clone(), "yes"), (second.clone(), "yes")]).await;
    ctx.vote(id, "Bob", &[(first.clone(), "yes"), (second.clone(), "yes")]).await;
    ctx.vote(id, "Carol", &[(first, "no"), (second, "yes")]).await;

    let service = MeetingService::with_timezone(ctx.database.store.clone(), Tz::UTC);
    let view = service.results(id).await.unwrap();

    let best = view.best_option.expect("meeting has options");
    assert_eq!(best.option, MeetingOption::TimeSlot(details.time_slots[1].clone()));
    assert_eq!(best.tally.yes, 3);
    assert_eq!(best.label, "Mon, 02 Jun 2025, 15:30");

    assert_eq!(view.participants.len(), 3);
    assert_eq!(view.time_slots[0].tally.yes, 2);
    assert_eq!(view.time_slots[0].tally.no, 1);
    let carol = view.time_slots[0].votes.iter().find(|cell| cell.name == "Carol").unwrap();
    assert_eq!(carol.choice, Some(Choice::No));
    let office = &view.locations[0];
    assert_eq!(office.tally.total(), 0);
    assert!(office.votes.iter().all(|cell| cell.choice.is_none()));

    let page = ctx.get(&format!("/meeting/{}/results/", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("id=\"best-option\""));
    assert!(page.body.contains("Mon, 02 Jun 2025, 15:30"));
    assert!(page.body.contains("Carol"));
}

#[tokio::test]
#[serial]
async fn test_results_tie_goes_to_time_slot() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Tie", &["2025-06-01T10:00"], &["Office"]).await;
    let details = ctx.database.store.find_meeting_details(id).await.unwrap().unwrap();

    ctx.vote(
        id,
        "Alice",
        &[
            (details.time_slots[0].target().field_name(), "yes"),
            (details.locations[0].target().field_name(), "yes"),
        ],
    )
    .await;

    let service = MeetingService::with_timezone(ctx.database.store.clone(), Tz::UTC);
    let best = service.results(id).await.unwrap().best_option.unwrap();
    assert_eq!(best.option, MeetingOption::TimeSlot(details.time_slots[0].clone()));
}

#[tokio::test]
#[serial]
async fn test_results_without_options_have_no_best_option() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Empty", &[], &[]).await;
    ctx.vote(id, "Alice", &[]).await;

    let service = MeetingService::with_timezone(ctx.database.store.clone(), Tz::UTC);
    let view = service.results(id).await.unwrap();
    assert!(view.best_option.is_none());
    assert_eq!(view.participants.len(), 1);

    let page = ctx.get(&format!("/meeting/{}/results/", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("id=\"best-option\""));
}

#[tokio::test]
#[serial]
async fn test_vote_form_shows_current_tallies() {
    let ctx = TestContext::new().await;
    let id = ctx.create_meeting("Tallies", &["2025-06-01T10:00"], &[]).await;
    let slots = ctx.database.store.list_time_slots(id).await.unwrap();
    let field = slots[0].target().field_name();

    ctx.vote(id, "Alice", &[(field.clone(), "yes")]).await;
    ctx.vote(id, "Bob", &[(field.clone(), "yes")]).await;
    ctx.vote(id, "Carol", &[(field.clone(), "maybe")]).await;

    let page = ctx.get(&format!("/meeting/{}/", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("2 yes · 1 maybe · 0 no"));
    assert!(page.body.contains(&format!("name=\"{}\"", field)));
    assert!(page.body.contains("3 participants so far"));
}
