//! Test data helpers for building form submissions and store inputs

use chrono::{TimeZone, Utc};
use MeetPoll::models::NewMeeting;

/// Body for `POST /create/`, with repeated `timeslots[]` and `locations[]` fields
pub fn create_meeting_body(name: &str, description: &str, timeslots: &[&str], locations: &[&str]) -> String {
    let mut fields: Vec<(&str, &str)> = vec![("name", name), ("description", description)];
    fields.extend(timeslots.iter().map(|value| ("timeslots[]", *value)));
    fields.extend(locations.iter().map(|value| ("locations[]", *value)));
    serde_urlencoded::to_string(&fields).expect("Failed to encode form")
}

/// Body for `POST /meeting/{id}/vote/`
pub fn vote_body(name: &str, choices: &[(String, &str)]) -> String {
    let mut fields: Vec<(&str, &str)> = vec![("name", name)];
    fields.extend(choices.iter().map(|(field, choice)| (field.as_str(), *choice)));
    serde_urlencoded::to_string(&fields).expect("Failed to encode form")
}

/// A meeting with two time slots and two locations
pub fn sample_new_meeting(name: &str) -> NewMeeting {
    NewMeeting {
        name: name.to_string(),
        description: "Quarterly planning".to_string(),
        time_slots: vec![
            Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap(),
        ],
        locations: vec!["Main office".to_string(), "Cafe".to_string()],
    }
}
