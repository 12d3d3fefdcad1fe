//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod meeting;
pub mod option;
pub mod participant;
pub mod vote;

// Re-export commonly used models
pub use meeting::{Meeting, MeetingSummary, MeetingDetails, NewMeeting};
pub use option::{TimeSlot, Location, MeetingOption};
pub use participant::Participant;
pub use vote::{Vote, VoteRow, VoteTarget, Choice};
