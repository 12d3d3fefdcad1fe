//! Test helpers module
//!
//! This module provides utilities and helpers for testing the MeetPoll application.
//! It includes an in-memory database, the HTTP test client, and test data builders.

pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;
