//! MeetPoll
//!
//! A small web application for agreeing on when and where to meet.
//! An organizer proposes time slots and locations, participants answer
//! yes/no/maybe for each option, and the results page tallies the answers
//! and highlights the option with the most "yes" votes.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MeetPollError, Result};

// Re-export main components for easy access
pub use database::{connect_store, MeetingStore};
pub use handlers::create_router;
pub use services::{MeetingService, ServiceFactory};
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
