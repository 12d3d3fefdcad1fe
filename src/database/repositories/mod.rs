//! Database repositories module
//!
//! One `MeetingStore` implementation per supported database

pub mod postgres;
pub mod sqlite;

// Re-export repositories
pub use postgres::PostgresMeetingStore;
pub use sqlite::SqliteMeetingStore;
