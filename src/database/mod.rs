//! Database module
//!
//! This module handles database connections and the meeting store backends

pub mod connection;
pub mod repositories;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabaseBackend, connect_store, create_postgres_pool, create_sqlite_pool, run_postgres_migrations, run_sqlite_migrations};
pub use repositories::{PostgresMeetingStore, SqliteMeetingStore};
pub use store::MeetingStore;
