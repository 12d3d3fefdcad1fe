//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MeetPoll application.

use tracing::{info, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::{MeetPollError, Result};

/// Initialize logging based on configuration.
///
/// When a log directory is configured the returned guard must be kept alive
/// for the lifetime of the process, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| MeetPollError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| MeetPollError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log meeting lifecycle actions
pub fn log_meeting_action(meeting_id: Uuid, action: &str, details: Option<&str>) {
    info!(
        meeting_id = %meeting_id,
        action = action,
        details = details,
        "Meeting action performed"
    );
}

/// Log a vote submission with the number of options it touched
pub fn log_vote_submission(meeting_id: Uuid, participant_id: Uuid, created_participant: bool, votes_recorded: usize) {
    info!(
        meeting_id = %meeting_id,
        participant_id = %participant_id,
        created_participant = created_participant,
        votes_recorded = votes_recorded,
        "Vote submitted"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
