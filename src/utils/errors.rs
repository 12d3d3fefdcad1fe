//! Error handling for MeetPoll
//!
//! This module defines the main error type used throughout the application
//! and how each variant is surfaced over HTTP.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Main error type for MeetPoll application
#[derive(Error, Debug)]
pub enum MeetPollError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Meeting not found: {meeting_id}")]
    MeetingNotFound { meeting_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

/// Result type alias for MeetPoll operations
pub type Result<T> = std::result::Result<T, MeetPollError>;

impl MeetPollError {
    /// Map a database error, turning unique constraint violations into `DuplicateKey`
    pub fn from_store(err: sqlx::Error, what: &str) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                MeetPollError::DuplicateKey(what.to_string())
            }
            _ => MeetPollError::Database(err),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MeetPollError::Database(_) => ErrorSeverity::Critical,
            MeetPollError::Migration(_) => ErrorSeverity::Critical,
            MeetPollError::Config(_) => ErrorSeverity::Critical,
            MeetPollError::ConfigSource(_) => ErrorSeverity::Critical,
            MeetPollError::DuplicateKey(_) => ErrorSeverity::Warning,
            MeetPollError::MeetingNotFound { .. } => ErrorSeverity::Info,
            MeetPollError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            MeetPollError::MeetingNotFound { .. } => StatusCode::NOT_FOUND,
            MeetPollError::DuplicateKey(_) => StatusCode::CONFLICT,
            MeetPollError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MeetPollError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(error = %self, severity = %self.severity(), "Request failed");
                "Something went wrong. Please try again later.".to_string()
            }
            ErrorSeverity::Warning => {
                warn!(error = %self, "Request rejected");
                self.to_string()
            }
            ErrorSeverity::Info => self.to_string(),
        };

        let title = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
             <body><h1>{code} {title}</h1><p>{message}</p><p><a href=\"/\">Back to start</a></p></body></html>",
            code = status.as_u16(),
            message = escape_html(&message),
        );

        (status, Html(body)).into_response()
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
