//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use chrono_tz::Tz;

use crate::utils::errors::{MeetPollError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_meetings_config(&settings.meetings)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(MeetPollError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(MeetPollError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    match url::Url::parse(&config.public_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(MeetPollError::Config(
            format!("Public URL must be an absolute http(s) URL: {}", config.public_url)
        )),
    }
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(MeetPollError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(MeetPollError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(MeetPollError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MeetPollError::Config(
            "Log level is required".to_string()
        ));
    }

    // Plain levels are checked strictly; anything with a directive is left to EnvFilter.
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !config.level.contains('=') && !valid_levels.contains(&config.level.as_str()) {
        return Err(MeetPollError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_some() && config.file_prefix.is_empty() {
        return Err(MeetPollError::Config(
            "Log file prefix is required when a log directory is set".to_string()
        ));
    }

    Ok(())
}

/// Validate meeting configuration
fn validate_meetings_config(config: &super::MeetingsConfig) -> Result<()> {
    if config.default_timezone.parse::<Tz>().is_err() {
        return Err(MeetPollError::Config(
            format!("Unknown time zone: {}", config.default_timezone)
        ));
    }

    Ok(())
}
