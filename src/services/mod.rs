//! Services module
//!
//! This module contains business logic services

pub mod aggregation;
pub mod meeting;

// Re-export commonly used services
pub use aggregation::{best_option, tallies_by_target, tally_for, BestOption, ParticipantChoice, Tally};
pub use meeting::{
    BestOptionSummary, CreateMeetingForm, MeetingService, OptionSummary, ResultsView, VoteFormView,
    VoteReceipt, VoteSubmission,
};

use std::sync::Arc;

use serde::Serialize;

use crate::config::settings::Settings;
use crate::database::MeetingStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub meeting_service: MeetingService,
    store: Arc<dyn MeetingStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(store: Arc<dyn MeetingStore>, settings: &Settings) -> Result<Self> {
        let meeting_service = MeetingService::new(store.clone(), &settings.meetings)?;

        Ok(Self { meeting_service, store })
    }

    /// Health check for the backing store
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_error = match self.store.health_check().await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = %e, backend = self.store.backend(), "Database health check failed");
                Some(e.to_string())
            }
        };

        ServiceHealthStatus {
            database_backend: self.store.backend(),
            database_healthy: database_error.is_none(),
            database_error,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub database_backend: &'static str,
    pub database_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push(format!("{} connection failed", self.database_backend));
        }

        issues
    }
}
