//! Application state module
//!
//! Shared state handed to every request handler

use std::sync::Arc;

use tera::Tera;

use crate::config::Settings;
use crate::database::MeetingStore;
use crate::services::{MeetingService, ServiceFactory};
use crate::utils::errors::Result;
use crate::views;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub services: ServiceFactory,
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Build the state around an already connected store
    pub fn new(settings: Settings, store: Arc<dyn MeetingStore>) -> Result<Self> {
        let services = ServiceFactory::new(store, &settings)?;
        let templates = Arc::new(views::load_templates()?);

        Ok(Self {
            settings: Arc::new(settings),
            services,
            templates,
        })
    }

    pub fn meetings(&self) -> &MeetingService {
        &self.services.meeting_service
    }
}
