//! Test context for unified test setup
//!
//! This module provides a unified test context that builds the full router on
//! top of a fresh database and drives it without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use uuid::Uuid;
use MeetPoll::config::Settings;
use MeetPoll::{create_router, AppState};

use super::database_helper::TestDatabase;

pub const TEST_PUBLIC_URL: &str = "http://meetpoll.test";

/// A response reduced to what the tests look at
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Meeting id from a `/meeting/{id}/...` redirect
    pub fn redirected_meeting_id(&self) -> Option<Uuid> {
        let location = self.location.as_deref()?;
        let rest = location.strip_prefix("/meeting/")?;
        let id = rest.split('/').next()?;
        Uuid::parse_str(id).ok()
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub database: TestDatabase,
    pub settings: Settings,
    pub app: Router,
}

impl TestContext {
    /// Create a new test context with default test settings
    pub async fn new() -> Self {
        Self::new_with_settings(Self::create_test_settings()).await
    }

    pub async fn new_with_settings(settings: Settings) -> Self {
        let database = TestDatabase::new().await.expect("Failed to create test database");
        let state = AppState::new(settings.clone(), database.store.clone()).expect("Failed to build app state");
        let app = create_router(Arc::new(state));

        Self { database, settings, app }
    }

    /// Settings pointing at an in-memory database
    pub fn create_test_settings() -> Settings {
        let mut settings = Settings::default();
        settings.server.public_url = TEST_PUBLIC_URL.to_string();
        settings.database.url = "sqlite::memory:".to_string();
        settings.logging.level = "debug".to_string();
        settings
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// POST an `application/x-www-form-urlencoded` body
    pub async fn post_form(&self, uri: &str, body: String) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("Failed to build request");

        let response = self.app.clone().oneshot(request).await.expect("Router failed");

        let status = response.status();
        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let location = header_value(header::LOCATION);
        let content_type = header_value(header::CONTENT_TYPE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");
        let body = String::from_utf8_lossy(&bytes).into_owned();

        TestResponse {
            status,
            location,
            content_type,
            body,
        }
    }

    /// Create a meeting through the HTTP form and return its id
    pub async fn create_meeting(&self, name: &str, timeslots: &[&str], locations: &[&str]) -> Uuid {
        let response = self
            .post_form("/create/", super::test_data::create_meeting_body(name, "", timeslots, locations))
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "unexpected response: {}", response.body);
        response.redirected_meeting_id().expect("Redirect should point at the new meeting")
    }

    /// Submit a vote through the HTTP form
    pub async fn vote(&self, meeting_id: Uuid, name: &str, choices: &[(String, &str)]) -> TestResponse {
        self.post_form(
            &format!("/meeting/{}/vote/", meeting_id),
            super::test_data::vote_body(name, choices),
        )
        .await
    }
}
