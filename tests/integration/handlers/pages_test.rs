//! Integration tests for the landing page, dashboard, fragments and health check

use axum::http::StatusCode;
use serial_test::serial;

use crate::helpers::TestContext;

#[tokio::test]
#[serial]
async fn test_home_page() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.as_deref().unwrap_or_default().starts_with("text/html"));
    assert!(response.body.contains("href=\"/create/\""));
}

#[tokio::test]
#[serial]
async fn test_dashboard_lists_meetings_newest_first() {
    let ctx = TestContext::new().await;

    let empty = ctx.get("/dashboard/").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.body.contains("No meetings yet."));

    let older = ctx.create_meeting("Older meeting", &[], &["Office"]).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    ctx.create_meeting("Newer meeting", &[], &["Office"]).await;
    ctx.vote(older, "Alice", &[]).await;
    ctx.vote(older, "Bob", &[]).await;

    let response = ctx.get("/dashboard/").await;
    assert_eq!(response.status, StatusCode::OK);
    let newer_at = response.body.find("Newer meeting").expect("newer listed");
    let older_at = response.body.find("Older meeting").expect("older listed");
    assert!(newer_at < older_at);
    assert!(response.body.contains("2 participants"));
    assert!(response.body.contains(&format!("/meeting/{}/delete/", older)));
}

#[tokio::test]
#[serial]
async fn test_fragments_are_post_only() {
    let ctx = TestContext::new().await;

    let timeslot = ctx.post_form("/htmx/add-timeslot/", String::new()).await;
    assert_eq!(timeslot.status, StatusCode::OK);
    assert!(timeslot.body.contains("name=\"timeslots[]\""));
    assert!(!timeslot.body.contains("<html"));

    let location = ctx.post_form("/htmx/add-location/", String::new()).await;
    assert_eq!(location.status, StatusCode::OK);
    assert!(location.body.contains("name=\"locations[]\""));

    assert_eq!(ctx.get("/htmx/add-timeslot/").await.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(ctx.get("/htmx/add-location/").await.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
#[serial]
async fn test_health_check() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&response.body).expect("JSON body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "sqlite");
}

#[tokio::test]
#[serial]
async fn test_health_check_reports_closed_pool() {
    let ctx = TestContext::new().await;
    ctx.database.pool.close().await;

    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = serde_json::from_str(&response.body).expect("JSON body");
    assert_eq!(body["status"], "unavailable");
}
