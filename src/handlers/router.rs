use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::handlers::{fragments, health, meetings, pages, votes};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Pages
        .route("/", get(pages::home))
        .route("/dashboard/", get(pages::dashboard))

        // Meetings
        .route("/create/", get(meetings::create_form).post(meetings::create_meeting))
        .route("/meeting/{id}/success/", get(meetings::meeting_success))
        .route("/meeting/{id}/delete/", post(meetings::delete_meeting))

        // Voting
        .route("/meeting/{id}/", get(votes::vote_form))
        .route("/meeting/{id}/vote/", post(votes::submit_vote))
        .route("/meeting/{id}/results/", get(votes::results))

        // Form fragments
        .route("/htmx/add-timeslot/", post(fragments::add_timeslot_field))
        .route("/htmx/add-location/", post(fragments::add_location_field))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
