//! HTML views
//!
//! Templates are compiled into the binary and rendered with Tera. Every
//! template name ends in `.html`, so autoescaping applies to all of them.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::utils::errors::Result;

pub const BASE: &str = "base.html";
pub const HOME: &str = "home.html";
pub const DASHBOARD: &str = "dashboard.html";
pub const CREATE: &str = "create.html";
pub const SUCCESS: &str = "success.html";
pub const VOTE: &str = "vote.html";
pub const RESULTS: &str = "results.html";
pub const TIMESLOT_FIELD: &str = "partials/timeslot_field.html";
pub const LOCATION_FIELD: &str = "partials/location_field.html";

/// Build the template registry
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    // Added together so `extends` can be resolved regardless of order
    tera.add_raw_templates(vec![
        (BASE, include_str!("../../templates/base.html")),
        (HOME, include_str!("../../templates/home.html")),
        (DASHBOARD, include_str!("../../templates/dashboard.html")),
        (CREATE, include_str!("../../templates/create.html")),
        (SUCCESS, include_str!("../../templates/success.html")),
        (VOTE, include_str!("../../templates/vote.html")),
        (RESULTS, include_str!("../../templates/results.html")),
        (TIMESLOT_FIELD, include_str!("../../templates/partials/timeslot_field.html")),
        (LOCATION_FIELD, include_str!("../../templates/partials/location_field.html")),
    ])?;

    tracing::debug!(count = tera.get_template_names().count(), "Templates loaded");
    Ok(tera)
}

/// Render a template with a serializable context
pub fn render<T: Serialize>(tera: &Tera, template: &str, data: &T) -> Result<Html<String>> {
    let context = Context::from_serialize(data)?;
    let body = tera.render(template, &context)?;
    Ok(Html(body))
}

/// Render a template that needs no data
pub fn render_static(tera: &Tera, template: &str) -> Result<Html<String>> {
    let body = tera.render(template, &Context::new())?;
    Ok(Html(body))
}
