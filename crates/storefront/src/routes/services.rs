//! Service category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::content::Service;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Service listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "services/index.html")]
pub struct ServicesIndexTemplate {
    pub services: Vec<Service>,
}

/// Service detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "services/show.html")]
pub struct ServiceShowTemplate {
    pub service: Service,
    /// Other categories, linked from the bottom of the page.
    pub other_services: Vec<Service>,
}

/// Display the services listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    ServicesIndexTemplate {
        services: state.content().services().to_vec(),
    }
}

/// Display a service category page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let service = state
        .content()
        .service(&slug)
        .ok_or_else(|| AppError::NotFound(format!("service {slug}")))?
        .clone();

    let other_services = state
        .content()
        .services()
        .iter()
        .filter(|s| s.slug != slug)
        .cloned()
        .collect();

    Ok(ServiceShowTemplate {
        service,
        other_services,
    })
}
