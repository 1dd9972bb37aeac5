//! Static markdown page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::content::Page;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Static page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct PageTemplate {
    pub page: Page,
}

/// Display a static markdown page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let page = state
        .content()
        .page(&slug)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?
        .clone();

    Ok(PageTemplate { page })
}
