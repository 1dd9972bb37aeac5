//! Contact form route handlers.
//!
//! Relays contact form submissions to the business inbox over SMTP. A
//! single attempt per submission; failures come back as a retryable notice
//! and the visitor resubmits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bencom_core::Email;

use crate::filters;
use crate::state::AppState;

/// Default subject for submissions that leave the field blank.
const DEFAULT_SUBJECT: &str = "Website inquiry";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {}

/// Display the contact page.
#[instrument]
pub async fn show() -> impl IntoResponse {
    ContactTemplate {}
}

/// Relay a contact form submission.
///
/// POST /contact/send
///
/// Validates the submitter's address and message, then forwards the
/// submission over the SMTP relay. Responds with a structured error the
/// page surfaces as a retryable notice.
#[instrument(skip(state), fields(email = %form.email))]
pub async fn send(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    let address = form.email.trim().to_lowercase();
    let Ok(reply_to) = Email::parse(&address) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Please enter a valid email address.".to_string()),
            }),
        );
    };

    let message = form.message.trim();
    if message.len() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                success: false,
                message: Some("Message is too short.".to_string()),
            }),
        );
    }

    let Some(mailer) = state.mailer() else {
        tracing::error!("Email relay not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse {
                success: false,
                message: Some("Service temporarily unavailable.".to_string()),
            }),
        );
    };

    let subject = form.subject.trim();
    let subject = if subject.is_empty() {
        DEFAULT_SUBJECT
    } else {
        subject
    };

    match mailer
        .send_contact_message(form.name.trim(), &reply_to, subject, message)
        .await
    {
        Ok(()) => {
            tracing::info!(email = %reply_to, "Contact message relayed");
            (
                StatusCode::OK,
                Json(ContactResponse {
                    success: true,
                    message: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(email = %reply_to, error = %e, "Failed to relay contact message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}
