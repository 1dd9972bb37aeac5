//! Email relay for the contact form.
//!
//! Uses SMTP via lettre for delivery with Askama templates for the
//! multipart body. One attempt per submission; a failed send is reported to
//! the visitor, who retries by resubmitting.

use askama::Template;
use bencom_core::Email;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// HTML template for a relayed contact message.
#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Plain text template for a relayed contact message.
#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactEmailText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Errors that can occur when relaying email.
#[derive(Debug, Error)]
pub enum EmailServiceError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Stateless relay that forwards contact form submissions over SMTP.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    to_address: String,
}

impl EmailService {
    /// Create a new email relay from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay host is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }

    /// Forward a contact form submission to the business inbox.
    ///
    /// The submitter's address goes into `Reply-To` so answering the relayed
    /// mail reaches them directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the message fails to render, build, or send.
    pub async fn send_contact_message(
        &self,
        name: &str,
        reply_to: &Email,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailServiceError> {
        let html = ContactEmailHtml {
            name,
            email: reply_to.as_str(),
            message,
        }
        .render()?;
        let text = ContactEmailText {
            name,
            email: reply_to.as_str(),
            message,
        }
        .render()?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailServiceError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .to_address
                .parse()
                .map_err(|_| EmailServiceError::InvalidAddress(self.to_address.clone()))?)
            .reply_to(
                reply_to
                    .as_str()
                    .parse()
                    .map_err(|_| EmailServiceError::InvalidAddress(reply_to.to_string()))?,
            )
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %self.to_address, subject = %subject, "Contact message relayed");
        Ok(())
    }
}
