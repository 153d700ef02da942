//! Review confirmation notifications.
//!
//! Uses SMTP via lettre for delivery with Askama templates. When SMTP is not
//! configured, [`LogNotifier`] records what would have been sent.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::Review;

/// Subject line of the review acknowledgement.
pub const REVIEW_CONFIRMATION_SUBJECT: &str = "Thank you for your review!";

/// HTML template for the review confirmation email.
#[derive(Template)]
#[template(path = "email/review_confirmation.html")]
struct ReviewConfirmationHtml<'a> {
    name: &'a str,
    message: &'a str,
}

/// Plain text template for the review confirmation email.
#[derive(Template)]
#[template(path = "email/review_confirmation.txt")]
struct ReviewConfirmationText<'a> {
    name: &'a str,
    message: &'a str,
}

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
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

    /// The send did not finish in time.
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Sends acknowledgements to reviewers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Thank the reviewer, echoing their message back.
    async fn send_review_confirmation(&self, review: &Review) -> Result<(), NotifyError>;
}

/// SMTP notifier.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier from configuration.
    ///
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host cannot be resolved into a transport.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotifyError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_review_confirmation(&self, review: &Review) -> Result<(), NotifyError> {
        let (text, html) = render_review_confirmation(review)?;
        self.send_multipart_email(
            review.email.as_str(),
            REVIEW_CONFIRMATION_SUBJECT,
            &text,
            &html,
        )
        .await
    }
}

/// Notifier used when SMTP is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_review_confirmation(&self, review: &Review) -> Result<(), NotifyError> {
        tracing::info!(
            review_id = %review.id,
            to = %review.email,
            subject = REVIEW_CONFIRMATION_SUBJECT,
            "SMTP not configured, skipping review confirmation email"
        );
        Ok(())
    }
}

/// Render the plain text and HTML bodies.
fn render_review_confirmation(review: &Review) -> Result<(String, String), NotifyError> {
    let text = ReviewConfirmationText {
        name: &review.name,
        message: &review.message,
    }
    .render()?;
    let html = ReviewConfirmationHtml {
        name: &review.name,
        message: &review.message,
    }
    .render()?;
    Ok((text, html))
}
