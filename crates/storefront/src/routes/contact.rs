//! Contact form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::routes::PageContext;
use crate::services::contact::{ContactError, submit_contact};
use crate::state::AppState;

const SENT_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
const FAILED_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
    pub success: Option<&'static str>,
    pub error: Option<String>,
    pub form: Option<ContactForm>,
}

/// Display the contact form.
pub async fn show(ctx: PageContext) -> impl IntoResponse {
    ContactTemplate {
        ctx,
        success: None,
        error: None,
        form: None,
    }
}

/// Save a contact message and re-render the form with a banner.
///
/// Validation failures keep the visitor's input; a storage failure is logged
/// and shown as a generic error.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<ContactForm>,
) -> Response {
    match submit_contact(state.storage(), &form.name, &form.email, &form.message).await {
        Ok(_) => ContactTemplate {
            ctx,
            success: Some(SENT_MESSAGE),
            error: None,
            form: None,
        }
        .into_response(),
        Err(ContactError::Storage(e)) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to save contact message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ContactTemplate {
                    ctx,
                    success: None,
                    error: Some(FAILED_MESSAGE.to_string()),
                    form: Some(form),
                },
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            ContactTemplate {
                ctx,
                success: None,
                error: Some(capitalize(&e.to_string())),
                form: Some(form),
            },
        )
            .into_response(),
    }
}

/// Upper-case the first letter of an error message for display.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name is required"), "Name is required");
        assert_eq!(capitalize(""), "");
    }
}
