//! Authentication route handlers.
//!
//! Password login and registration against the local user store. Failures
//! re-render the originating form with a message; success redirects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_session, set_current_user};
use crate::models::CurrentUser;
use crate::routes::PageContext;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Shown on `/login?registered=1`.
const REGISTERED_NOTICE: &str = "Account created. Please log in.";

/// Shown when storage or hashing fails mid-request.
const FAILED_MESSAGE: &str = "Something went wrong. Please try again later.";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub registered: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page, or go home if already logged in.
pub async fn login_page(ctx: PageContext, Query(query): Query<LoginQuery>) -> Response {
    if ctx.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        ctx,
        error: None,
        notice: query.registered.is_some().then_some(REGISTERED_NOTICE),
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ctx: PageContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.storage());

    match auth.login(&form.email, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &CurrentUser::from(&user)).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected");
            Ok(LoginTemplate {
                ctx,
                error: Some("Invalid email or password".to_string()),
                notice: None,
                email: form.email,
            }
            .into_response())
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Login failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginTemplate {
                    ctx,
                    error: Some(FAILED_MESSAGE.to_string()),
                    notice: None,
                    email: form.email,
                },
            )
                .into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page, or go home if already logged in.
pub async fn register_page(ctx: PageContext) -> Response {
    if ctx.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    RegisterTemplate {
        ctx,
        error: None,
        name: String::new(),
        email: String::new(),
    }
    .into_response()
}

/// Handle registration form submission.
///
/// Registration does not log the user in; it sends them to the login form.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let auth = AuthService::new(state.storage());

    let message = match auth.register(&form.name, &form.email, &form.password).await {
        Ok(_) => return Redirect::to("/login?registered=1").into_response(),
        Err(AuthError::DuplicateEmail) => "Email already exists".to_string(),
        Err(AuthError::InvalidEmail(_)) => "Please enter a valid email address".to_string(),
        Err(AuthError::MissingName) => "Please enter your name".to_string(),
        Err(AuthError::WeakPassword(reason)) => reason,
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Registration failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                RegisterTemplate {
                    ctx,
                    error: Some(FAILED_MESSAGE.to_string()),
                    name: form.name,
                    email: form.email,
                },
            )
                .into_response();
        }
    };

    RegisterTemplate {
        ctx,
        error: Some(message),
        name: form.name,
        email: form.email,
    }
    .into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Destroy the session and return to the login page.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_session(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");
    Ok(Redirect::to("/login"))
}
