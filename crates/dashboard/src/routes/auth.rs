//! Authentication route handlers.
//!
//! Email and password are exchanged with the backend for a bearer token,
//! which is kept in the server-side session next to the user's profile.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::ApiError;
use crate::error::{AppError, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalUser, set_current_user, take_flash};
use crate::models::CurrentUser;
use crate::services::{Route, Toast};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
    pub toasts: Vec<Toast>,
}

/// Login form input.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Render the login page; signed-in users go straight to the dashboard.
///
/// GET /auth/login
#[instrument(skip_all)]
pub async fn login_page(OptionalUser(user): OptionalUser, session: Session) -> Response {
    if user.is_some() {
        return Redirect::to(&Route::StoreList.path()).into_response();
    }

    let toasts = take_flash(&session).await.unwrap_or_default();
    LoginTemplate {
        email: String::new(),
        error: None,
        toasts,
    }
    .into_response()
}

/// Sign in with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();
    let password = SecretString::from(form.password);

    let failure = |message: &str| LoginTemplate {
        email: email.clone(),
        error: Some(message.to_string()),
        toasts: Vec::new(),
    };

    if email.is_empty() {
        return Ok(failure("Email is required").into_response());
    }

    match state.api().login(&email, &password).await {
        Ok(login) => {
            // New identity, new session id
            session.cycle_id().await?;
            set_current_user(
                &session,
                &CurrentUser {
                    profile: login.user.clone(),
                    access_token: login.token,
                },
            )
            .await?;
            set_sentry_user(login.user.id.as_i64(), &login.user.email);
            tracing::info!(user_id = %login.user.id, "Store owner signed in");

            Ok(Redirect::to(&Route::StoreList.path()).into_response())
        }
        Err(ApiError::Unauthorized) => {
            tracing::info!("Rejected login");
            Ok(failure("Invalid email or password").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Login request failed");
            Ok(failure("Unable to sign in right now. Please try again.").into_response())
        }
    }
}
