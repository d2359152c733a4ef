//! Auth routes: status endpoint, login/signup/logout actions.
//!
//! DESIGN
//! ======
//! Login and signup are anonymous-only entry points: an existing session is
//! an error for them, not a shortcut. Every action re-derives the session
//! from the cookie itself, independent of whatever the calling page already
//! checked, so the check cannot be bypassed by posting to the action
//! directly.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::messages;
use crate::routes::ActionOutcome;
use crate::services::auth::{self as auth_svc, UserData, normalize_email};
use crate::services::session::{self, Session};
use crate::state::AppState;

const MIN_PASSWORD_CHARS: usize = 8;

// =============================================================================
// STATUS ENDPOINT
// =============================================================================

/// Navigation-chrome view of the auth state. Collapses authenticated and
/// authorized into one boolean on purpose: a logged-in but unapproved user
/// still sees the logged-in menu.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_authenticated: bool,
    pub user: Option<UserData>,
}

/// `GET /api/auth/status`: always 200; every failure mode inside the
/// aggregator reads as anonymous.
pub async fn status(State(state): State<AppState>, jar: PrivateCookieJar) -> Json<StatusResponse> {
    let session = session::get_session(&jar);
    let status = auth_svc::user_auth_status(&state.pool, session.as_ref()).await;
    Json(StatusResponse { is_authenticated: status.authenticated, user: status.user })
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user re-verified against the database. Use as a handler
/// parameter on read endpoints that require login.
pub struct CurrentUser {
    pub user: UserData,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, app_state.session_key.clone());
        let session = session::get_session(&jar).ok_or(StatusCode::UNAUTHORIZED)?;

        let status = auth_svc::user_auth_status(&app_state.pool, Some(&session)).await;
        if !status.authenticated {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let user = status.user.ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { user })
    }
}

/// Gate for mutating actions: session must resolve to an existing, approved
/// user. Failures come back as action outcomes, not HTTP status codes, so
/// the form client always gets the uniform result shape.
pub(crate) async fn require_approved(state: &AppState, jar: &PrivateCookieJar) -> Result<UserData, ActionOutcome> {
    let session = session::get_session(jar);
    let status = auth_svc::user_auth_status(&state.pool, session.as_ref()).await;
    if !status.authenticated {
        return Err(ActionOutcome::failure(messages::LOGIN_REQUIRED));
    }
    if !status.authorized {
        return Err(ActionOutcome::failure(messages::APPROVAL_PENDING));
    }
    status.user.ok_or_else(|| ActionOutcome::failure(messages::LOGIN_REQUIRED))
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    axum::extract::Form(form): axum::extract::Form<LoginForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    if session::get_session(&jar).is_some() {
        return (jar, ActionOutcome::failure(messages::ALREADY_AUTHENTICATED));
    }

    let Some(email) = normalize_email(form.email.as_deref().unwrap_or_default()) else {
        return (jar, ActionOutcome::failure(messages::EMAIL_INVALID));
    };
    let password = form.password.unwrap_or_default();
    if password.is_empty() {
        return (jar, ActionOutcome::failure(messages::PASSWORD_REQUIRED));
    }

    match auth_svc::verify_login(&state.pool, &email, &password).await {
        Ok(Some(user)) => {
            let jar = session::create_session(jar, user.id, &user.email, user.is_verified);
            (jar, ActionOutcome::success())
        }
        // Unknown email and wrong password share one message; no cookie is
        // written either way.
        Ok(None) => (jar, ActionOutcome::failure(messages::LOGIN_FAILED)),
        Err(e) => {
            tracing::error!(error = %e, "login credential check failed");
            (jar, ActionOutcome::failure(messages::INTERNAL))
        }
    }
}

// =============================================================================
// SIGNUP
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

pub(crate) struct SignupInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Field-level validation, checked before any database work.
pub(crate) fn validate_signup(form: &SignupForm) -> Result<SignupInput, &'static str> {
    let email = normalize_email(form.email.as_deref().unwrap_or_default()).ok_or(messages::EMAIL_INVALID)?;

    let name = form.name.as_deref().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(messages::NAME_REQUIRED);
    }

    let password = form.password.as_deref().unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(messages::PASSWORD_TOO_SHORT);
    }
    if Some(password) != form.confirm_password.as_deref() {
        return Err(messages::PASSWORD_CONFIRM_MISMATCH);
    }

    Ok(SignupInput { email, name: name.to_owned(), password: password.to_owned() })
}

/// `POST /api/auth/signup`: creates an unapproved user and logs them in.
pub async fn signup(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    axum::extract::Form(form): axum::extract::Form<SignupForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    if session::get_session(&jar).is_some() {
        return (jar, ActionOutcome::failure(messages::ALREADY_AUTHENTICATED));
    }

    let input = match validate_signup(&form) {
        Ok(input) => input,
        Err(message) => return (jar, ActionOutcome::failure(message)),
    };

    match auth_svc::create_user(&state.pool, &input.email, &input.name, &input.password).await {
        Ok(user) => {
            let jar = session::create_session(jar, user.id, &user.email, user.is_verified);
            (jar, ActionOutcome::success_with(messages::SIGNUP_DONE))
        }
        Err(auth_svc::CredentialError::EmailTaken) => (jar, ActionOutcome::failure(messages::EMAIL_TAKEN)),
        Err(e) => {
            tracing::error!(error = %e, "signup failed");
            (jar, ActionOutcome::failure(messages::INTERNAL))
        }
    }
}

// =============================================================================
// LOGOUT
// =============================================================================

/// `POST /api/auth/logout`: clears the cookie whether or not a session
/// exists and sends the caller home. Never fails.
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, ActionOutcome) {
    (session::destroy_session(jar), ActionOutcome::redirect("/"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
