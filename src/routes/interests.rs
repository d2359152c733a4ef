//! Interest routes.
//!
//! Mutations are approved-only actions returning the uniform result shape;
//! an ownership mismatch surfaces as the same not-found message as a
//! nonexistent id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::messages;
use crate::routes::ActionOutcome;
use crate::routes::auth::{CurrentUser, require_approved};
use crate::services::interest::{self, InterestError, InterestRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterestForm {
    pub name: Option<String>,
}

fn interest_error_outcome(err: InterestError) -> ActionOutcome {
    match err {
        InterestError::NotFound(_) => ActionOutcome::failure(messages::NOT_FOUND),
        InterestError::Duplicate => ActionOutcome::failure(messages::INTEREST_DUPLICATE),
        InterestError::Database(e) => {
            tracing::error!(error = %e, "interest mutation failed");
            ActionOutcome::failure(messages::INTERNAL)
        }
    }
}

/// `GET /api/interests`: the caller's interests.
pub async fn list_interests(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<InterestRow>>, StatusCode> {
    interest::list_interests(&state.pool, current.user.id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, "interest listing failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// `POST /api/interests`: add an interest.
pub async fn add_interest(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    axum::extract::Form(form): axum::extract::Form<InterestForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    let Some(name) = interest::normalize_name(form.name.as_deref().unwrap_or_default()) else {
        return (jar, ActionOutcome::failure(messages::INTEREST_NAME_INVALID));
    };

    match interest::add_interest(&state.pool, user.id, &name).await {
        Ok(_) => (jar, ActionOutcome::success()),
        Err(e) => (jar, interest_error_outcome(e)),
    }
}

/// `POST /api/interests/{id}`: rename an interest the caller owns.
pub async fn update_interest(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(interest_id): Path<Uuid>,
    axum::extract::Form(form): axum::extract::Form<InterestForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    let Some(name) = interest::normalize_name(form.name.as_deref().unwrap_or_default()) else {
        return (jar, ActionOutcome::failure(messages::INTEREST_NAME_INVALID));
    };

    match interest::update_interest(&state.pool, interest_id, user.id, &name).await {
        Ok(()) => (jar, ActionOutcome::success()),
        Err(e) => (jar, interest_error_outcome(e)),
    }
}

/// `DELETE /api/interests/{id}`: remove an interest the caller owns.
pub async fn remove_interest(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(interest_id): Path<Uuid>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    match interest::remove_interest(&state.pool, interest_id, user.id).await {
        Ok(()) => (jar, ActionOutcome::success()),
        Err(e) => (jar, interest_error_outcome(e)),
    }
}

#[cfg(test)]
#[path = "interests_test.rs"]
mod tests;
