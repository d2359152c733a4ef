//! RSS feed routes.
//!
//! Adding a feed notifies the external feed worker over the
//! `rss:update_feeds` channel after the row commits; the notification is
//! best-effort only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::messages;
use crate::routes::ActionOutcome;
use crate::routes::auth::{CurrentUser, require_approved};
use crate::services::feed::{self, FeedError, FeedRow, normalize_http_url};
use crate::services::publish::RSS_UPDATE_CHANNEL;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddFeedForm {
    pub url: Option<String>,
}

fn feed_error_outcome(err: FeedError) -> ActionOutcome {
    match err {
        FeedError::NotFound(_) => ActionOutcome::failure(messages::NOT_FOUND),
        FeedError::Duplicate => ActionOutcome::failure(messages::FEED_DUPLICATE),
        FeedError::Database(e) => {
            tracing::error!(error = %e, "feed mutation failed");
            ActionOutcome::failure(messages::INTERNAL)
        }
    }
}

/// `GET /api/feeds`: the caller's registered feed URLs.
pub async fn list_feeds(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<FeedRow>>, StatusCode> {
    feed::list_feeds(&state.pool, current.user.id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, "feed listing failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// `POST /api/feeds`: register a feed URL and request a worker refresh.
pub async fn add_feed(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    axum::extract::Form(form): axum::extract::Form<AddFeedForm>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    let Some(url) = normalize_http_url(form.url.as_deref().unwrap_or_default()) else {
        return (jar, ActionOutcome::failure(messages::URL_INVALID));
    };

    match feed::add_feed(&state.pool, user.id, &url).await {
        Ok(row) => {
            state
                .publish_best_effort(
                    RSS_UPDATE_CHANNEL,
                    serde_json::json!({ "feedId": row.id, "url": row.url, "userId": user.id }),
                )
                .await;
            (jar, ActionOutcome::success_with(messages::FEED_ADDED))
        }
        Err(e) => (jar, feed_error_outcome(e)),
    }
}

/// `DELETE /api/feeds/{id}`: remove a feed the caller owns.
pub async fn remove_feed(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(feed_id): Path<Uuid>,
) -> (PrivateCookieJar, ActionOutcome) {
    let user = match require_approved(&state, &jar).await {
        Ok(user) => user,
        Err(outcome) => return (jar, outcome),
    };

    match feed::remove_feed(&state.pool, feed_id, user.id).await {
        Ok(()) => (jar, ActionOutcome::success()),
        Err(e) => (jar, feed_error_outcome(e)),
    }
}

#[cfg(test)]
#[path = "feeds_test.rs"]
mod tests;
