//! RSS feed registration service.
//!
//! Feed URLs are stored per user; actual fetching and parsing happen in the
//! external feed worker, notified over the `rss:update_feeds` channel.
//! Ownership semantics mirror the interest service: foreign rows read as
//! not found.

use sqlx::PgPool;
use uuid::Uuid;

const MAX_URL_LEN: usize = 2048;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed not found: {0}")]
    NotFound(Uuid),
    #[error("feed already registered")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FeedRow {
    pub id: Uuid,
    pub url: String,
}

/// Shape-check an http(s) URL. This is deliberately shallow: the feed worker
/// does the real fetch and reports unreachable feeds on its own channel.
#[must_use]
pub(crate) fn normalize_http_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))?;
    if rest.is_empty() || trimmed.len() > MAX_URL_LEN || trimmed.contains(char::is_whitespace) {
        return None;
    }
    Some(trimmed.to_owned())
}

/// List a user's registered feeds, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_feeds(pool: &PgPool, user_id: Uuid) -> Result<Vec<FeedRow>, FeedError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, url FROM rss_feeds WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, url)| FeedRow { id, url }).collect())
}

/// Register a feed URL for a user.
///
/// # Errors
///
/// Returns [`FeedError::Duplicate`] when the user already registered the
/// same URL.
pub async fn add_feed(pool: &PgPool, user_id: Uuid, url: &str) -> Result<FeedRow, FeedError> {
    let id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO rss_feeds (id, user_id, url) VALUES ($1, $2, $3)
         ON CONFLICT (user_id, url) DO NOTHING",
    )
    .bind(id)
    .bind(user_id)
    .bind(url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(FeedError::Duplicate);
    }
    Ok(FeedRow { id, url: url.to_owned() })
}

/// Remove a feed owned by the given user. A missing row and a foreign row
/// yield the same not-found error.
///
/// # Errors
///
/// Returns [`FeedError::NotFound`] on a missing or foreign row.
pub async fn remove_feed(pool: &PgPool, feed_id: Uuid, user_id: Uuid) -> Result<(), FeedError> {
    let result = sqlx::query("DELETE FROM rss_feeds WHERE id = $1 AND user_id = $2")
        .bind(feed_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(FeedError::NotFound(feed_id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
