//! Interest tracking service.
//!
//! Interests are user-scoped keywords. Every mutation carries the owning
//! user id in the WHERE clause, so a row belonging to someone else looks
//! exactly like a row that does not exist.

use sqlx::PgPool;
use uuid::Uuid;

const MAX_NAME_CHARS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum InterestError {
    #[error("interest not found: {0}")]
    NotFound(Uuid),
    #[error("interest already registered")]
    Duplicate,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct InterestRow {
    pub id: Uuid,
    pub name: String,
}

/// Trim and bound-check an interest name.
#[must_use]
pub(crate) fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_CHARS {
        return None;
    }
    Some(trimmed.to_owned())
}

/// List a user's interests, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_interests(pool: &PgPool, user_id: Uuid) -> Result<Vec<InterestRow>, InterestError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT id, name FROM interests WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| InterestRow { id, name }).collect())
}

/// Add an interest for a user.
///
/// # Errors
///
/// Returns [`InterestError::Duplicate`] when the user already tracks the
/// same name.
pub async fn add_interest(pool: &PgPool, user_id: Uuid, name: &str) -> Result<InterestRow, InterestError> {
    let id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO interests (id, user_id, name) VALUES ($1, $2, $3)
         ON CONFLICT (user_id, name) DO NOTHING",
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(InterestError::Duplicate);
    }
    Ok(InterestRow { id, name: name.to_owned() })
}

/// Rename an interest owned by the given user.
///
/// # Errors
///
/// Returns [`InterestError::NotFound`] when the row does not exist or
/// belongs to a different user; the two cases are indistinguishable.
pub async fn update_interest(
    pool: &PgPool,
    interest_id: Uuid,
    user_id: Uuid,
    name: &str,
) -> Result<(), InterestError> {
    let result = sqlx::query("UPDATE interests SET name = $1 WHERE id = $2 AND user_id = $3")
        .bind(name)
        .bind(interest_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if crate::db::is_unique_violation(&e) {
                InterestError::Duplicate
            } else {
                InterestError::Database(e)
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(InterestError::NotFound(interest_id));
    }
    Ok(())
}

/// Remove an interest owned by the given user. Same not-found semantics as
/// [`update_interest`].
///
/// # Errors
///
/// Returns [`InterestError::NotFound`] on a missing or foreign row.
pub async fn remove_interest(pool: &PgPool, interest_id: Uuid, user_id: Uuid) -> Result<(), InterestError> {
    let result = sqlx::query("DELETE FROM interests WHERE id = $1 AND user_id = $2")
        .bind(interest_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(InterestError::NotFound(interest_id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "interest_test.rs"]
mod tests;
