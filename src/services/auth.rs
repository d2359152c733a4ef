//! Auth status aggregation and credential handling.
//!
//! DESIGN
//! ======
//! The session cookie is only a claim. `user_auth_status` re-derives the
//! caller's standing on every request: authenticated means the session
//! references a user that still exists, authorized means that user has been
//! approved (`is_verified`). A stale or forged session pointing at a deleted
//! user fails closed as anonymous.
//!
//! ERROR HANDLING
//! ==============
//! The aggregator never returns an error. Pages use it purely to pick one of
//! three UI states (content / please log in / pending approval), so a
//! database failure during the lookup is logged and reported as anonymous
//! rather than escalated into a 500.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::session::Session;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("email already registered")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Full user row, including the password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_verified: bool,
}

/// Sanitized user for responses. The password hash is dropped at the type
/// level: there is no field to leak.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_verified: bool,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self { id: row.id, email: row.email, name: row.name, is_verified: row.is_verified }
    }
}

/// Per-request auth standing. Recomputed on every call, never cached.
#[derive(Debug, Clone)]
pub struct AuthStatus {
    /// Session present and its user still exists.
    pub authenticated: bool,
    /// The user has been approved for feature access.
    pub authorized: bool,
    pub user: Option<UserData>,
}

impl AuthStatus {
    pub(crate) fn anonymous() -> Self {
        Self { authenticated: false, authorized: false, user: None }
    }
}

// =============================================================================
// AUTH STATUS AGGREGATOR
// =============================================================================

/// Derive the caller's auth standing from an already-decrypted session.
///
/// Short-circuits without a database call when there is no session. Any
/// lookup failure degrades to anonymous.
pub async fn user_auth_status(pool: &PgPool, session: Option<&Session>) -> AuthStatus {
    let Some(session) = session else {
        return AuthStatus::anonymous();
    };

    // The jar already rejects empty ids, but a decryptable cookie can still
    // carry a malformed one.
    let Ok(user_id) = Uuid::parse_str(session.user_id.trim()) else {
        tracing::warn!(user_id = %session.user_id, "session carries a malformed user id");
        return AuthStatus::anonymous();
    };

    match find_user_by_id(pool, user_id).await {
        Ok(Some(user)) => {
            let authorized = user.is_verified;
            AuthStatus { authenticated: true, authorized, user: Some(user.into()) }
        }
        Ok(None) => {
            tracing::warn!(%user_id, "session references a user that no longer exists");
            AuthStatus::anonymous()
        }
        Err(e) => {
            tracing::warn!(error = %e, %user_id, "user lookup failed during auth status check");
            AuthStatus::anonymous()
        }
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Hash a password with Argon2id, returning a PHC-format string.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Check a password against a stored PHC-format hash. A malformed stored
/// hash verifies as false rather than erroring.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

/// Fetch a user by id.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, (Uuid, String, String, String, bool)>(
        "SELECT id, email, name, password_hash, is_verified FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, email, name, password_hash, is_verified)| UserRow {
        id,
        email,
        name,
        password_hash,
        is_verified,
    }))
}

/// Fetch a user by normalized email.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, (Uuid, String, String, String, bool)>(
        "SELECT id, email, name, password_hash, is_verified FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, email, name, password_hash, is_verified)| UserRow {
        id,
        email,
        name,
        password_hash,
        is_verified,
    }))
}

/// Create a user with `is_verified = false`. There is no self-approval path;
/// the flag is flipped by an external admin process.
///
/// # Errors
///
/// Returns [`CredentialError::EmailTaken`] when the email is already
/// registered, checked up front and again via the unique index in case of a
/// concurrent signup.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password: &str,
) -> Result<UserRow, CredentialError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;
    if exists {
        return Err(CredentialError::EmailTaken);
    }

    let password_hash = hash_password(password)?;
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, name, password_hash, is_verified) VALUES ($1, $2, $3, $4, false)")
        .bind(id)
        .bind(email)
        .bind(name)
        .bind(&password_hash)
        .execute(pool)
        .await
        .map_err(|e| {
            if crate::db::is_unique_violation(&e) {
                CredentialError::EmailTaken
            } else {
                CredentialError::Database(e)
            }
        })?;

    Ok(UserRow { id, email: email.to_owned(), name: name.to_owned(), password_hash, is_verified: false })
}

/// Verify login credentials. Returns `Ok(None)` for both an unknown email
/// and a wrong password, so callers cannot distinguish the two.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn verify_login(pool: &PgPool, email: &str, password: &str) -> Result<Option<UserRow>, sqlx::Error> {
    let Some(user) = find_user_by_email(pool, email).await? else {
        return Ok(None);
    };
    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
