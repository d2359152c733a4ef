//! Session store adapter over the encrypted session cookie.
//!
//! ARCHITECTURE
//! ============
//! All session state lives client-side in one encrypted cookie; the server
//! keeps no session table. `PrivateCookieJar` handles authenticated
//! encryption, so a tampered or undecryptable cookie simply reads as absent.
//! The payload is an identity *claim*: holders of the auth-status check must
//! re-verify the referenced user against the database.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "curatify-session";

const SESSION_TTL: Duration = Duration::days(7);

/// Decrypted session payload. `is_verified` is a copy taken at login time,
/// not re-checked per request; authorization decisions go through the
/// auth-status aggregator instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

/// Read the session from the cookie jar.
///
/// Returns `None` when the cookie is absent, fails decryption, carries a
/// payload that does not parse, or is missing either `userId` or `email`.
/// A partially populated cookie is treated as no session at all.
#[must_use]
pub fn get_session(jar: &PrivateCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let session: Session = serde_json::from_str(cookie.value()).ok()?;
    if session.user_id.trim().is_empty() || session.email.trim().is_empty() {
        return None;
    }
    Some(session)
}

/// Write a fresh session cookie for the given user, overwriting any prior
/// session. The jar encrypts the payload on add.
#[must_use]
pub fn create_session(jar: PrivateCookieJar, user_id: Uuid, email: &str, is_verified: bool) -> PrivateCookieJar {
    let session = Session { user_id: user_id.to_string(), email: email.to_owned(), is_verified };
    jar.add(session_cookie(&session))
}

/// Clear the session cookie. Idempotent: clearing an absent session is fine.
#[must_use]
pub fn destroy_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(removal_cookie())
}

pub(crate) fn session_cookie(session: &Session) -> Cookie<'static> {
    // Serializing a struct of strings and bools cannot fail.
    let value = serde_json::to_string(session).unwrap_or_default();
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(SESSION_TTL)
        .build()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
