//! Uniform action result.
//!
//! DESIGN
//! ======
//! Every mutating form action resolves to one of three tagged outcomes
//! instead of throwing: a success (optionally with a message), a failure
//! carrying a short localized sentence, or a navigation redirect. The
//! redirect is ordinary control flow here, never an error; the HTTP layer
//! turns it into a 303 and the other two into 200 JSON bodies so form
//! clients always get a parseable result.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success { message: Option<String> },
    Failure { error: String },
    Redirect { path: String },
}

impl ActionOutcome {
    #[must_use]
    pub fn success() -> Self {
        Self::Success { message: None }
    }

    #[must_use]
    pub fn success_with(message: impl Into<String>) -> Self {
        Self::Success { message: Some(message.into()) }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    #[must_use]
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect { path: path.into() }
    }

    /// True for the success variant. Test convenience.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Success { message } => {
                let mut body = serde_json::Map::new();
                body.insert("success".to_owned(), true.into());
                if let Some(message) = message {
                    body.insert("message".to_owned(), message.into());
                }
                (StatusCode::OK, Json(serde_json::Value::Object(body))).into_response()
            }
            Self::Failure { error } => (
                StatusCode::OK,
                Json(serde_json::json!({ "success": false, "error": error })),
            )
                .into_response(),
            Self::Redirect { path } => Redirect::to(&path).into_response(),
        }
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
