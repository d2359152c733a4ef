use axum::extract::{Form, State};
use axum::http::HeaderMap;
use uuid::Uuid;

use super::*;
use crate::services::session::create_session;
use crate::state::test_helpers::{test_app_state, test_key};

fn empty_jar(state: &AppState) -> PrivateCookieJar {
    PrivateCookieJar::from_headers(&HeaderMap::new(), state.session_key.clone())
}

fn logged_in_jar(state: &AppState) -> PrivateCookieJar {
    create_session(empty_jar(state), Uuid::new_v4(), "someone@example.com", true)
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm { email: Some(email.to_owned()), password: Some(password.to_owned()) }
}

fn signup_form(email: &str, name: &str, password: &str, confirm: &str) -> SignupForm {
    SignupForm {
        email: Some(email.to_owned()),
        name: Some(name.to_owned()),
        password: Some(password.to_owned()),
        confirm_password: Some(confirm.to_owned()),
    }
}

// =============================================================================
// validate_signup
// =============================================================================

#[test]
fn signup_accepts_a_clean_form() {
    let form = signup_form(" Alice@Example.com ", " Alice ", "abcd1234", "abcd1234");
    let input = validate_signup(&form).expect("form should validate");
    assert_eq!(input.email, "alice@example.com");
    assert_eq!(input.name, "Alice");
    assert_eq!(input.password, "abcd1234");
}

#[test]
fn signup_rejects_a_bad_email() {
    let form = signup_form("not-an-email", "Alice", "abcd1234", "abcd1234");
    assert_eq!(validate_signup(&form).err(), Some(messages::EMAIL_INVALID));
}

#[test]
fn signup_rejects_a_blank_name() {
    let form = signup_form("alice@example.com", "   ", "abcd1234", "abcd1234");
    assert_eq!(validate_signup(&form).err(), Some(messages::NAME_REQUIRED));
}

#[test]
fn signup_rejects_a_short_password() {
    let form = signup_form("alice@example.com", "Alice", "abc1234", "abc1234");
    assert_eq!(validate_signup(&form).err(), Some(messages::PASSWORD_TOO_SHORT));
}

#[test]
fn signup_rejects_a_confirm_mismatch() {
    let form = signup_form("alice@example.com", "Alice", "abcd1234", "abcd1235");
    let error = validate_signup(&form).err().expect("should fail");
    assert!(error.contains("일치하지 않습니다"));
}

#[test]
fn signup_rejects_a_missing_confirm() {
    let mut form = signup_form("alice@example.com", "Alice", "abcd1234", "abcd1234");
    form.confirm_password = None;
    assert_eq!(validate_signup(&form).err(), Some(messages::PASSWORD_CONFIRM_MISMATCH));
}

// =============================================================================
// anonymous-only guards (no database needed)
// =============================================================================

#[tokio::test]
async fn login_with_an_existing_session_is_rejected() {
    let state = test_app_state();
    let jar = logged_in_jar(&state);

    let (_, outcome) = login(State(state), jar, Form(login_form("a@b.c", "abcd1234"))).await;
    assert_eq!(outcome, ActionOutcome::failure(messages::ALREADY_AUTHENTICATED));
}

#[tokio::test]
async fn signup_with_an_existing_session_is_rejected() {
    let state = test_app_state();
    let jar = logged_in_jar(&state);

    let form = signup_form("a@b.c", "Alice", "abcd1234", "abcd1234");
    let (_, outcome) = signup(State(state), jar, Form(form)).await;
    assert_eq!(outcome, ActionOutcome::failure(messages::ALREADY_AUTHENTICATED));
}

#[tokio::test]
async fn login_validates_fields_before_touching_the_database() {
    let state = test_app_state();

    let jar = empty_jar(&state);
    let (_, outcome) = login(
        State(state.clone()),
        jar,
        Form(LoginForm { email: Some("bad".into()), password: Some("abcd1234".into()) }),
    )
    .await;
    assert_eq!(outcome, ActionOutcome::failure(messages::EMAIL_INVALID));

    let jar = empty_jar(&state);
    let (_, outcome) = login(
        State(state),
        jar,
        Form(LoginForm { email: Some("a@b.c".into()), password: None }),
    )
    .await;
    assert_eq!(outcome, ActionOutcome::failure(messages::PASSWORD_REQUIRED));
}

#[tokio::test]
async fn login_reports_an_internal_error_when_the_database_is_down() {
    let state = test_app_state();
    let jar = empty_jar(&state);

    let (jar, outcome) = login(State(state), jar, Form(login_form("a@b.c", "abcd1234"))).await;
    assert_eq!(outcome, ActionOutcome::failure(messages::INTERNAL));
    assert!(session::get_session(&jar).is_none());
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_the_session_and_redirects_home() {
    let jar = create_session(
        PrivateCookieJar::from_headers(&HeaderMap::new(), test_key()),
        Uuid::new_v4(),
        "alice@example.com",
        true,
    );

    let (jar, outcome) = logout(jar).await;
    assert_eq!(outcome, ActionOutcome::redirect("/"));
    assert!(session::get_session(&jar).is_none());
}

#[tokio::test]
async fn logout_without_a_session_still_redirects() {
    let jar = PrivateCookieJar::from_headers(&HeaderMap::new(), test_key());

    let (jar, outcome) = logout(jar).await;
    assert_eq!(outcome, ActionOutcome::redirect("/"));

    // A second logout behaves identically.
    let (_, outcome) = logout(jar).await;
    assert_eq!(outcome, ActionOutcome::redirect("/"));
}

// =============================================================================
// status endpoint
// =============================================================================

#[tokio::test]
async fn status_without_a_cookie_is_anonymous() {
    let state = test_app_state();
    let jar = empty_jar(&state);

    let Json(response) = status(State(state), jar).await;
    assert!(!response.is_authenticated);
    assert!(response.user.is_none());
}

#[tokio::test]
async fn status_with_a_dead_database_is_anonymous_not_an_error() {
    let state = test_app_state();
    let jar = logged_in_jar(&state);

    let Json(response) = status(State(state), jar).await;
    assert!(!response.is_authenticated);
    assert!(response.user.is_none());
}

#[test]
fn status_response_uses_the_public_field_name() {
    let response = StatusResponse { is_authenticated: false, user: None };
    let value = serde_json::to_value(&response).expect("serialization should succeed");
    assert!(value.get("isAuthenticated").is_some());
}

// =============================================================================
// require_approved
// =============================================================================

#[tokio::test]
async fn actions_without_a_session_require_login() {
    let state = test_app_state();
    let jar = empty_jar(&state);

    let result = require_approved(&state, &jar).await;
    assert_eq!(result.err(), Some(ActionOutcome::failure(messages::LOGIN_REQUIRED)));
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::state::test_helpers::live_pool;

    async fn live_state() -> AppState {
        AppState::new(live_pool().await, None, test_key())
    }

    fn unique_email() -> String {
        format!("route-{}@test.local", Uuid::new_v4().simple())
    }

    #[tokio::test]
    async fn signup_logs_in_but_stays_unapproved() {
        let state = live_state().await;
        let email = unique_email();

        let form = signup_form(&email, "Newcomer", "abcd1234", "abcd1234");
        let (jar, outcome) = signup(State(state.clone()), empty_jar(&state), Form(form)).await;
        assert_eq!(outcome, ActionOutcome::success_with(messages::SIGNUP_DONE));

        let Json(response) = status(State(state.clone()), jar.clone()).await;
        assert!(response.is_authenticated);
        let user = response.user.expect("user should be present");
        assert!(!user.is_verified);

        // Authenticated but unapproved: mutating actions stay gated.
        let result = require_approved(&state, &jar).await;
        assert_eq!(result.err(), Some(ActionOutcome::failure(messages::APPROVAL_PENDING)));
    }

    #[tokio::test]
    async fn wrong_password_fails_with_the_shared_message_and_no_cookie() {
        let state = live_state().await;
        let email = unique_email();

        let form = signup_form(&email, "Tester", "abcd1234", "abcd1234");
        let (_, outcome) = signup(State(state.clone()), empty_jar(&state), Form(form)).await;
        assert!(outcome.is_success());

        let (jar, outcome) = login(
            State(state.clone()),
            empty_jar(&state),
            Form(login_form(&email, "wrong-password")),
        )
        .await;
        assert_eq!(outcome, ActionOutcome::failure("아이디/비밀번호가 일치하지 않습니다"));
        assert!(session::get_session(&jar).is_none());
    }

    #[tokio::test]
    async fn login_round_trip_establishes_a_session() {
        let state = live_state().await;
        let email = unique_email();

        let form = signup_form(&email, "Tester", "abcd1234", "abcd1234");
        let (_, outcome) = signup(State(state.clone()), empty_jar(&state), Form(form)).await;
        assert!(outcome.is_success());

        let (jar, outcome) = login(
            State(state.clone()),
            empty_jar(&state),
            Form(login_form(&email, "abcd1234")),
        )
        .await;
        assert!(outcome.is_success());

        let session = session::get_session(&jar).expect("session should be present");
        assert_eq!(session.email, email);
    }

    #[tokio::test]
    async fn duplicate_signup_reports_the_email_as_taken() {
        let state = live_state().await;
        let email = unique_email();

        let form = signup_form(&email, "First", "abcd1234", "abcd1234");
        let (_, outcome) = signup(State(state.clone()), empty_jar(&state), Form(form)).await;
        assert!(outcome.is_success());

        let form = signup_form(&email, "Second", "abcd1234", "abcd1234");
        let (_, outcome) = signup(State(state.clone()), empty_jar(&state), Form(form)).await;
        assert_eq!(outcome, ActionOutcome::failure(messages::EMAIL_TAKEN));
    }
}
