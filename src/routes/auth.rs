use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::constants::{
    MSG_ACCOUNT_CREATED, MSG_EMAIL_EXISTS, MSG_INVALID_CREDENTIALS, SESSION_COOKIE,
};
use crate::db;
use crate::error::Result;
use crate::models::Account;
use crate::security::apply_pepper;
use crate::session::{clear_cookie, flash_cookie, issue_token, session_cookie, CurrentAccount, Flash};
use crate::views::{self, Page, PageContext};
use crate::AppState;

/// Form body shared by login and registration
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

pub async fn login_form(account: Option<CurrentAccount>, flash: Flash) -> Page {
    views::login(&PageContext::new(account, flash))
}

/// Log in with email and password
///
/// Matching credentials set the session cookie and redirect to the
/// downloads page. Anything else re-renders the form with
/// "Invalid credentials".
pub async fn login(
    State(state): State<AppState>,
    account: Option<CurrentAccount>,
    flash: Flash,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let db = state.db.clone();
    let email = form.email.trim().to_string();
    let found = tokio::task::spawn_blocking(move || db::find_account_by_email(&db, &email)).await??;

    let digest = apply_pepper(&form.password, &state.config.password_pepper);

    match found {
        Some((account_id, record)) if record.password_digest == digest => {
            tracing::info!("Account {} logged in", account_id);
            let token = issue_token(account_id, &state.config.session_secret);
            Ok((
                [(header::SET_COOKIE, session_cookie(&token))],
                Redirect::to("/downloads"),
            )
                .into_response())
        }
        _ => {
            tracing::info!("Failed login attempt");
            let ctx = PageContext::new(account, flash).with_message(MSG_INVALID_CREDENTIALS);
            Ok(views::login(&ctx).into_response())
        }
    }
}

pub async fn register_form(account: Option<CurrentAccount>, flash: Flash) -> Page {
    views::register(&PageContext::new(account, flash))
}

/// Register a new account
///
/// The email is stored trimmed. A taken email re-renders the form with
/// "Email already exists" and leaves the existing record untouched. On
/// success the visitor is sent to the login page.
pub async fn register(
    State(state): State<AppState>,
    account: Option<CurrentAccount>,
    flash: Flash,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let email = form.email.trim().to_string();
    if let Err(message) = Account::validate_credentials(&email, &form.password) {
        tracing::debug!("Rejecting registration form: {}", message);
        let ctx = PageContext::new(account, flash).with_message(message);
        return Ok(views::register(&ctx).into_response());
    }

    let digest = apply_pepper(&form.password, &state.config.password_pepper);
    let db = state.db.clone();

    let created =
        tokio::task::spawn_blocking(move || db::insert_account(&db, &email, &digest)).await??;

    match created {
        Some(_) => Ok((
            [(header::SET_COOKIE, flash_cookie(MSG_ACCOUNT_CREATED))],
            Redirect::to("/login"),
        )
            .into_response()),
        None => {
            let ctx = PageContext::new(account, flash).with_message(MSG_EMAIL_EXISTS);
            Ok(views::register(&ctx).into_response())
        }
    }
}

/// End the session and go back to the landing page
pub async fn logout(CurrentAccount(account): CurrentAccount) -> Response {
    tracing::info!("Account {} logged out", account.id);
    (
        [(header::SET_COOKIE, clear_cookie(SESSION_COOKIE))],
        Redirect::to("/"),
    )
        .into_response()
}
