//! Cookie-backed login sessions and flash messages
//!
//! A session is a signed token `"{account_id}.{issued_at}.{hmac}"` stored in
//! an `HttpOnly` cookie. The account is reloaded from the store on every
//! request, so a token for a vanished account is treated as anonymous.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};

use crate::constants::{FLASH_COOKIE, MSG_LOGIN_REQUIRED, SESSION_COOKIE};
use crate::db;
use crate::error::Result;
use crate::models::Account;
use crate::security::{sign_hmac, validate_timestamp, verify_hmac};
use crate::AppState;

// =============================================================================
// Cookies
// =============================================================================

/// Find a cookie value in the request headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value for a browser-session cookie
fn set_cookie(name: &str, value: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value)
}

/// `Set-Cookie` value that removes a cookie
pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> String {
    set_cookie(SESSION_COOKIE, token)
}

/// `Set-Cookie` value carrying a one-shot flash message
pub fn flash_cookie(message: &str) -> String {
    set_cookie(FLASH_COOKIE, &hex::encode(message))
}

// =============================================================================
// Tokens
// =============================================================================

/// Issue a signed session token for an account
pub fn issue_token(account_id: u64, secret: &str) -> String {
    let payload = format!("{}.{}", account_id, chrono::Utc::now().timestamp());
    let signature = sign_hmac(&payload, secret);
    format!("{}.{}", payload, signature)
}

/// Verify a session token, returning the account id it was issued for
pub fn verify_token(token: &str, secret: &str, max_age_secs: i64) -> Option<u64> {
    let (payload, signature) = token.rsplit_once('.')?;
    if !verify_hmac(payload, signature, secret) {
        tracing::warn!("Session token with invalid signature");
        return None;
    }

    let (account_id, issued_at) = payload.split_once('.')?;
    let account_id: u64 = account_id.parse().ok()?;
    let issued_at: i64 = issued_at.parse().ok()?;

    if !validate_timestamp(issued_at, max_age_secs) {
        return None;
    }

    Some(account_id)
}

// =============================================================================
// Extractors
// =============================================================================

/// The logged-in account
///
/// Handlers taking this extractor require a login: anonymous visitors are
/// redirected to `/login` with a flash message. Use `Option<CurrentAccount>`
/// on public pages.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

async fn load_account(headers: &HeaderMap, state: &AppState) -> Result<Option<Account>> {
    let Some(token) = cookie_value(headers, SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(account_id) = verify_token(
        token,
        &state.config.session_secret,
        state.config.session_max_age_secs,
    ) else {
        return Ok(None);
    };

    let db = state.db.clone();
    let record = tokio::task::spawn_blocking(move || db::get_account(&db, account_id)).await??;

    Ok(record.map(|r| Account::from_record(account_id, r)))
}

/// Redirect to the login page with the login-required notice
pub fn login_redirect() -> Response {
    (
        [(header::SET_COOKIE, flash_cookie(MSG_LOGIN_REQUIRED))],
        Redirect::to("/login"),
    )
        .into_response()
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        match load_account(&parts.headers, state).await {
            Ok(Some(account)) => Ok(CurrentAccount(account)),
            Ok(None) => Err(login_redirect()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// Flash message left by the previous response, if any
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let message = cookie_value(&parts.headers, FLASH_COOKIE)
            .filter(|value| !value.is_empty())
            .and_then(|value| hex::decode(value).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok());

        Ok(Flash(message))
    }
}
