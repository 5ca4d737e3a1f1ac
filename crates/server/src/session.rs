// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated routes.
//!
//! A session token is read from `Authorization: Bearer <token>` or, failing
//! that, from the `session` cookie set at login.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use portcall_api::{AuthenticatedActor, AuthenticationService};
use portcall_domain::User;
use tracing::{debug, warn};

use crate::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Extractor for an authenticated user.
///
/// ```ignore
/// async fn my_handler(
///     SessionUser(actor, user): SessionUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     // user: User
/// }
/// ```
///
/// # Errors
///
/// Rejects with 401 if no token is present, or the session is unknown,
/// expired, or belongs to an inactive user.
pub struct SessionUser(pub AuthenticatedActor, pub User);

/// Returns the session token carried by a request, if any.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer: Option<String> = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Builds the `Set-Cookie` value for a fresh session.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        AuthenticationService::SESSION_EXPIRATION.whole_seconds()
    )
}

/// Builds the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = session_token(&parts.headers).ok_or_else(|| {
            debug!("Request carries no session token");
            SessionError::MissingToken
        })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, user) = AuthenticationService::validate_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;

        debug!(user_id = actor.user_id, role = actor.role.as_str(), "Session validated");
        Ok(Self(actor, user))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Neither a bearer token nor a session cookie was sent.
    MissingToken,
    /// The token did not resolve to a live session.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingToken => String::from("Authentication required"),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        crate::HttpError {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
        .into_response()
    }
}
