// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use portcall_domain::{User, UserRole};
use portcall_persistence::{Persistence, PersistenceError, SessionData, UserRecord};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles are taken from the authenticated user's record on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Port administration staff.
    ///
    /// Admins may:
    /// - create, edit and delete vessel calls
    /// - trigger a full recalculation and bulk import
    /// - manage agencies, ships and users
    Admin,
    /// Internal staff with read access to the schedule and directory.
    Collaborator,
    /// Agency staff with read access to the schedule and directory.
    External,
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Collaborator => Self::Collaborator,
            UserRole::External => Self::External,
        }
    }
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Collaborator => "Collaborator",
            Self::External => "External",
        }
    }
}

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's canonical id.
    pub user_id: i64,
    /// The user's email, used as the login identifier.
    pub email: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, email: String, role: Role) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Collaborator | Role::External => {
                warn!(
                    user_id = actor.user_id,
                    role = actor.role.as_str(),
                    action,
                    "Refused unauthorized action"
                );
                Err(AuthError::Unauthorized {
                    action: action.to_string(),
                    required_role: String::from("Admin"),
                })
            }
        }
    }

    /// Checks if an actor may create, edit, delete, import or recalculate
    /// vessel calls.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action name reported on refusal
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_schedule_mutation(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require_admin(actor, action)
    }

    /// Checks if an actor may change agencies or ships.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_directory_mutation(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require_admin(actor, action)
    }

    /// Checks if an actor may list or manage user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_user_management(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require_admin(actor, action)
    }
}

/// Session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    pub const SESSION_EXPIRATION: Duration = Duration::hours(8);

    /// Verifies credentials and opens a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The login email, matched case-insensitively
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the user is inactive,
    /// or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, User), AuthError> {
        let record: UserRecord = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                info!(email, "Login refused: unknown email");
                Self::invalid_credentials()
            })?;

        let valid: bool = bcrypt::verify(password, &record.password_hash).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to verify password: {e}"),
            }
        })?;
        if !valid {
            info!(email, "Login refused: wrong password");
            return Err(Self::invalid_credentials());
        }

        if !record.user.status.is_active() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User is inactive"),
            });
        }

        let user_id: i64 = Self::stored_id(&record.user)?;
        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + Self::SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;
        persistence
            .update_last_login(user_id)
            .map_err(Self::map_persistence_error)?;

        info!(user_id, "User logged in");
        let actor: AuthenticatedActor =
            AuthenticatedActor::new(user_id, record.user.email.clone(), record.user.role.into());

        Ok((session_token, actor, record.user))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// Expired sessions are deleted on sight.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its user is
    /// gone or inactive.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, User), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            persistence
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let record: UserRecord = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if !record.user.status.is_active() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User is inactive"),
            });
        }

        let actor: AuthenticatedActor = AuthenticatedActor::new(
            session.user_id,
            record.user.email.clone(),
            record.user.role.into(),
        );

        Ok((actor, record.user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        }
    }

    fn stored_id(user: &User) -> Result<i64, AuthError> {
        user.user_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("User record has no id"),
        })
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
