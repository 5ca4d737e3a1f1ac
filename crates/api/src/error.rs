// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use portcall::{CoreError, RepositoryError};
use portcall_domain::DomainError;
use portcall_persistence::PersistenceError;
use thiserror::Error;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with work already in progress.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The uploaded CSV cannot be read at all.
    #[error("Invalid CSV format: {reason}")]
    InvalidCsvFormat {
        /// Why the file was rejected.
        reason: String,
    },
    /// Password policy violation.
    #[error("Password policy violation: {message}")]
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimestamp { .. } => invalid_input("eta", &err),
        DomainError::InvalidOperationDuration { .. } => invalid_input("operation_time", &err),
        DomainError::MissingScheduleInput { field, .. } => invalid_input(field, &err),
        DomainError::TimestampOverflow { .. } => invalid_input("eta", &err),
        DomainError::DuplicateVessel { vessel } => ApiError::DomainRuleViolation {
            rule: String::from("unique_vessel"),
            message: format!("Vessel '{vessel}' already has a call in the schedule"),
        },
        DomainError::InvalidVesselName(_) => invalid_input("vessel", &err),
        DomainError::InvalidLoa(_) => invalid_input("loa", &err),
        DomainError::ChangeIndexOutOfRange { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::InvalidTimezone(_) => invalid_input("timezone", &err),
        DomainError::InvalidAgencyName(_)
        | DomainError::InvalidShipName(_)
        | DomainError::InvalidUserName(_) => invalid_input("name", &err),
        DomainError::InvalidEmail(_) => invalid_input("email", &err),
        DomainError::InvalidRole(_) => invalid_input("role", &err),
        DomainError::InvalidStatus(_) => invalid_input("status", &err),
        DomainError::InvalidKind(_) => invalid_input("kind", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::VesselCallNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Vessel call"),
            message: format!("Vessel call {id} does not exist"),
        },
        CoreError::Repository(RepositoryError::NotFound(id)) => ApiError::ResourceNotFound {
            resource_type: String::from("Vessel call"),
            message: format!("Vessel call {id} does not exist"),
        },
        CoreError::Repository(RepositoryError::Backend(message)) => ApiError::Internal { message },
        CoreError::CascadeInProgress => ApiError::Conflict {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::VesselCallNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Vessel call"),
            message: format!("Vessel call {id} does not exist"),
        },
        PersistenceError::AgencyNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Agency"),
            message: format!("Agency {id} does not exist"),
        },
        PersistenceError::ShipNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Ship"),
            message: format!("Ship {id} does not exist"),
        },
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("Email '{email}' is already registered"),
        },
        PersistenceError::AgencyReferenced { agency_id } => ApiError::DomainRuleViolation {
            rule: String::from("agency_in_use"),
            message: format!("Agency {agency_id} still has ships or users"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
