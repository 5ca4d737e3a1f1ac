// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use portcall::RepositoryError;
use portcall_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// The requested vessel call was not found.
    VesselCallNotFound(i64),
    /// The requested agency was not found.
    AgencyNotFound(i64),
    /// The requested ship was not found.
    ShipNotFound(i64),
    /// The requested user was not found.
    UserNotFound(String),
    /// The email address is already registered.
    DuplicateEmail(String),
    /// The agency still has ships or users attached.
    AgencyReferenced { agency_id: i64 },
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ReconstructionError(msg) => write!(f, "Stored data is invalid: {msg}"),
            Self::VesselCallNotFound(id) => write!(f, "Vessel call not found: {id}"),
            Self::AgencyNotFound(id) => write!(f, "Agency not found: {id}"),
            Self::ShipNotFound(id) => write!(f, "Ship not found: {id}"),
            Self::UserNotFound(msg) => write!(f, "User not found: {msg}"),
            Self::DuplicateEmail(email) => write!(f, "Email already registered: {email}"),
            Self::AgencyReferenced { agency_id } => {
                write!(
                    f,
                    "Agency {agency_id} cannot be deleted: ships or users still reference it"
                )
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}

impl From<PersistenceError> for RepositoryError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::VesselCallNotFound(id) => Self::NotFound(id),
            other => Self::Backend(other.to_string()),
        }
    }
}
