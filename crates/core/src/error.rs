// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::repository::RepositoryError;
use portcall_domain::DomainError;

/// Errors that can occur while applying a schedule command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The command targets a vessel call that does not exist.
    VesselCallNotFound(i64),
    /// The record store failed outside cascade propagation.
    Repository(RepositoryError),
    /// Another cascade over the schedule has not finished.
    CascadeInProgress,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::VesselCallNotFound(id) => write!(f, "Vessel call {id} not found"),
            Self::Repository(err) => write!(f, "{err}"),
            Self::CascadeInProgress => {
                write!(f, "The schedule is being recalculated; try again shortly")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::VesselCallNotFound(id),
            RepositoryError::Backend(_) => Self::Repository(err),
        }
    }
}
