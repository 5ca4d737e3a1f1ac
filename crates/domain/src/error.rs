// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and schedule calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A timestamp could not be parsed into a valid instant.
    InvalidTimestamp {
        /// The offending text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
    /// An operation duration could not be parsed as `hours:minutes`.
    InvalidOperationDuration {
        /// The offending text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A vessel call lacks an input the schedule calculator requires.
    MissingScheduleInput {
        /// The vessel call, if persisted.
        vessel_call_id: Option<i64>,
        /// The missing field (`eta` or `operation_time`).
        field: &'static str,
    },
    /// Adding a duration to an instant left the representable range.
    TimestampOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The vessel already has a call in the open schedule.
    DuplicateVessel {
        /// The vessel name.
        vessel: String,
    },
    /// Vessel name is empty or invalid.
    InvalidVesselName(String),
    /// Length overall is not a finite, non-negative number.
    InvalidLoa(String),
    /// The change position does not exist in the schedule.
    ChangeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The schedule length.
        len: usize,
    },
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Agency name is empty or invalid.
    InvalidAgencyName(String),
    /// Ship name is empty or invalid.
    InvalidShipName(String),
    /// User name is empty or invalid.
    InvalidUserName(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Unknown role name.
    InvalidRole(String),
    /// Unknown record status.
    InvalidStatus(String),
    /// Unknown cargo/agency classification.
    InvalidKind(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimestamp { value, reason } => {
                write!(f, "Invalid timestamp '{value}': {reason}")
            }
            Self::InvalidOperationDuration { value, reason } => {
                write!(f, "Invalid operation time '{value}': {reason}")
            }
            Self::MissingScheduleInput {
                vessel_call_id,
                field,
            } => match vessel_call_id {
                Some(id) => write!(f, "Vessel call {id} has no {field}"),
                None => write!(f, "Vessel call has no {field}"),
            },
            Self::TimestampOverflow { operation } => {
                write!(f, "Timestamp overflow while {operation}")
            }
            Self::DuplicateVessel { vessel } => {
                write!(f, "Vessel '{vessel}' is already in the schedule")
            }
            Self::InvalidVesselName(msg) => write!(f, "Invalid vessel name: {msg}"),
            Self::InvalidLoa(msg) => write!(f, "Invalid LOA: {msg}"),
            Self::ChangeIndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Change index {index} is out of range for a schedule of {len} records"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidAgencyName(msg) => write!(f, "Invalid agency name: {msg}"),
            Self::InvalidShipName(msg) => write!(f, "Invalid ship name: {msg}"),
            Self::InvalidUserName(msg) => write!(f, "Invalid user name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidStatus(status) => write!(f, "Invalid status: {status}"),
            Self::InvalidKind(kind) => write!(f, "Invalid kind: {kind}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns whether this error means a schedule input could not be parsed.
    ///
    /// The cascade skips records failing with one of these instead of aborting.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp { .. }
                | Self::InvalidOperationDuration { .. }
                | Self::MissingScheduleInput { .. }
        )
    }
}
