// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How long a vessel occupies the berth once berthed.
///
/// Entered by operators as `hours:minutes`. Minutes of 60 or more are carried
/// into hours, so `"1:90"` is the same duration as `"2:30"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationDuration {
    total_minutes: u32,
}

impl OperationDuration {
    /// Creates a duration from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the total does not fit.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, DomainError> {
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .map(|total_minutes| Self { total_minutes })
            .ok_or_else(|| DomainError::InvalidOperationDuration {
                value: format!("{hours}:{minutes}"),
                reason: String::from("duration is too large"),
            })
    }

    /// Parses `hours:minutes` text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not two non-negative integers
    /// separated by a colon.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidOperationDuration {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(invalid("operation time is empty"));
        }

        let (hours, minutes) = trimmed
            .split_once(':')
            .ok_or_else(|| invalid("expected hours:minutes"))?;

        let hours: u32 = hours
            .trim()
            .parse()
            .map_err(|_| invalid("hours must be a non-negative integer"))?;
        let minutes: u32 = minutes
            .trim()
            .parse()
            .map_err(|_| invalid("minutes must be a non-negative integer"))?;

        Self::new(hours, minutes).map_err(|_| invalid("duration is too large"))
    }

    /// Returns the total length in minutes.
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    /// Returns the whole hours component.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.total_minutes / 60
    }

    /// Returns the minutes component (0-59).
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.total_minutes % 60
    }

    /// Converts to a `time::Duration` for instant arithmetic.
    #[must_use]
    pub fn as_duration(&self) -> time::Duration {
        time::Duration::minutes(i64::from(self.total_minutes))
    }
}

impl FromStr for OperationDuration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for OperationDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}
