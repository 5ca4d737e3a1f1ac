// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The port's notion of "now".
//!
//! Operators enter schedule timestamps as `DD/MM HH:mm` without a year. The
//! year is taken from the current date in the port's declared timezone, which
//! is also the zone offset-bearing ISO timestamps are converted into.

use crate::error::DomainError;
use chrono::Datelike;
use chrono_tz::Tz;

/// Resolves the current year and local wall-clock for a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortClock {
    timezone: Tz,
    fixed_year: Option<i32>,
}

impl PortClock {
    /// Creates a clock for the named IANA timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone name is unknown.
    pub fn new(timezone: &str) -> Result<Self, DomainError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self {
            timezone: tz,
            fixed_year: None,
        })
    }

    /// A clock in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self {
            timezone: Tz::UTC,
            fixed_year: None,
        }
    }

    /// A clock whose current year never changes.
    ///
    /// Used where inferred years must be reproducible, such as tests and
    /// replaying an import.
    #[must_use]
    pub const fn fixed_year(timezone: Tz, year: i32) -> Self {
        Self {
            timezone,
            fixed_year: Some(year),
        }
    }

    /// Returns the port timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the current calendar year at the port.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.fixed_year
            .unwrap_or_else(|| chrono::Utc::now().with_timezone(&self.timezone).year())
    }
}

impl Default for PortClock {
    fn default() -> Self {
        Self::utc()
    }
}
