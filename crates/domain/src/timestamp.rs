// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Textual timestamp conventions at the schedule's I/O boundary.
//!
//! The schedule itself works on comparable port-local instants
//! (`time::PrimitiveDateTime`). Text appears in three shapes:
//!
//! - `DD/MM HH:mm`: what operators type and read. No year; the year is
//!   supplied by the [`PortClock`].
//! - ISO 8601 with or without an offset: what API clients may send. Offset
//!   timestamps are converted to the port's wall-clock time.
//! - `YYYY-MM-DDTHH:MM:SS`: the persisted representation.
//!
//! ## Known limitation
//!
//! The implicit year is ambiguous across a year boundary: `02/01 06:00`
//! entered on 31 December resolves to January of the *current* year.

use crate::clock::PortClock;
use crate::error::DomainError;
use chrono::{Datelike, Timelike};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

/// Persisted timestamp format.
const STORAGE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// ISO timestamp without seconds.
const ISO_MINUTES_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// ISO timestamp with fractional seconds.
const ISO_SUBSECOND_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

fn invalid(value: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidTimestamp {
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parses operator or API timestamp text.
///
/// Text containing `T` is treated as ISO 8601; anything else as
/// `DD/MM HH:mm` in the clock's current year.
///
/// # Errors
///
/// Returns an error if the text matches neither shape or names an
/// impossible date or time.
pub fn parse_schedule_timestamp(
    value: &str,
    clock: &PortClock,
) -> Result<PrimitiveDateTime, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(value, "timestamp is empty"));
    }

    if trimmed.contains('T') {
        parse_iso_timestamp(trimmed, clock)
    } else {
        parse_day_month_time(trimmed, clock.current_year())
    }
}

/// Parses `DD/MM HH:mm` in the given year.
///
/// Single-digit components are accepted (`5/3 6:00`).
///
/// # Errors
///
/// Returns an error if the text is malformed or the date does not exist.
pub fn parse_day_month_time(value: &str, year: i32) -> Result<PrimitiveDateTime, DomainError> {
    let mut parts = value.split_whitespace();
    let (Some(date_part), Some(time_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid(value, "expected DD/MM HH:mm"));
    };

    let (day, month) = date_part
        .split_once('/')
        .ok_or_else(|| invalid(value, "expected DD/MM"))?;
    let (hour, minute) = time_part
        .split_once(':')
        .ok_or_else(|| invalid(value, "expected HH:mm"))?;

    let component = |text: &str, name: &str| -> Result<u8, DomainError> {
        text.parse::<u8>()
            .map_err(|_| invalid(value, format!("{name} is not a number")))
    };

    let month: Month = Month::try_from(component(month, "month")?)
        .map_err(|e| invalid(value, e.to_string()))?;
    let date: Date = Date::from_calendar_date(year, month, component(day, "day")?)
        .map_err(|e| invalid(value, e.to_string()))?;
    let time: Time = Time::from_hms(component(hour, "hour")?, component(minute, "minute")?, 0)
        .map_err(|e| invalid(value, e.to_string()))?;

    Ok(PrimitiveDateTime::new(date, time))
}

/// Parses an ISO 8601 timestamp.
///
/// Without an offset the text is already port-local. With an offset (`Z`,
/// `+02:00`, ...) the instant is converted to the clock's timezone. Seconds
/// are optional in both forms.
///
/// # Errors
///
/// Returns an error if the text is not a supported ISO 8601 form.
pub fn parse_iso_timestamp(
    value: &str,
    clock: &PortClock,
) -> Result<PrimitiveDateTime, DomainError> {
    let time_part: &str = value.split_once('T').map_or("", |(_, t)| t);
    let has_offset: bool =
        time_part.ends_with('Z') || time_part.contains('+') || time_part.contains('-');

    if has_offset {
        let parsed = chrono::DateTime::parse_from_rfc3339(value)
            .or_else(|_| parse_offset_minutes(value))
            .map_err(|e| invalid(value, e.to_string()))?;
        let local: chrono::NaiveDateTime = parsed.with_timezone(&clock.timezone()).naive_local();
        return naive_to_primitive(value, local);
    }

    PrimitiveDateTime::parse(value, STORAGE_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(value, ISO_MINUTES_FORMAT))
        .or_else(|_| PrimitiveDateTime::parse(value, ISO_SUBSECOND_FORMAT))
        .map_err(|e| invalid(value, e.to_string()))
}

/// Parses `YYYY-MM-DDTHH:MM` followed by `Z` or a numeric offset.
fn parse_offset_minutes(
    value: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, chrono::ParseError> {
    let normalized: String = value
        .strip_suffix('Z')
        .map_or_else(|| value.to_string(), |rest| format!("{rest}+00:00"));
    chrono::DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z")
}

fn naive_to_primitive(
    value: &str,
    naive: chrono::NaiveDateTime,
) -> Result<PrimitiveDateTime, DomainError> {
    let narrow = |n: u32| u8::try_from(n).map_err(|e| invalid(value, e.to_string()));

    let month: Month =
        Month::try_from(narrow(naive.month())?).map_err(|e| invalid(value, e.to_string()))?;
    let date: Date = Date::from_calendar_date(naive.year(), month, narrow(naive.day())?)
        .map_err(|e| invalid(value, e.to_string()))?;
    let time: Time = Time::from_hms(
        narrow(naive.hour())?,
        narrow(naive.minute())?,
        narrow(naive.second())?,
    )
    .map_err(|e| invalid(value, e.to_string()))?;

    Ok(PrimitiveDateTime::new(date, time))
}

/// Formats an instant as `DD/MM HH:mm`.
#[must_use]
pub fn format_day_month_time(instant: PrimitiveDateTime) -> String {
    format!(
        "{:02}/{:02} {:02}:{:02}",
        instant.day(),
        u8::from(instant.month()),
        instant.hour(),
        instant.minute()
    )
}

/// Formats an instant in the persisted representation.
///
/// # Errors
///
/// Returns an error if the year cannot be rendered with four digits.
pub fn format_storage_timestamp(instant: PrimitiveDateTime) -> Result<String, DomainError> {
    instant
        .format(STORAGE_FORMAT)
        .map_err(|e| DomainError::InvalidTimestamp {
            value: instant.to_string(),
            reason: e.to_string(),
        })
}

/// Parses the persisted representation.
///
/// # Errors
///
/// Returns an error if the text is not `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_storage_timestamp(value: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(value, STORAGE_FORMAT).map_err(|e| invalid(value, e.to_string()))
}
