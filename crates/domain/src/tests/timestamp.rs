// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{TEST_YEAR, at};
use crate::{
    DomainError, PortClock, format_day_month_time, format_storage_timestamp,
    parse_day_month_time, parse_schedule_timestamp, parse_storage_timestamp,
};
use time::{Month, PrimitiveDateTime};

fn clock() -> PortClock {
    PortClock::fixed_year(chrono_tz::UTC, TEST_YEAR)
}

#[test]
fn test_day_month_uses_clock_year() {
    let parsed: PrimitiveDateTime = parse_schedule_timestamp("05/03 06:00", &clock()).unwrap();

    assert_eq!(parsed.year(), TEST_YEAR);
    assert_eq!(parsed.month(), Month::March);
    assert_eq!(parsed.day(), 5);
    assert_eq!(parsed.hour(), 6);
    assert_eq!(parsed.minute(), 0);
}

#[test]
fn test_single_digit_components_are_accepted() {
    assert_eq!(
        parse_day_month_time("5/3 6:05", TEST_YEAR).unwrap(),
        at("05/03 06:05")
    );
}

#[test]
fn test_impossible_dates_are_rejected() {
    for text in ["31/02 10:00", "00/01 10:00", "10/13 10:00", "10/10 24:00", "10/10 10:60"] {
        let result: Result<PrimitiveDateTime, DomainError> = parse_day_month_time(text, TEST_YEAR);
        assert!(
            matches!(result, Err(DomainError::InvalidTimestamp { .. })),
            "{text} should be rejected"
        );
    }
}

#[test]
fn test_malformed_text_is_rejected() {
    for text in ["", "tomorrow", "05/03", "05-03 06:00", "05/03 06:00 extra"] {
        let result: Result<PrimitiveDateTime, DomainError> =
            parse_schedule_timestamp(text, &clock());
        assert!(result.is_err(), "{text:?} should be rejected");
        assert!(result.unwrap_err().is_parse_error());
    }
}

#[test]
fn test_iso_without_offset_is_port_local() {
    let parsed: PrimitiveDateTime =
        parse_schedule_timestamp("2026-03-05T06:00:00", &clock()).unwrap();
    assert_eq!(parsed, at("05/03 06:00"));

    let short: PrimitiveDateTime = parse_schedule_timestamp("2026-03-05T06:00", &clock()).unwrap();
    assert_eq!(short, at("05/03 06:00"));
}

#[test]
fn test_iso_with_offset_is_converted_to_port_time() {
    let santiago: PortClock = PortClock::fixed_year(chrono_tz::America::Santiago, TEST_YEAR);

    // March in Santiago is UTC-3
    let parsed: PrimitiveDateTime =
        parse_schedule_timestamp("2026-03-05T12:00:00Z", &santiago).unwrap();
    assert_eq!(parsed, at("05/03 09:00"));

    let offset: PrimitiveDateTime =
        parse_schedule_timestamp("2026-03-05T12:00:00+01:00", &clock()).unwrap();
    assert_eq!(offset, at("05/03 11:00"));
}

#[test]
fn test_iso_with_offset_and_no_seconds() {
    let utc: PrimitiveDateTime = parse_schedule_timestamp("2026-03-05T06:00Z", &clock()).unwrap();
    assert_eq!(utc, at("05/03 06:00"));

    let offset: PrimitiveDateTime =
        parse_schedule_timestamp("2026-03-05T06:00+02:00", &clock()).unwrap();
    assert_eq!(offset, at("05/03 04:00"));

    assert!(parse_schedule_timestamp("2026-03-05T06Z", &clock()).is_err());
}

#[test]
fn test_day_month_formatting() {
    assert_eq!(format_day_month_time(at("05/03 06:00")), "05/03 06:00");
    assert_eq!(format_day_month_time(at("5/11 23:59")), "05/11 23:59");
}

#[test]
fn test_storage_format() {
    let formatted: String = format_storage_timestamp(at("05/03 06:07")).unwrap();
    assert_eq!(formatted, "2026-03-05T06:07:00");
    assert_eq!(parse_storage_timestamp(&formatted).unwrap(), at("05/03 06:07"));
}

#[test]
fn test_storage_format_rejects_day_month_text() {
    assert!(parse_storage_timestamp("05/03 06:07").is_err());
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert_eq!(
        PortClock::new("Mars/Olympus_Mons"),
        Err(DomainError::InvalidTimezone(String::from(
            "Mars/Olympus_Mons"
        )))
    );
    assert!(PortClock::new("America/Santiago").is_ok());
}
