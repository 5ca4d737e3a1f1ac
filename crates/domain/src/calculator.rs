// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derivation of a single vessel call's berth timestamps.
//!
//! Given a vessel's ETA and operation time, and the departure of the vessel
//! that occupied the berth before it:
//!
//! - POB is one hour after the vessel is ready. A vessel is ready at its ETA,
//!   or at the previous departure if it arrives before the berth is clear.
//! - ETB is one hour after POB.
//! - ETC is ETB plus the operation time.
//! - ETD is one hour after ETC.

use crate::duration::OperationDuration;
use crate::error::DomainError;
use crate::types::DerivedTimes;
use time::{Duration, PrimitiveDateTime};

/// Lead time from readiness to pilot boarding.
pub const PILOT_LEAD: Duration = Duration::hours(1);

/// Time from pilot boarding to berthing.
pub const BERTHING_LEAD: Duration = Duration::hours(1);

/// Time from operation completion to departure.
pub const DEPARTURE_LEAD: Duration = Duration::hours(1);

fn add(
    instant: PrimitiveDateTime,
    duration: Duration,
    operation: &str,
) -> Result<PrimitiveDateTime, DomainError> {
    instant
        .checked_add(duration)
        .ok_or_else(|| DomainError::TimestampOverflow {
            operation: operation.to_string(),
        })
}

/// Computes the derived timestamps for one vessel call.
///
/// # Arguments
///
/// * `eta` - The vessel's estimated arrival
/// * `operation` - How long the vessel occupies the berth
/// * `previous_departure` - ETD of the preceding vessel, `None` for the first
///
/// # Errors
///
/// Returns an error if any derived timestamp leaves the representable range.
pub fn compute_derived_times(
    eta: PrimitiveDateTime,
    operation: OperationDuration,
    previous_departure: Option<PrimitiveDateTime>,
) -> Result<DerivedTimes, DomainError> {
    let ready: PrimitiveDateTime = match previous_departure {
        Some(departure) if eta < departure => departure,
        _ => eta,
    };

    let pilot_on_board: PrimitiveDateTime = add(ready, PILOT_LEAD, "computing pilot on board")?;
    let berthing_time: PrimitiveDateTime =
        add(pilot_on_board, BERTHING_LEAD, "computing berthing time")?;
    let operation_complete: PrimitiveDateTime = add(
        berthing_time,
        operation.as_duration(),
        "computing operation completion",
    )?;
    let departure_time: PrimitiveDateTime =
        add(operation_complete, DEPARTURE_LEAD, "computing departure time")?;

    Ok(DerivedTimes {
        pilot_on_board,
        berthing_time,
        operation_complete,
        departure_time,
    })
}
