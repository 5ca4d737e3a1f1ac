// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calculator;
mod cascade;
mod clock;
mod duration;
mod error;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calculator::{BERTHING_LEAD, DEPARTURE_LEAD, PILOT_LEAD, compute_derived_times};
pub use cascade::{
    CascadeOutcome, ChangeScope, SkippedRecord, position_of, recompute_cascade, schedule_order,
    sort_schedule,
};
pub use clock::PortClock;
pub use duration::OperationDuration;

// Re-export public types
pub use error::DomainError;
pub use timestamp::{
    format_day_month_time, format_storage_timestamp, parse_day_month_time, parse_iso_timestamp,
    parse_schedule_timestamp, parse_storage_timestamp,
};
pub use types::{
    Agency, CargoKind, DerivedTimes, RecordStatus, Ship, User, UserRole, VesselCall,
};
pub use validation::{
    available_ships, validate_agency_fields, validate_email, validate_ship_fields,
    validate_user_fields, validate_vessel_call_fields, validate_vessel_unique,
};
