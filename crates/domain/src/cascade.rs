// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule-wide recomputation of derived timestamps.
//!
//! The berth is shared, so each vessel's derived timestamps depend on the
//! departure of the vessel before it in ETA order. After any mutation every
//! record is recomputed from the start of the schedule, using the freshly
//! recomputed departure of its predecessor.
//!
//! A record whose ETA or operation time cannot be parsed is skipped: it keeps
//! whatever derived timestamps it had. The next record chains from the
//! skipped record's stored departure. A skipped record with no stored
//! departure leaves the berth as the previous record left it.

use crate::calculator::compute_derived_times;
use crate::error::DomainError;
use crate::types::{DerivedTimes, VesselCall};
use std::cmp::Ordering;
use time::PrimitiveDateTime;

/// Which part of the schedule a mutation affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeScope {
    /// The record at this position (in ETA order) was created or edited.
    FromIndex(usize),
    /// Position is ambiguous (bulk add, delete, repair).
    All,
}

/// A record the cascade could not recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the ETA-ordered schedule.
    pub index: usize,
    pub vessel_call_id: Option<i64>,
    pub error: DomainError,
}

/// Result of a cascade over the whole schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// The schedule in ETA order with derived timestamps replaced.
    pub records: Vec<VesselCall>,
    /// Positions whose derived timestamps differ from the input.
    pub changed: Vec<usize>,
    /// Records left unrecomputed.
    pub skipped: Vec<SkippedRecord>,
}

impl CascadeOutcome {
    /// Returns the records whose derived timestamps changed.
    pub fn changed_records(&self) -> impl Iterator<Item = &VesselCall> {
        self.changed.iter().filter_map(|&i| self.records.get(i))
    }
}

/// Orders two vessel calls by berth sequence.
///
/// ETA ascending; records without an ETA come last; ties are broken by id so
/// the order is total and independent of input order.
#[must_use]
pub fn schedule_order(a: &VesselCall, b: &VesselCall) -> Ordering {
    match (a.eta(), b.eta()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.vessel_call_id().cmp(&b.vessel_call_id()))
}

/// Sorts a schedule into berth sequence.
pub fn sort_schedule(records: &mut [VesselCall]) {
    records.sort_by(schedule_order);
}

/// Returns the position of a vessel call in an ordered schedule.
#[must_use]
pub fn position_of(records: &[VesselCall], vessel_call_id: i64) -> Option<usize> {
    records
        .iter()
        .position(|r| r.vessel_call_id() == Some(vessel_call_id))
}

fn recompute_one(
    record: &VesselCall,
    previous_departure: Option<PrimitiveDateTime>,
) -> Result<DerivedTimes, DomainError> {
    let eta: PrimitiveDateTime = record.eta().ok_or(DomainError::MissingScheduleInput {
        vessel_call_id: record.vessel_call_id(),
        field: "eta",
    })?;
    let operation = record.operation_duration()?;
    compute_derived_times(eta, operation, previous_departure)
}

/// Recomputes the derived timestamps of the whole schedule.
///
/// The input is sorted into berth sequence first, so the outcome is the same
/// for any permutation of the same records. Every record is recomputed from
/// the start regardless of `scope`; the scope only has to name a real
/// position.
///
/// # Errors
///
/// Returns an error if `scope` names a position outside the schedule.
pub fn recompute_cascade(
    records: &[VesselCall],
    scope: ChangeScope,
) -> Result<CascadeOutcome, DomainError> {
    if let ChangeScope::FromIndex(index) = scope {
        if index >= records.len() {
            return Err(DomainError::ChangeIndexOutOfRange {
                index,
                len: records.len(),
            });
        }
    }

    let mut ordered: Vec<VesselCall> = records.to_vec();
    sort_schedule(&mut ordered);

    let mut changed: Vec<usize> = Vec::new();
    let mut skipped: Vec<SkippedRecord> = Vec::new();
    let mut previous_departure: Option<PrimitiveDateTime> = None;

    for (index, record) in ordered.iter_mut().enumerate() {
        match recompute_one(record, previous_departure) {
            Ok(derived) => {
                if record.derived() != Some(derived) {
                    *record = record.with_derived(derived);
                    changed.push(index);
                }
                previous_departure = Some(derived.departure_time);
            }
            Err(error) => {
                if let Some(stale) = record.derived() {
                    previous_departure = Some(stale.departure_time);
                }
                skipped.push(SkippedRecord {
                    index,
                    vessel_call_id: record.vessel_call_id(),
                    error,
                });
            }
        }
    }

    Ok(CascadeOutcome {
        records: ordered,
        changed,
        skipped,
    })
}
