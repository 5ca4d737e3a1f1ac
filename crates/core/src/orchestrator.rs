// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applying a cascade back through the record store.
//!
//! Writes are issued one record at a time in berth order, and only for
//! records whose derived timestamps changed. A failed write is logged and
//! recorded; the remaining records are still attempted. There is no
//! rollback: callers reload the schedule afterwards and report failures.

use crate::error::CoreError;
use crate::repository::{RepositoryError, VesselCallPatch, VesselCallRepository};
use portcall_domain::{
    CascadeOutcome, ChangeScope, SkippedRecord, VesselCall, recompute_cascade, sort_schedule,
};
use tracing::{debug, info, warn};

/// A derived-timestamp write that the store refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub vessel_call_id: i64,
    pub error: RepositoryError,
}

/// What a cascade did to the stored schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationReport {
    pub scope: ChangeScope,
    /// Ids whose derived timestamps were written.
    pub written: Vec<i64>,
    /// Records left unrecomputed because their inputs are invalid.
    pub skipped: Vec<SkippedRecord>,
    pub failures: Vec<WriteFailure>,
}

impl PropagationReport {
    /// Returns whether every changed record was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The in-memory result of a cascade plus the report of its writes.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeRun {
    /// The recomputed schedule in berth order, as computed.
    pub records: Vec<VesselCall>,
    pub report: PropagationReport,
}

/// Reloads the schedule from the store in berth order.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn load_schedule<R: VesselCallRepository>(
    repository: &mut R,
) -> Result<Vec<VesselCall>, CoreError> {
    let mut records: Vec<VesselCall> = repository.list_all()?;
    sort_schedule(&mut records);
    Ok(records)
}

/// Recomputes the whole schedule and writes every changed record back.
///
/// # Arguments
///
/// * `repository` - The record store
/// * `scope` - The position of the mutated record, or `ChangeScope::All`
///
/// # Errors
///
/// Returns an error if the schedule cannot be loaded or `scope` names a
/// position outside it. Individual write failures are reported in the
/// returned `PropagationReport`, not as an error.
pub fn recompute_and_propagate<R: VesselCallRepository>(
    repository: &mut R,
    scope: ChangeScope,
) -> Result<CascadeRun, CoreError> {
    let records: Vec<VesselCall> = load_schedule(repository)?;
    info!(?scope, records = records.len(), "Starting schedule cascade");

    let outcome: CascadeOutcome = recompute_cascade(&records, scope)?;

    for skipped in &outcome.skipped {
        warn!(
            index = skipped.index,
            vessel_call_id = ?skipped.vessel_call_id,
            error = %skipped.error,
            "Skipping vessel call with invalid schedule inputs"
        );
    }

    let mut written: Vec<i64> = Vec::new();
    let mut failures: Vec<WriteFailure> = Vec::new();

    for call in outcome.changed_records() {
        let (Some(vessel_call_id), Some(derived)) = (call.vessel_call_id(), call.derived()) else {
            continue;
        };

        match repository.update(vessel_call_id, &VesselCallPatch::derived(derived)) {
            Ok(_) => {
                debug!(vessel_call_id, "Wrote recomputed timestamps");
                written.push(vessel_call_id);
            }
            Err(error) => {
                warn!(
                    vessel_call_id,
                    error = %error,
                    "Failed to write recomputed timestamps"
                );
                failures.push(WriteFailure {
                    vessel_call_id,
                    error,
                });
            }
        }
    }

    info!(
        written = written.len(),
        skipped = outcome.skipped.len(),
        failed = failures.len(),
        "Schedule cascade complete"
    );

    Ok(CascadeRun {
        records: outcome.records,
        report: PropagationReport {
            scope,
            written,
            skipped: outcome.skipped,
            failures,
        },
    })
}
