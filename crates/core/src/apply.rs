// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::orchestrator::{CascadeRun, PropagationReport, load_schedule, recompute_and_propagate};
use crate::repository::{NewVesselCall, VesselCallPatch, VesselCallRepository};
use portcall_domain::{
    ChangeScope, DomainError, OperationDuration, VesselCall, position_of,
    validate_vessel_call_fields, validate_vessel_unique,
};
use tracing::info;

/// The outcome of a successfully applied command.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The vessel calls created or edited by the command.
    pub affected: Vec<i64>,
    /// The schedule reloaded from the store after the cascade, in berth order.
    pub schedule: Vec<VesselCall>,
    pub report: PropagationReport,
}

/// Checks the inputs of a vessel call that is about to be stored.
fn validate_new_call(call: &NewVesselCall) -> Result<(), DomainError> {
    validate_vessel_call_fields(&call.vessel, call.loa)?;
    if call.eta.is_none() {
        return Err(DomainError::MissingScheduleInput {
            vessel_call_id: None,
            field: "eta",
        });
    }
    OperationDuration::parse(&call.operation_time)?;
    Ok(())
}

/// Applies a command to the schedule and cascades the change.
///
/// Validation happens before any write. Once the mutation is stored the
/// whole schedule is recomputed, every changed record is written back, and
/// the schedule is reloaded from the store.
///
/// # Arguments
///
/// * `repository` - The record store holding the schedule
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - A field is invalid or the vessel is already scheduled
/// - The targeted vessel call does not exist
/// - The store fails while mutating or reloading
pub fn apply<R: VesselCallRepository>(
    repository: &mut R,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    info!(command = command.name(), "Applying schedule command");

    let (affected, scope): (Vec<i64>, ChangeScope) = match command {
        Command::CreateVesselCall(call) => {
            validate_new_call(&call)?;
            let schedule: Vec<VesselCall> = repository.list_all()?;
            validate_vessel_unique(&call.vessel, &schedule, None)?;

            let created: VesselCall = repository.create(&call)?;
            (created.vessel_call_id().into_iter().collect(), ChangeScope::All)
        }
        Command::EditVesselCall {
            vessel_call_id,
            patch,
        } => {
            let existing: VesselCall = repository.get(vessel_call_id)?;
            let edited: VesselCall = patch.apply_to(&existing, vessel_call_id);

            validate_vessel_call_fields(edited.vessel(), edited.loa())?;
            if patch.operation_time.is_some() {
                edited.operation_duration()?;
            }
            if patch.vessel.is_some() {
                let schedule: Vec<VesselCall> = repository.list_all()?;
                validate_vessel_unique(edited.vessel(), &schedule, Some(vessel_call_id))?;
            }

            let input_only: VesselCallPatch = VesselCallPatch {
                derived: None,
                ..patch
            };
            repository.update(vessel_call_id, &input_only)?;

            let schedule: Vec<VesselCall> = load_schedule(repository)?;
            let scope: ChangeScope = position_of(&schedule, vessel_call_id)
                .map_or(ChangeScope::All, ChangeScope::FromIndex);
            (vec![vessel_call_id], scope)
        }
        Command::DeleteVesselCall { vessel_call_id } => {
            repository.get(vessel_call_id)?;
            repository.delete(vessel_call_id)?;
            (Vec::new(), ChangeScope::All)
        }
        Command::ImportVesselCalls(calls) => {
            let mut known: Vec<VesselCall> = repository.list_all()?;
            for call in &calls {
                validate_new_call(call)?;
                validate_vessel_unique(&call.vessel, &known, None)?;
                known.push(VesselCall::new(
                    call.vessel.clone(),
                    call.loa,
                    call.operation_time.clone(),
                    call.eta,
                    call.cargo.clone(),
                ));
            }

            let mut created: Vec<i64> = Vec::with_capacity(calls.len());
            for call in &calls {
                created.extend(repository.create(call)?.vessel_call_id());
            }
            (created, ChangeScope::All)
        }
        Command::Recalculate => (Vec::new(), ChangeScope::All),
    };

    let run: CascadeRun = recompute_and_propagate(repository, scope)?;
    let schedule: Vec<VesselCall> = load_schedule(repository)?;

    Ok(TransitionResult {
        affected,
        schedule,
        report: run.report,
    })
}
