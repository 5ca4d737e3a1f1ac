// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{at, create_test_new_call};
use crate::{Persistence, PersistenceError};
use portcall::{Command, TransitionResult, VesselCallPatch, apply};
use portcall_domain::{DerivedTimes, VesselCall};

fn sample_derived() -> DerivedTimes {
    DerivedTimes {
        pilot_on_board: at("01/01 09:00"),
        berthing_time: at("01/01 10:00"),
        operation_complete: at("01/01 12:00"),
        departure_time: at("01/01 13:00"),
    }
}

#[test]
fn test_created_vessel_call_has_no_derived_times() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let id: i64 = persistence
        .create_vessel_call(&create_test_new_call("MARIA", "01/01 08:00", "02:00"))
        .unwrap();
    let stored: VesselCall = persistence.get_vessel_call(id).unwrap();

    assert_eq!(stored.vessel_call_id(), Some(id));
    assert_eq!(stored.vessel(), "MARIA");
    assert_eq!(stored.operation_time(), "02:00");
    assert_eq!(stored.eta(), Some(at("01/01 08:00")));
    assert!(stored.derived().is_none());
}

#[test]
fn test_derived_times_are_written_back() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vessel_call(&create_test_new_call("MARIA", "01/01 08:00", "02:00"))
        .unwrap();

    persistence
        .update_vessel_call(id, &VesselCallPatch::derived(sample_derived()))
        .unwrap();

    let stored: VesselCall = persistence.get_vessel_call(id).unwrap();
    assert_eq!(stored.derived(), Some(sample_derived()));
    assert_eq!(stored.vessel(), "MARIA");
}

#[test]
fn test_input_patch_leaves_other_fields_alone() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vessel_call(&create_test_new_call("MARIA", "01/01 08:00", "02:00"))
        .unwrap();
    persistence
        .update_vessel_call(id, &VesselCallPatch::derived(sample_derived()))
        .unwrap();

    persistence
        .update_vessel_call(
            id,
            &VesselCallPatch {
                cargo: Some(String::from("Coal")),
                ..VesselCallPatch::default()
            },
        )
        .unwrap();

    let stored: VesselCall = persistence.get_vessel_call(id).unwrap();
    assert_eq!(stored.cargo(), "Coal");
    assert_eq!(stored.eta(), Some(at("01/01 08:00")));
    assert_eq!(stored.derived(), Some(sample_derived()));
}

#[test]
fn test_missing_vessel_call_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence.get_vessel_call(42).unwrap_err(),
        PersistenceError::VesselCallNotFound(42)
    );
    assert_eq!(
        persistence
            .update_vessel_call(42, &VesselCallPatch::derived(sample_derived()))
            .unwrap_err(),
        PersistenceError::VesselCallNotFound(42)
    );
    assert_eq!(
        persistence.delete_vessel_call(42).unwrap_err(),
        PersistenceError::VesselCallNotFound(42)
    );
}

#[test]
fn test_delete_removes_row() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id: i64 = persistence
        .create_vessel_call(&create_test_new_call("MARIA", "01/01 08:00", "02:00"))
        .unwrap();

    persistence.delete_vessel_call(id).unwrap();

    assert!(persistence.list_vessel_calls().unwrap().is_empty());
}

#[test]
fn test_schedule_commands_cascade_through_sqlite() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    apply(
        &mut persistence,
        Command::CreateVesselCall(create_test_new_call("BRAVO", "01/01 09:00", "01:00")),
    )
    .unwrap();
    let result: TransitionResult = apply(
        &mut persistence,
        Command::CreateVesselCall(create_test_new_call("ALPHA", "01/01 08:00", "02:00")),
    )
    .unwrap();

    assert!(result.report.is_complete());
    assert_eq!(result.schedule[0].vessel(), "ALPHA");
    let bravo: DerivedTimes = result.schedule[1].derived().unwrap();
    assert_eq!(bravo.pilot_on_board, at("01/01 14:00"));
    assert_eq!(bravo.departure_time, at("01/01 17:00"));

    // The stored rows match what the cascade reported
    let stored: Vec<VesselCall> = persistence.list_vessel_calls().unwrap();
    let stored_bravo: &VesselCall = stored.iter().find(|c| c.vessel() == "BRAVO").unwrap();
    assert_eq!(stored_bravo.derived(), Some(bravo));
}

#[test]
fn test_delete_command_through_sqlite_reflows_schedule() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first: TransitionResult = apply(
        &mut persistence,
        Command::ImportVesselCalls(vec![
            create_test_new_call("ALPHA", "01/01 08:00", "02:00"),
            create_test_new_call("BRAVO", "01/01 09:00", "01:00"),
        ]),
    )
    .unwrap();
    let alpha_id: i64 = first.schedule[0].vessel_call_id().unwrap();

    let result: TransitionResult = apply(
        &mut persistence,
        Command::DeleteVesselCall {
            vessel_call_id: alpha_id,
        },
    )
    .unwrap();

    assert_eq!(result.schedule.len(), 1);
    assert_eq!(
        result.schedule[0].derived().unwrap().pilot_on_board,
        at("01/01 10:00")
    );
}
