// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewVesselCall, RepositoryError, VesselCallPatch, VesselCallRepository};
use portcall_domain::{VesselCall, parse_day_month_time};
use std::collections::{BTreeMap, HashSet};
use time::PrimitiveDateTime;

pub fn at(text: &str) -> PrimitiveDateTime {
    parse_day_month_time(text, 2026).unwrap()
}

pub fn create_test_new_call(vessel: &str, eta: &str, operation_time: &str) -> NewVesselCall {
    NewVesselCall {
        vessel: String::from(vessel),
        loa: 180.0,
        operation_time: String::from(operation_time),
        eta: Some(at(eta)),
        cargo: String::from("Bulk"),
    }
}

/// A vessel-call store held in memory.
///
/// Writes of derived timestamps for ids in `fail_derived_writes` are refused.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    pub records: BTreeMap<i64, VesselCall>,
    pub next_id: i64,
    pub fail_derived_writes: HashSet<i64>,
    pub derived_writes: Vec<i64>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Stores a record as-is, bypassing validation.
    pub fn insert_raw(&mut self, call: &VesselCall) -> i64 {
        let id: i64 = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            VesselCall::with_id(
                id,
                call.vessel().to_string(),
                call.loa(),
                call.operation_time().to_string(),
                call.eta(),
                call.derived(),
                call.cargo().to_string(),
            ),
        );
        id
    }

    pub fn record(&self, id: i64) -> &VesselCall {
        &self.records[&id]
    }
}

impl VesselCallRepository for InMemoryRepository {
    fn list_all(&mut self) -> Result<Vec<VesselCall>, RepositoryError> {
        // Reverse to make sure callers do not rely on store order
        Ok(self.records.values().rev().cloned().collect())
    }

    fn get(&mut self, vessel_call_id: i64) -> Result<VesselCall, RepositoryError> {
        self.records
            .get(&vessel_call_id)
            .cloned()
            .ok_or(RepositoryError::NotFound(vessel_call_id))
    }

    fn create(&mut self, call: &NewVesselCall) -> Result<VesselCall, RepositoryError> {
        let new: VesselCall = VesselCall::new(
            call.vessel.clone(),
            call.loa,
            call.operation_time.clone(),
            call.eta,
            call.cargo.clone(),
        );
        let id: i64 = self.insert_raw(&new);
        Ok(self.records[&id].clone())
    }

    fn update(
        &mut self,
        vessel_call_id: i64,
        patch: &VesselCallPatch,
    ) -> Result<VesselCall, RepositoryError> {
        let existing: VesselCall = self.get(vessel_call_id)?;
        if patch.derived.is_some() {
            if self.fail_derived_writes.contains(&vessel_call_id) {
                return Err(RepositoryError::Backend(String::from("disk full")));
            }
            self.derived_writes.push(vessel_call_id);
        }
        let updated: VesselCall = patch.apply_to(&existing, vessel_call_id);
        self.records.insert(vessel_call_id, updated.clone());
        Ok(updated)
    }

    fn delete(&mut self, vessel_call_id: i64) -> Result<(), RepositoryError> {
        self.records
            .remove(&vessel_call_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(vessel_call_id))
    }
}
