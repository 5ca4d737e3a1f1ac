// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use portcall_domain::{DerivedTimes, VesselCall};
use time::PrimitiveDateTime;

/// Operator-supplied fields of a vessel call about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVesselCall {
    pub vessel: String,
    pub loa: f64,
    /// `hours:minutes`, as entered.
    pub operation_time: String,
    pub eta: Option<PrimitiveDateTime>,
    pub cargo: String,
}

/// A partial update of a stored vessel call.
///
/// `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VesselCallPatch {
    pub vessel: Option<String>,
    pub loa: Option<f64>,
    pub operation_time: Option<String>,
    pub eta: Option<PrimitiveDateTime>,
    pub cargo: Option<String>,
    pub derived: Option<DerivedTimes>,
}

impl VesselCallPatch {
    /// A patch replacing only the derived timestamps.
    #[must_use]
    pub fn derived(derived: DerivedTimes) -> Self {
        Self {
            derived: Some(derived),
            ..Self::default()
        }
    }

    /// Returns whether the patch touches any operator input.
    #[must_use]
    pub const fn has_input_changes(&self) -> bool {
        self.vessel.is_some()
            || self.loa.is_some()
            || self.operation_time.is_some()
            || self.eta.is_some()
            || self.cargo.is_some()
    }

    /// Applies the patch to a vessel call, producing the updated record.
    #[must_use]
    pub fn apply_to(&self, call: &VesselCall, vessel_call_id: i64) -> VesselCall {
        VesselCall::with_id(
            vessel_call_id,
            self.vessel
                .clone()
                .unwrap_or_else(|| call.vessel().to_string()),
            self.loa.unwrap_or_else(|| call.loa()),
            self.operation_time
                .clone()
                .unwrap_or_else(|| call.operation_time().to_string()),
            self.eta.or_else(|| call.eta()),
            self.derived.or_else(|| call.derived()),
            self.cargo
                .clone()
                .unwrap_or_else(|| call.cargo().to_string()),
        )
    }
}

/// Errors a vessel-call store may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No vessel call with this id exists.
    NotFound(i64),
    /// The store failed.
    Backend(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Vessel call {id} not found"),
            Self::Backend(msg) => write!(f, "Repository failure: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// The record store the schedule is kept in.
///
/// `list_all` makes no ordering promise; callers sort.
pub trait VesselCallRepository {
    /// Returns every vessel call in the open schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all(&mut self) -> Result<Vec<VesselCall>, RepositoryError>;

    /// Returns one vessel call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is unknown.
    fn get(&mut self, vessel_call_id: i64) -> Result<VesselCall, RepositoryError>;

    /// Stores a new vessel call and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the record.
    fn create(&mut self, call: &NewVesselCall) -> Result<VesselCall, RepositoryError>;

    /// Applies a patch and returns the updated vessel call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is unknown.
    fn update(
        &mut self,
        vessel_call_id: i64,
        patch: &VesselCallPatch,
    ) -> Result<VesselCall, RepositoryError>;

    /// Removes a vessel call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is unknown.
    fn delete(&mut self, vessel_call_id: i64) -> Result<(), RepositoryError>;
}
