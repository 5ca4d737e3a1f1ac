// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::repository::{NewVesselCall, VesselCallPatch};

/// A command represents operator intent against the schedule as data only.
///
/// Every command ends with a cascade over the whole schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Schedule a new vessel call.
    CreateVesselCall(NewVesselCall),
    /// Change the operator inputs of a vessel call.
    EditVesselCall {
        vessel_call_id: i64,
        patch: VesselCallPatch,
    },
    /// Remove a vessel call from the schedule.
    DeleteVesselCall { vessel_call_id: i64 },
    /// Schedule several vessel calls at once. Validated all-or-none: if any
    /// fails validation nothing is written, but a write failure partway
    /// through leaves the earlier calls stored.
    ImportVesselCalls(Vec<NewVesselCall>),
    /// Recompute the schedule without changing any input.
    Recalculate,
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateVesselCall(_) => "CreateVesselCall",
            Self::EditVesselCall { .. } => "EditVesselCall",
            Self::DeleteVesselCall { .. } => "DeleteVesselCall",
            Self::ImportVesselCalls(_) => "ImportVesselCalls",
            Self::Recalculate => "Recalculate",
        }
    }
}
