// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell a client which controls to offer. They are advisory
//! only; every handler re-checks through `AuthorizationService`.

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::{Capability, GlobalCapabilities, ScheduleCapabilities};

/// Computes what the actor may do to the berth schedule.
#[must_use]
pub const fn compute_schedule_capabilities(actor: &AuthenticatedActor) -> ScheduleCapabilities {
    let allowed: Capability = Capability::from_bool(matches!(actor.role, Role::Admin));
    ScheduleCapabilities {
        can_create: allowed,
        can_edit: allowed,
        can_delete: allowed,
        can_recalculate: allowed,
        can_import: allowed,
    }
}

/// Computes account-wide capabilities.
#[must_use]
pub const fn compute_global_capabilities(actor: &AuthenticatedActor) -> GlobalCapabilities {
    let is_admin: bool = matches!(actor.role, Role::Admin);
    GlobalCapabilities {
        schedule: compute_schedule_capabilities(actor),
        can_manage_directory: Capability::from_bool(is_admin),
        can_manage_users: Capability::from_bool(is_admin),
    }
}
