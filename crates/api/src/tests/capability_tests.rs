// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_admin, create_test_collaborator, create_test_external};
use crate::{
    Capability, GlobalCapabilities, ScheduleCapabilities, compute_global_capabilities,
    compute_schedule_capabilities,
};

#[test]
fn test_admin_has_every_capability() {
    let caps: GlobalCapabilities = compute_global_capabilities(&create_test_admin());

    assert!(caps.can_manage_directory.is_allowed());
    assert!(caps.can_manage_users.is_allowed());
    assert!(caps.schedule.can_create.is_allowed());
    assert!(caps.schedule.can_recalculate.is_allowed());
}

#[test]
fn test_read_only_roles_have_no_write_capability() {
    for actor in [create_test_collaborator(), create_test_external()] {
        let caps: ScheduleCapabilities = compute_schedule_capabilities(&actor);
        assert_eq!(caps.can_create, Capability::Denied);
        assert_eq!(caps.can_edit, Capability::Denied);
        assert_eq!(caps.can_delete, Capability::Denied);
        assert_eq!(caps.can_import, Capability::Denied);
        assert!(!compute_global_capabilities(&actor).can_manage_users.is_allowed());
    }
}

#[test]
fn test_capabilities_serialize_as_booleans() {
    let caps: ScheduleCapabilities = compute_schedule_capabilities(&create_test_external());

    let json: serde_json::Value = serde_json::to_value(caps).unwrap();

    assert_eq!(json["can_create"], serde_json::Value::Bool(false));
}
