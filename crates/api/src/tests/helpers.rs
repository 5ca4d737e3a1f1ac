// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use portcall_domain::PortClock;
use portcall_persistence::Persistence;

use crate::{
    AgencyInfo, AgencyRequest, AuthenticatedActor, CreateFirstAdminRequest, CreateUserRequest,
    CreateVesselCallRequest, Role, UserInfo, create_agency, create_first_admin, create_user,
};

pub const ADMIN_EMAIL: &str = "admin@port.test";
pub const ADMIN_PASSWORD: &str = "berth2026";

pub fn create_test_clock() -> PortClock {
    PortClock::utc()
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, String::from(ADMIN_EMAIL), Role::Admin)
}

pub fn create_test_collaborator() -> AuthenticatedActor {
    AuthenticatedActor::new(2, String::from("staff@port.test"), Role::Collaborator)
}

pub fn create_test_external() -> AuthenticatedActor {
    AuthenticatedActor::new(3, String::from("agent@agency.test"), Role::External)
}

/// An in-memory store whose first admin already exists.
pub fn setup_persistence_with_admin() -> (Persistence, UserInfo) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: UserInfo = create_first_admin(
        &mut persistence,
        &CreateFirstAdminRequest {
            name: String::from("Harbor Master"),
            email: String::from(ADMIN_EMAIL),
            password: String::from(ADMIN_PASSWORD),
        },
    )
    .unwrap();
    (persistence, admin)
}

/// The actor matching the stored first admin.
pub fn admin_actor(admin: &UserInfo) -> AuthenticatedActor {
    AuthenticatedActor::new(admin.user_id, admin.email.clone(), Role::Admin)
}

pub fn vessel_call_request(
    vessel: &str,
    eta: &str,
    operation_time: &str,
) -> CreateVesselCallRequest {
    CreateVesselCallRequest {
        vessel: String::from(vessel),
        loa: 189.5,
        operation_time: String::from(operation_time),
        eta: String::from(eta),
        cargo: String::from("Clinker"),
    }
}

pub fn agency_request(name: &str) -> AgencyRequest {
    AgencyRequest {
        name: String::from(name),
        kind: String::from("RawMaterial"),
        phone: String::from("+52 229 000 0000"),
        email: format!("ops@{}.test", name.to_lowercase()),
        status: None,
    }
}

pub fn create_test_agency(persistence: &mut Persistence, name: &str) -> AgencyInfo {
    create_agency(persistence, &create_test_admin(), &agency_request(name)).unwrap()
}

pub fn user_request(name: &str, email: &str, role: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: String::from(name),
        email: String::from(email),
        password: String::from("quay4567"),
        role: String::from(role),
        agency_id: None,
        status: None,
    }
}

pub fn create_test_user(persistence: &mut Persistence, email: &str, role: &str) -> UserInfo {
    create_user(
        persistence,
        &create_test_admin(),
        &user_request("Dock Clerk", email, role),
    )
    .unwrap()
}
