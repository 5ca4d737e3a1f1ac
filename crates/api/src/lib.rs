// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the berth schedule.
//!
//! Converts request DTOs into domain values, checks authorization, drives
//! the core cascade, and maps every failure into an [`ApiError`]. Nothing
//! here knows about HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod csv_import;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use capabilities::{compute_global_capabilities, compute_schedule_capabilities};
pub use csv_import::{CsvImportPlan, parse_vessel_call_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    check_bootstrap_status, create_agency, create_first_admin, create_ship, create_user,
    create_vessel_call, delete_agency, delete_ship, delete_user, delete_vessel_call, get_agency,
    get_ship, get_user, get_vessel_call, import_vessel_calls_csv, list_agencies,
    list_available_ships, list_schedule, list_ships, list_users, login, logout,
    recalculate_schedule, update_agency, update_ship, update_user, update_vessel_call, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AgencyInfo, AgencyRequest, BootstrapStatusResponse, Capability, CreateFirstAdminRequest,
    CreateUserRequest, CreateVesselCallRequest, CsvImportResponse, CsvRowInfo, GlobalCapabilities,
    LoginRequest, LoginResponse, ScheduleCapabilities, ScheduleMutationResponse, ScheduleResponse,
    ShipInfo, ShipRequest, SkippedRecordInfo, UpdateUserRequest, UpdateVesselCallRequest,
    UserInfo, VesselCallInfo, WhoAmIResponse, WriteFailureInfo,
};
