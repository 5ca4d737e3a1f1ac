// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers receive an already locked persistence layer. Callers that mutate
//! the schedule must hold a `portcall::CascadeGuard` for the whole call.

use portcall::{
    Command, NewVesselCall, PropagationReport, TransitionResult, VesselCallPatch, apply,
    load_schedule,
};
use portcall_domain::{
    Agency, CargoKind, DerivedTimes, PortClock, RecordStatus, Ship, User, UserRole, VesselCall,
    available_ships, format_day_month_time, parse_schedule_timestamp, validate_agency_fields,
    validate_ship_fields, validate_user_fields,
};
use portcall_persistence::{Persistence, SessionData, UserRecord};
use std::str::FromStr;
use time::PrimitiveDateTime;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::capabilities::{compute_global_capabilities, compute_schedule_capabilities};
use crate::csv_import::{CsvImportPlan, parse_vessel_call_csv};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AgencyInfo, AgencyRequest, BootstrapStatusResponse, CreateFirstAdminRequest,
    CreateUserRequest, CreateVesselCallRequest, CsvImportResponse, LoginRequest, LoginResponse,
    ScheduleMutationResponse, ScheduleResponse, ShipInfo, ShipRequest, SkippedRecordInfo,
    UpdateUserRequest, UpdateVesselCallRequest, UserInfo, VesselCallInfo, WhoAmIResponse,
    WriteFailureInfo,
};

// ========================================================================
// Conversions
// ========================================================================

fn missing_id(resource_type: &str) -> ApiError {
    ApiError::Internal {
        message: format!("Stored {resource_type} has no id"),
    }
}

fn vessel_call_to_info(call: &VesselCall) -> Result<VesselCallInfo, ApiError> {
    let derived: Option<DerivedTimes> = call.derived();
    Ok(VesselCallInfo {
        vessel_call_id: call
            .vessel_call_id()
            .ok_or_else(|| missing_id("vessel call"))?,
        vessel: call.vessel().to_string(),
        loa: call.loa(),
        operation_time: call.operation_time().to_string(),
        eta: call.eta().map(format_day_month_time),
        pilot_on_board: derived.map(|d| format_day_month_time(d.pilot_on_board)),
        berthing_time: derived.map(|d| format_day_month_time(d.berthing_time)),
        operation_complete: derived.map(|d| format_day_month_time(d.operation_complete)),
        departure_time: derived.map(|d| format_day_month_time(d.departure_time)),
        cargo: call.cargo().to_string(),
    })
}

fn schedule_to_info(schedule: &[VesselCall]) -> Result<Vec<VesselCallInfo>, ApiError> {
    schedule.iter().map(vessel_call_to_info).collect()
}

fn transition_to_response(
    result: &TransitionResult,
    message: String,
) -> Result<ScheduleMutationResponse, ApiError> {
    let report: &PropagationReport = &result.report;
    Ok(ScheduleMutationResponse {
        affected: result.affected.clone(),
        vessel_calls: schedule_to_info(&result.schedule)?,
        written: report.written.clone(),
        skipped: report
            .skipped
            .iter()
            .map(|s| SkippedRecordInfo {
                vessel_call_id: s.vessel_call_id,
                reason: s.error.to_string(),
            })
            .collect(),
        failures: report
            .failures
            .iter()
            .map(|f| WriteFailureInfo {
                vessel_call_id: f.vessel_call_id,
                reason: f.error.to_string(),
            })
            .collect(),
        message,
    })
}

fn agency_to_info(agency: &Agency) -> Result<AgencyInfo, ApiError> {
    Ok(AgencyInfo {
        agency_id: agency.agency_id.ok_or_else(|| missing_id("agency"))?,
        name: agency.name.clone(),
        kind: agency.kind.to_string(),
        phone: agency.phone.clone(),
        email: agency.email.clone(),
        status: agency.status.to_string(),
    })
}

fn ship_to_info(ship: &Ship) -> Result<ShipInfo, ApiError> {
    Ok(ShipInfo {
        ship_id: ship.ship_id.ok_or_else(|| missing_id("ship"))?,
        name: ship.name.clone(),
        agency_id: ship.agency_id,
        kind: ship.kind.to_string(),
        loa: ship.loa,
        status: ship.status.to_string(),
    })
}

fn user_to_info(user: &User) -> Result<UserInfo, ApiError> {
    Ok(UserInfo {
        user_id: user.user_id.ok_or_else(|| missing_id("user"))?,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        agency_id: user.agency_id,
        status: user.status.to_string(),
    })
}

fn parse_field<T: FromStr<Err = portcall_domain::DomainError>>(
    value: &str,
) -> Result<T, ApiError> {
    T::from_str(value).map_err(translate_domain_error)
}

fn parse_status(value: Option<&str>) -> Result<RecordStatus, ApiError> {
    value.map_or(Ok(RecordStatus::Active), parse_field)
}

fn parse_eta(value: &str, clock: &PortClock) -> Result<PrimitiveDateTime, ApiError> {
    parse_schedule_timestamp(value, clock).map_err(translate_domain_error)
}

// ========================================================================
// Authentication
// ========================================================================

/// Reports whether the system still has no users.
///
/// # Errors
///
/// Returns an error if the user count cannot be read.
pub fn check_bootstrap_status(
    persistence: &mut Persistence,
) -> Result<BootstrapStatusResponse, ApiError> {
    let user_count: i64 = persistence
        .count_users()
        .map_err(translate_persistence_error)?;

    Ok(BootstrapStatusResponse {
        is_bootstrap_mode: user_count == 0,
    })
}

/// Creates the first admin user.
///
/// Only succeeds while no user exists.
///
/// # Errors
///
/// Returns an error if:
/// - A user already exists
/// - The name, email or password is invalid
/// - Database operations fail
pub fn create_first_admin(
    persistence: &mut Persistence,
    request: &CreateFirstAdminRequest,
) -> Result<UserInfo, ApiError> {
    if !check_bootstrap_status(persistence)?.is_bootstrap_mode {
        return Err(ApiError::Unauthorized {
            action: String::from("create_first_admin"),
            required_role: String::from("Bootstrap mode (no users exist)"),
        });
    }

    let user: User = User::new(
        request.name.clone(),
        request.email.clone(),
        UserRole::Admin,
        None,
        RecordStatus::Active,
    );
    validate_user_fields(&user).map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(&request.password, &request.email, &request.name)?;

    let user_id: i64 = persistence
        .create_user(&user, &request.password)
        .map_err(translate_persistence_error)?;
    info!(user_id, "First admin created");

    let record: UserRecord = persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| missing_id("user"))?;
    user_to_info(&record.user)
}

/// Authenticates a user and creates a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong, the user is inactive or
/// the session cannot be stored.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _actor, user): (String, AuthenticatedActor, User) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    let session: SessionData = persistence
        .get_session_by_token(&session_token)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?;

    Ok(LoginResponse {
        session_token,
        user: user_to_info(&user)?,
        expires_at: session.expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the current user with account-wide capabilities.
///
/// # Errors
///
/// Returns an error if the user record has no id.
pub fn whoami(actor: &AuthenticatedActor, user: &User) -> Result<WhoAmIResponse, ApiError> {
    Ok(WhoAmIResponse {
        user: user_to_info(user)?,
        capabilities: compute_global_capabilities(actor),
    })
}

// ========================================================================
// Schedule
// ========================================================================

/// Lists the schedule in berth order with the actor's capabilities.
///
/// # Errors
///
/// Returns an error if the schedule cannot be loaded.
pub fn list_schedule(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ScheduleResponse, ApiError> {
    let schedule: Vec<VesselCall> = load_schedule(persistence).map_err(translate_core_error)?;

    Ok(ScheduleResponse {
        vessel_calls: schedule_to_info(&schedule)?,
        capabilities: compute_schedule_capabilities(actor),
    })
}

/// Retrieves one vessel call in the `DD/MM HH:mm` convention.
///
/// # Errors
///
/// Returns an error if the vessel call does not exist.
pub fn get_vessel_call(
    persistence: &mut Persistence,
    vessel_call_id: i64,
) -> Result<VesselCallInfo, ApiError> {
    let call: VesselCall = persistence
        .get_vessel_call(vessel_call_id)
        .map_err(translate_persistence_error)?;
    vessel_call_to_info(&call)
}

/// Creates a vessel call and cascades the whole schedule.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - A field is invalid or the vessel is already scheduled
/// - Database operations fail
pub fn create_vessel_call(
    persistence: &mut Persistence,
    clock: &PortClock,
    actor: &AuthenticatedActor,
    request: &CreateVesselCallRequest,
) -> Result<ScheduleMutationResponse, ApiError> {
    AuthorizationService::authorize_schedule_mutation(actor, "create_vessel_call")?;

    let call: NewVesselCall = NewVesselCall {
        vessel: request.vessel.trim().to_string(),
        loa: request.loa,
        operation_time: request.operation_time.trim().to_string(),
        eta: Some(parse_eta(&request.eta, clock)?),
        cargo: request.cargo.trim().to_string(),
    };

    let result: TransitionResult =
        apply(persistence, Command::CreateVesselCall(call)).map_err(translate_core_error)?;
    info!(user_id = actor.user_id, affected = ?result.affected, "Vessel call created");

    transition_to_response(
        &result,
        format!("Vessel call for '{}' created", request.vessel.trim()),
    )
}

/// Edits a vessel call and cascades from its new position.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The vessel call does not exist
/// - A field is invalid or the new vessel name is already scheduled
/// - Database operations fail
pub fn update_vessel_call(
    persistence: &mut Persistence,
    clock: &PortClock,
    actor: &AuthenticatedActor,
    vessel_call_id: i64,
    request: &UpdateVesselCallRequest,
) -> Result<ScheduleMutationResponse, ApiError> {
    AuthorizationService::authorize_schedule_mutation(actor, "update_vessel_call")?;

    let eta: Option<PrimitiveDateTime> = request
        .eta
        .as_deref()
        .map(|text| parse_eta(text, clock))
        .transpose()?;

    let patch: VesselCallPatch = VesselCallPatch {
        vessel: request.vessel.as_deref().map(|v| v.trim().to_string()),
        loa: request.loa,
        operation_time: request.operation_time.as_deref().map(|v| v.trim().to_string()),
        eta,
        cargo: request.cargo.as_deref().map(|v| v.trim().to_string()),
        derived: None,
    };

    let result: TransitionResult = apply(
        persistence,
        Command::EditVesselCall {
            vessel_call_id,
            patch,
        },
    )
    .map_err(translate_core_error)?;
    info!(user_id = actor.user_id, vessel_call_id, "Vessel call updated");

    transition_to_response(&result, format!("Vessel call {vessel_call_id} updated"))
}

/// Deletes a vessel call and cascades the remaining schedule.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the vessel call does not
/// exist, or database operations fail.
pub fn delete_vessel_call(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    vessel_call_id: i64,
) -> Result<ScheduleMutationResponse, ApiError> {
    AuthorizationService::authorize_schedule_mutation(actor, "delete_vessel_call")?;

    let result: TransitionResult =
        apply(persistence, Command::DeleteVesselCall { vessel_call_id })
            .map_err(translate_core_error)?;
    info!(user_id = actor.user_id, vessel_call_id, "Vessel call deleted");

    transition_to_response(&result, format!("Vessel call {vessel_call_id} deleted"))
}

/// Recomputes every derived time and writes back whatever differs.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the schedule cannot be
/// loaded.
pub fn recalculate_schedule(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ScheduleMutationResponse, ApiError> {
    AuthorizationService::authorize_schedule_mutation(actor, "recalculate_schedule")?;

    let result: TransitionResult =
        apply(persistence, Command::Recalculate).map_err(translate_core_error)?;
    info!(
        user_id = actor.user_id,
        written = result.report.written.len(),
        "Schedule recalculated"
    );

    transition_to_response(&result, String::from("Schedule recalculated"))
}

/// Validates a CSV file and, when every row is valid, imports it.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the file is not readable
/// CSV, or the import itself fails. Invalid rows are reported in the
/// response without importing anything.
pub fn import_vessel_calls_csv(
    persistence: &mut Persistence,
    clock: &PortClock,
    actor: &AuthenticatedActor,
    csv_content: &str,
) -> Result<CsvImportResponse, ApiError> {
    AuthorizationService::authorize_schedule_mutation(actor, "import_vessel_calls")?;

    let schedule: Vec<VesselCall> = load_schedule(persistence).map_err(translate_core_error)?;
    let plan: CsvImportPlan = parse_vessel_call_csv(csv_content, clock, &schedule)?;
    let invalid_count: usize = plan.invalid_count();
    let valid_count: usize = plan.rows.len() - invalid_count;

    if !plan.is_valid() {
        info!(invalid_count, "CSV import refused");
        return Ok(CsvImportResponse {
            rows: plan.rows,
            valid_count,
            invalid_count,
            result: None,
        });
    }

    let result: TransitionResult = apply(persistence, Command::ImportVesselCalls(plan.calls))
        .map_err(translate_core_error)?;
    info!(user_id = actor.user_id, imported = valid_count, "CSV import complete");

    Ok(CsvImportResponse {
        rows: plan.rows,
        valid_count,
        invalid_count,
        result: Some(transition_to_response(
            &result,
            format!("Imported {valid_count} vessel calls"),
        )?),
    })
}

/// Lists active ships that have no call in the schedule.
///
/// # Errors
///
/// Returns an error if the ships or schedule cannot be loaded.
pub fn list_available_ships(persistence: &mut Persistence) -> Result<Vec<ShipInfo>, ApiError> {
    let ships: Vec<Ship> = persistence
        .list_ships()
        .map_err(translate_persistence_error)?;
    let schedule: Vec<VesselCall> = load_schedule(persistence).map_err(translate_core_error)?;

    available_ships(&ships, &schedule)
        .iter()
        .map(ship_to_info)
        .collect()
}

// ========================================================================
// Agencies
// ========================================================================

fn agency_from_request(request: &AgencyRequest) -> Result<Agency, ApiError> {
    let agency: Agency = Agency::new(
        request.name.trim().to_string(),
        parse_field::<CargoKind>(&request.kind)?,
        request.phone.trim().to_string(),
        request.email.trim().to_string(),
        parse_status(request.status.as_deref())?,
    );
    validate_agency_fields(&agency).map_err(translate_domain_error)?;
    Ok(agency)
}

/// Lists all agencies.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_agencies(persistence: &mut Persistence) -> Result<Vec<AgencyInfo>, ApiError> {
    persistence
        .list_agencies()
        .map_err(translate_persistence_error)?
        .iter()
        .map(agency_to_info)
        .collect()
}

/// Retrieves one agency.
///
/// # Errors
///
/// Returns an error if the agency does not exist.
pub fn get_agency(persistence: &mut Persistence, agency_id: i64) -> Result<AgencyInfo, ApiError> {
    let agency: Agency = persistence
        .get_agency(agency_id)
        .map_err(translate_persistence_error)?;
    agency_to_info(&agency)
}

/// Creates an agency.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or a field is invalid.
pub fn create_agency(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &AgencyRequest,
) -> Result<AgencyInfo, ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "create_agency")?;
    let agency: Agency = agency_from_request(request)?;

    let agency_id: i64 = persistence
        .create_agency(&agency)
        .map_err(translate_persistence_error)?;
    get_agency(persistence, agency_id)
}

/// Replaces an agency.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field is invalid, or
/// the agency does not exist.
pub fn update_agency(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    agency_id: i64,
    request: &AgencyRequest,
) -> Result<AgencyInfo, ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "update_agency")?;
    let agency: Agency = agency_from_request(request)?;

    persistence
        .update_agency(agency_id, &agency)
        .map_err(translate_persistence_error)?;
    get_agency(persistence, agency_id)
}

/// Deletes an agency with no ships or users.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the agency does not
/// exist, or something still references it.
pub fn delete_agency(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    agency_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "delete_agency")?;
    persistence
        .delete_agency(agency_id)
        .map_err(translate_persistence_error)
}

// ========================================================================
// Ships
// ========================================================================

fn ship_from_request(
    persistence: &mut Persistence,
    request: &ShipRequest,
) -> Result<Ship, ApiError> {
    let ship: Ship = Ship::new(
        request.name.trim().to_string(),
        request.agency_id,
        parse_field::<CargoKind>(&request.kind)?,
        request.loa,
        parse_status(request.status.as_deref())?,
    );
    validate_ship_fields(&ship).map_err(translate_domain_error)?;
    persistence
        .get_agency(request.agency_id)
        .map_err(translate_persistence_error)?;
    Ok(ship)
}

/// Lists all ships.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_ships(persistence: &mut Persistence) -> Result<Vec<ShipInfo>, ApiError> {
    persistence
        .list_ships()
        .map_err(translate_persistence_error)?
        .iter()
        .map(ship_to_info)
        .collect()
}

/// Retrieves one ship.
///
/// # Errors
///
/// Returns an error if the ship does not exist.
pub fn get_ship(persistence: &mut Persistence, ship_id: i64) -> Result<ShipInfo, ApiError> {
    let ship: Ship = persistence
        .get_ship(ship_id)
        .map_err(translate_persistence_error)?;
    ship_to_info(&ship)
}

/// Creates a ship under an existing agency.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field is invalid, or
/// the agency does not exist.
pub fn create_ship(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ShipRequest,
) -> Result<ShipInfo, ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "create_ship")?;
    let ship: Ship = ship_from_request(persistence, request)?;

    let ship_id: i64 = persistence
        .create_ship(&ship)
        .map_err(translate_persistence_error)?;
    get_ship(persistence, ship_id)
}

/// Replaces a ship.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, a field is invalid, or
/// the ship or agency does not exist.
pub fn update_ship(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    ship_id: i64,
    request: &ShipRequest,
) -> Result<ShipInfo, ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "update_ship")?;
    let ship: Ship = ship_from_request(persistence, request)?;

    persistence
        .update_ship(ship_id, &ship)
        .map_err(translate_persistence_error)?;
    get_ship(persistence, ship_id)
}

/// Deletes a ship.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the ship does not exist.
pub fn delete_ship(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    ship_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_directory_mutation(actor, "delete_ship")?;
    persistence
        .delete_ship(ship_id)
        .map_err(translate_persistence_error)
}

// ========================================================================
// Users
// ========================================================================

fn require_agency(persistence: &mut Persistence, agency_id: Option<i64>) -> Result<(), ApiError> {
    if let Some(agency_id) = agency_id {
        persistence
            .get_agency(agency_id)
            .map_err(translate_persistence_error)?;
    }
    Ok(())
}

fn load_user(persistence: &mut Persistence, user_id: i64) -> Result<User, ApiError> {
    persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .map(|record| record.user)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })
}

/// Lists all users.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<UserInfo>, ApiError> {
    AuthorizationService::authorize_user_management(actor, "list_users")?;
    persistence
        .list_users()
        .map_err(translate_persistence_error)?
        .iter()
        .map(user_to_info)
        .collect()
}

/// Retrieves one user.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the user does not exist.
pub fn get_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_user_management(actor, "get_user")?;
    user_to_info(&load_user(persistence, user_id)?)
}

/// Creates a user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - A field is invalid or the password breaks the policy
/// - The email is already registered or the agency does not exist
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_user_management(actor, "create_user")?;

    let user: User = User::new(
        request.name.trim().to_string(),
        request.email.trim().to_string(),
        parse_field::<UserRole>(&request.role)?,
        request.agency_id,
        parse_status(request.status.as_deref())?,
    );
    validate_user_fields(&user).map_err(translate_domain_error)?;
    PasswordPolicy::default().validate(&request.password, &user.email, &user.name)?;
    require_agency(persistence, user.agency_id)?;

    let user_id: i64 = persistence
        .create_user(&user, &request.password)
        .map_err(translate_persistence_error)?;
    info!(user_id, created_by = actor.user_id, "User created");

    user_to_info(&load_user(persistence, user_id)?)
}

/// Updates a user. A new password revokes the user's sessions.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The user does not exist
/// - A field is invalid or the password breaks the policy
/// - The email is already registered to someone else
pub fn update_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: &UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_user_management(actor, "update_user")?;

    let existing: User = load_user(persistence, user_id)?;
    let user: User = User {
        user_id: existing.user_id,
        name: request
            .name
            .as_deref()
            .map_or(existing.name, |n| n.trim().to_string()),
        email: request
            .email
            .as_deref()
            .map_or(existing.email, |e| e.trim().to_string()),
        role: request
            .role
            .as_deref()
            .map_or(Ok(existing.role), parse_field)?,
        agency_id: request.agency_id.or(existing.agency_id),
        status: request
            .status
            .as_deref()
            .map_or(Ok(existing.status), parse_field)?,
    };
    validate_user_fields(&user).map_err(translate_domain_error)?;
    require_agency(persistence, user.agency_id)?;

    persistence
        .update_user(user_id, &user)
        .map_err(translate_persistence_error)?;

    if let Some(password) = &request.password {
        PasswordPolicy::default().validate(password, &user.email, &user.name)?;
        persistence
            .update_password(user_id, password)
            .map_err(translate_persistence_error)?;
        persistence
            .delete_sessions_for_user(user_id)
            .map_err(translate_persistence_error)?;
    }
    info!(user_id, updated_by = actor.user_id, "User updated");

    user_to_info(&load_user(persistence, user_id)?)
}

/// Deletes a user other than the actor.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, targets themselves, or
/// the user does not exist.
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_user_management(actor, "delete_user")?;

    if actor.user_id == user_id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("cannot_delete_self"),
            message: String::from("Users cannot delete their own account"),
        });
    }

    persistence
        .delete_user(user_id)
        .map_err(translate_persistence_error)?;
    info!(user_id, deleted_by = actor.user_id, "User deleted");
    Ok(())
}
