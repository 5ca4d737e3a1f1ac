// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use portcall::{CascadeGuard, CoreError, ScheduleCoordinator};
use portcall_api::{
    AgencyInfo, AgencyRequest, ApiError, BootstrapStatusResponse, CreateFirstAdminRequest,
    CreateUserRequest, CreateVesselCallRequest, CsvImportResponse, LoginRequest, LoginResponse,
    ScheduleMutationResponse, ScheduleResponse, ShipInfo, ShipRequest, UpdateUserRequest,
    UpdateVesselCallRequest, UserInfo, VesselCallInfo, WhoAmIResponse,
};
use portcall_domain::PortClock;
use portcall_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::session::{SessionUser, expired_session_cookie, session_cookie, session_token};

/// Portcall Server - HTTP server for the berth schedule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// IANA timezone of the port, used to resolve `DD/MM HH:mm` input
    #[arg(short, long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The record store. Held for the whole of each request that touches it.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Serializes schedule mutations and their cascades.
    pub coordinator: Arc<ScheduleCoordinator>,
    pub clock: PortClock,
    pub broadcaster: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence, clock: PortClock) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            coordinator: Arc::new(ScheduleCoordinator::new()),
            clock,
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// API response for writes that return no resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    success: bool,
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. }
            | ApiError::InvalidCsvFormat { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        portcall_api::translate_core_error(err).into()
    }
}

fn write_response(message: String) -> Json<WriteResponse> {
    Json(WriteResponse {
        success: true,
        message,
    })
}

// ========================================================================
// Authentication
// ========================================================================

/// Handler for GET `/auth/bootstrap/status`.
async fn handle_bootstrap_status(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<BootstrapStatusResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BootstrapStatusResponse = portcall_api::check_bootstrap_status(&mut persistence)?;
    Ok(Json(response))
}

/// Handler for POST `/auth/bootstrap`.
///
/// Creates the first admin. Refused once any user exists.
async fn handle_create_first_admin(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateFirstAdminRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(email = %req.email, "Handling create_first_admin request");

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = portcall_api::create_first_admin(&mut persistence, &req)?;
    Ok(Json(user))
}

/// Handler for POST `/auth/login`.
///
/// Returns the session token in the body and as the `session` cookie.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = portcall_api::login(&mut persistence, &req)?;
    drop(persistence);

    let cookie: String = session_cookie(&response.session_token);
    Ok(([(header::SET_COOKIE, cookie)], Json(response)).into_response())
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let token: String = session_token(&headers).ok_or_else(|| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Authentication required"),
    })?;

    let mut persistence = app_state.persistence.lock().await;
    portcall_api::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok((
        [(header::SET_COOKIE, expired_session_cookie())],
        write_response(String::from("Logged out")),
    )
        .into_response())
}

/// Handler for GET `/auth/me`.
async fn handle_whoami(
    SessionUser(actor, user): SessionUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    Ok(Json(portcall_api::whoami(&actor, &user)?))
}

// ========================================================================
// Schedule
// ========================================================================

/// Handler for GET `/schedule`.
async fn handle_list_schedule(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ScheduleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleResponse = portcall_api::list_schedule(&mut persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/schedule/{id}`.
async fn handle_get_vessel_call(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Path(vessel_call_id): Path<i64>,
) -> Result<Json<VesselCallInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::get_vessel_call(
        &mut persistence,
        vessel_call_id,
    )?))
}

/// Handler for POST `/schedule`.
///
/// Creates a vessel call and cascades the schedule.
async fn handle_create_vessel_call(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateVesselCallRequest>,
) -> Result<Json<ScheduleMutationResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        vessel = %req.vessel,
        "Handling create_vessel_call request"
    );

    let _guard: CascadeGuard<'_> = app_state.coordinator.try_begin()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleMutationResponse =
        portcall_api::create_vessel_call(&mut persistence, &app_state.clock, &actor, &req)?;
    drop(persistence);

    for vessel_call_id in &response.affected {
        app_state.broadcaster.broadcast(&LiveEvent::VesselCallCreated {
            vessel_call_id: *vessel_call_id,
        });
    }
    Ok(Json(response))
}

/// Handler for PUT `/schedule/{id}`.
async fn handle_update_vessel_call(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(vessel_call_id): Path<i64>,
    Json(req): Json<UpdateVesselCallRequest>,
) -> Result<Json<ScheduleMutationResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        vessel_call_id, "Handling update_vessel_call request"
    );

    let _guard: CascadeGuard<'_> = app_state.coordinator.try_begin()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleMutationResponse = portcall_api::update_vessel_call(
        &mut persistence,
        &app_state.clock,
        &actor,
        vessel_call_id,
        &req,
    )?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::VesselCallUpdated { vessel_call_id });
    Ok(Json(response))
}

/// Handler for DELETE `/schedule/{id}`.
async fn handle_delete_vessel_call(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(vessel_call_id): Path<i64>,
) -> Result<Json<ScheduleMutationResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        vessel_call_id, "Handling delete_vessel_call request"
    );

    let _guard: CascadeGuard<'_> = app_state.coordinator.try_begin()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleMutationResponse =
        portcall_api::delete_vessel_call(&mut persistence, &actor, vessel_call_id)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::VesselCallDeleted { vessel_call_id });
    Ok(Json(response))
}

/// Handler for POST `/schedule/recalculate`.
async fn handle_recalculate(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ScheduleMutationResponse>, HttpError> {
    info!(user_id = actor.user_id, "Handling recalculate request");

    let _guard: CascadeGuard<'_> = app_state.coordinator.try_begin()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleMutationResponse =
        portcall_api::recalculate_schedule(&mut persistence, &actor)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ScheduleRecalculated {
            written: response.written.len(),
        });
    Ok(Json(response))
}

/// Handler for POST `/schedule/import`.
///
/// The body is the raw CSV text.
async fn handle_import_csv(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    body: String,
) -> Result<Json<CsvImportResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        bytes = body.len(),
        "Handling CSV import request"
    );

    let _guard: CascadeGuard<'_> = app_state.coordinator.try_begin()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: CsvImportResponse =
        portcall_api::import_vessel_calls_csv(&mut persistence, &app_state.clock, &actor, &body)?;
    drop(persistence);

    if let Some(result) = &response.result {
        app_state
            .broadcaster
            .broadcast(&LiveEvent::ScheduleRecalculated {
                written: result.written.len(),
            });
    }
    Ok(Json(response))
}

/// Handler for GET `/schedule/available_ships`.
async fn handle_available_ships(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
) -> Result<Json<Vec<ShipInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::list_available_ships(&mut persistence)?))
}

// ========================================================================
// Agencies
// ========================================================================

async fn handle_list_agencies(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
) -> Result<Json<Vec<AgencyInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::list_agencies(&mut persistence)?))
}

async fn handle_get_agency(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Path(agency_id): Path<i64>,
) -> Result<Json<AgencyInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::get_agency(&mut persistence, agency_id)?))
}

async fn handle_create_agency(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<AgencyRequest>,
) -> Result<Json<AgencyInfo>, HttpError> {
    info!(user_id = actor.user_id, name = %req.name, "Handling create_agency request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::create_agency(
        &mut persistence,
        &actor,
        &req,
    )?))
}

async fn handle_update_agency(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(agency_id): Path<i64>,
    Json(req): Json<AgencyRequest>,
) -> Result<Json<AgencyInfo>, HttpError> {
    info!(user_id = actor.user_id, agency_id, "Handling update_agency request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::update_agency(
        &mut persistence,
        &actor,
        agency_id,
        &req,
    )?))
}

async fn handle_delete_agency(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(agency_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = actor.user_id, agency_id, "Handling delete_agency request");

    let mut persistence = app_state.persistence.lock().await;
    portcall_api::delete_agency(&mut persistence, &actor, agency_id)?;
    Ok(write_response(format!("Agency {agency_id} deleted")))
}

// ========================================================================
// Ships
// ========================================================================

async fn handle_list_ships(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
) -> Result<Json<Vec<ShipInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::list_ships(&mut persistence)?))
}

async fn handle_get_ship(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Path(ship_id): Path<i64>,
) -> Result<Json<ShipInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::get_ship(&mut persistence, ship_id)?))
}

async fn handle_create_ship(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<ShipRequest>,
) -> Result<Json<ShipInfo>, HttpError> {
    info!(user_id = actor.user_id, name = %req.name, "Handling create_ship request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::create_ship(
        &mut persistence,
        &actor,
        &req,
    )?))
}

async fn handle_update_ship(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(ship_id): Path<i64>,
    Json(req): Json<ShipRequest>,
) -> Result<Json<ShipInfo>, HttpError> {
    info!(user_id = actor.user_id, ship_id, "Handling update_ship request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::update_ship(
        &mut persistence,
        &actor,
        ship_id,
        &req,
    )?))
}

async fn handle_delete_ship(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(ship_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = actor.user_id, ship_id, "Handling delete_ship request");

    let mut persistence = app_state.persistence.lock().await;
    portcall_api::delete_ship(&mut persistence, &actor, ship_id)?;
    Ok(write_response(format!("Ship {ship_id} deleted")))
}

// ========================================================================
// Users
// ========================================================================

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<Vec<UserInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::list_users(&mut persistence, &actor)?))
}

async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::get_user(&mut persistence, &actor, user_id)?))
}

async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(user_id = actor.user_id, email = %req.email, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::create_user(
        &mut persistence,
        &actor,
        &req,
    )?))
}

async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(
        user_id = actor.user_id,
        target_user_id = user_id,
        "Handling update_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(portcall_api::update_user(
        &mut persistence,
        &actor,
        user_id,
        &req,
    )?))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = actor.user_id,
        target_user_id = user_id,
        "Handling delete_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    portcall_api::delete_user(&mut persistence, &actor, user_id)?;
    Ok(write_response(format!("User {user_id} deleted")))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/bootstrap/status", get(handle_bootstrap_status))
        .route("/auth/bootstrap", post(handle_create_first_admin))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_whoami))
        .route(
            "/schedule",
            get(handle_list_schedule).post(handle_create_vessel_call),
        )
        .route("/schedule/recalculate", post(handle_recalculate))
        .route("/schedule/import", post(handle_import_csv))
        .route("/schedule/available_ships", get(handle_available_ships))
        .route(
            "/schedule/{id}",
            get(handle_get_vessel_call)
                .put(handle_update_vessel_call)
                .delete(handle_delete_vessel_call),
        )
        .route(
            "/agencies",
            get(handle_list_agencies).post(handle_create_agency),
        )
        .route(
            "/agencies/{id}",
            get(handle_get_agency)
                .put(handle_update_agency)
                .delete(handle_delete_agency),
        )
        .route("/ships", get(handle_list_ships).post(handle_create_ship))
        .route(
            "/ships/{id}",
            get(handle_get_ship)
                .put(handle_update_ship)
                .delete(handle_delete_ship),
        )
        .route("/users", get(handle_list_users).post(handle_create_user))
        .route(
            "/users/{id}",
            get(handle_get_user)
                .put(handle_update_user)
                .delete(handle_delete_user),
        )
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Portcall Server");

    let clock: PortClock = PortClock::new(&args.timezone)?;
    info!(timezone = %args.timezone, "Port clock configured");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence, clock));

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
