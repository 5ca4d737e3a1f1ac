// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Schedule timestamps cross this boundary as `DD/MM HH:mm` text. Requests
//! also accept ISO 8601.

// ========================================================================
// Authentication
// ========================================================================

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The user's email.
    pub email: String,
    /// The user's password.
    pub password: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The logged-in user.
    pub user: UserInfo,
    /// Session expiration timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response for the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    pub user: UserInfo,
    pub capabilities: GlobalCapabilities,
}

/// API response describing whether the system still needs its first admin.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootstrapStatusResponse {
    /// True while no user exists.
    pub is_bootstrap_mode: bool,
}

/// API request to create the first admin user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateFirstAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ========================================================================
// Capabilities
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let allowed: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(allowed))
    }
}

/// What the actor may do to the berth schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleCapabilities {
    pub can_create: Capability,
    pub can_edit: Capability,
    pub can_delete: Capability,
    pub can_recalculate: Capability,
    pub can_import: Capability,
}

/// Account-wide permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlobalCapabilities {
    pub schedule: ScheduleCapabilities,
    /// Whether the actor can change agencies and ships.
    pub can_manage_directory: Capability,
    /// Whether the actor can list and change users.
    pub can_manage_users: Capability,
}

// ========================================================================
// Schedule
// ========================================================================

/// API request to create a vessel call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateVesselCallRequest {
    pub vessel: String,
    /// Length overall, metres.
    pub loa: f64,
    /// `H:MM`.
    pub operation_time: String,
    /// `DD/MM HH:mm` or ISO 8601.
    pub eta: String,
    #[serde(default)]
    pub cargo: String,
}

/// API request to edit a vessel call. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateVesselCallRequest {
    #[serde(default)]
    pub vessel: Option<String>,
    #[serde(default)]
    pub loa: Option<f64>,
    #[serde(default)]
    pub operation_time: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub cargo: Option<String>,
}

/// One row of the berth schedule.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VesselCallInfo {
    pub vessel_call_id: i64,
    pub vessel: String,
    pub loa: f64,
    pub operation_time: String,
    pub eta: Option<String>,
    pub pilot_on_board: Option<String>,
    pub berthing_time: Option<String>,
    pub operation_complete: Option<String>,
    pub departure_time: Option<String>,
    pub cargo: String,
}

/// API response for the schedule listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleResponse {
    /// Vessel calls in berth order.
    pub vessel_calls: Vec<VesselCallInfo>,
    pub capabilities: ScheduleCapabilities,
}

/// A record the cascade could not compute.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkippedRecordInfo {
    pub vessel_call_id: Option<i64>,
    pub reason: String,
}

/// A derived-time write the store refused.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WriteFailureInfo {
    pub vessel_call_id: i64,
    pub reason: String,
}

/// API response for any schedule mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleMutationResponse {
    /// The vessel calls created or edited.
    pub affected: Vec<i64>,
    /// The reloaded schedule in berth order.
    pub vessel_calls: Vec<VesselCallInfo>,
    /// Vessel calls whose derived times were rewritten.
    pub written: Vec<i64>,
    pub skipped: Vec<SkippedRecordInfo>,
    pub failures: Vec<WriteFailureInfo>,
    pub message: String,
}

/// Validation outcome of one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CsvRowInfo {
    /// 1-based, excluding the header.
    pub row_number: usize,
    pub vessel: Option<String>,
    pub errors: Vec<String>,
}

/// API response for a CSV import.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CsvImportResponse {
    pub rows: Vec<CsvRowInfo>,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Present only when every row was valid and the import ran.
    pub result: Option<ScheduleMutationResponse>,
}

// ========================================================================
// Agencies & ships
// ========================================================================

/// API request to create or replace an agency.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgencyRequest {
    pub name: String,
    /// `RawMaterial`, `FinishedProduct`, `Service` or their Spanish labels.
    pub kind: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Defaults to `Active`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AgencyInfo {
    pub agency_id: i64,
    pub name: String,
    pub kind: String,
    pub phone: String,
    pub email: String,
    pub status: String,
}

/// API request to create or replace a ship.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShipRequest {
    pub name: String,
    pub agency_id: i64,
    pub kind: String,
    pub loa: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShipInfo {
    pub ship_id: i64,
    pub name: String,
    pub agency_id: i64,
    pub kind: String,
    pub loa: f64,
    pub status: String,
}

// ========================================================================
// Users
// ========================================================================

/// API request to create a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub agency_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to update a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub agency_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    /// A new password; the user's sessions are revoked when set.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub agency_id: Option<i64>,
    pub status: String,
}
