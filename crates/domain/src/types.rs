// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::duration::OperationDuration;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::PrimitiveDateTime;

/// The four timestamps derived from a vessel call's ETA and operation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedTimes {
    /// Pilot on board (POB).
    pub pilot_on_board: PrimitiveDateTime,
    /// Estimated time of berthing (ETB).
    pub berthing_time: PrimitiveDateTime,
    /// Estimated time of operation completion (ETC).
    pub operation_complete: PrimitiveDateTime,
    /// Estimated time of departure (ETD).
    pub departure_time: PrimitiveDateTime,
}

/// A vessel's call at the berth.
///
/// `eta` and `operation_time` are operator inputs. `operation_time` is kept
/// as entered so a record with an unparseable duration can still be stored
/// and displayed; the cascade skips it until it is corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselCall {
    /// Assigned by persistence. `None` until the record is stored.
    vessel_call_id: Option<i64>,
    vessel: String,
    loa: f64,
    operation_time: String,
    eta: Option<PrimitiveDateTime>,
    derived: Option<DerivedTimes>,
    cargo: String,
}

impl VesselCall {
    /// Creates a new, unscheduled vessel call.
    #[must_use]
    pub const fn new(
        vessel: String,
        loa: f64,
        operation_time: String,
        eta: Option<PrimitiveDateTime>,
        cargo: String,
    ) -> Self {
        Self {
            vessel_call_id: None,
            vessel,
            loa,
            operation_time,
            eta,
            derived: None,
            cargo,
        }
    }

    /// Reconstructs a persisted vessel call.
    #[must_use]
    pub const fn with_id(
        vessel_call_id: i64,
        vessel: String,
        loa: f64,
        operation_time: String,
        eta: Option<PrimitiveDateTime>,
        derived: Option<DerivedTimes>,
        cargo: String,
    ) -> Self {
        Self {
            vessel_call_id: Some(vessel_call_id),
            vessel,
            loa,
            operation_time,
            eta,
            derived,
            cargo,
        }
    }

    #[must_use]
    pub const fn vessel_call_id(&self) -> Option<i64> {
        self.vessel_call_id
    }

    #[must_use]
    pub fn vessel(&self) -> &str {
        &self.vessel
    }

    #[must_use]
    pub const fn loa(&self) -> f64 {
        self.loa
    }

    /// Returns the operation time as entered.
    #[must_use]
    pub fn operation_time(&self) -> &str {
        &self.operation_time
    }

    #[must_use]
    pub const fn eta(&self) -> Option<PrimitiveDateTime> {
        self.eta
    }

    #[must_use]
    pub const fn derived(&self) -> Option<DerivedTimes> {
        self.derived
    }

    #[must_use]
    pub fn cargo(&self) -> &str {
        &self.cargo
    }

    /// Parses the stored operation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not `hours:minutes`.
    pub fn operation_duration(&self) -> Result<OperationDuration, DomainError> {
        OperationDuration::parse(&self.operation_time)
    }

    /// Returns a copy with the derived timestamps replaced.
    #[must_use]
    pub fn with_derived(&self, derived: DerivedTimes) -> Self {
        Self {
            derived: Some(derived),
            ..self.clone()
        }
    }
}

/// Classification shared by agencies and ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoKind {
    RawMaterial,
    FinishedProduct,
    Service,
}

impl CargoKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RawMaterial => "RawMaterial",
            Self::FinishedProduct => "FinishedProduct",
            Self::Service => "Service",
        }
    }
}

impl FromStr for CargoKind {
    type Err = DomainError;

    /// Accepts the canonical names as well as the labels used on the admin
    /// screens (`materia prima`, `producto terminado`, `servicio`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rawmaterial" | "raw_material" | "materia prima" => Ok(Self::RawMaterial),
            "finishedproduct" | "finished_product" | "producto terminado" => {
                Ok(Self::FinishedProduct)
            }
            "service" | "servicio" => Ok(Self::Service),
            _ => Err(DomainError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for CargoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an agency, ship or user is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for RecordStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "activo" => Ok(Self::Active),
            "inactive" | "inactivo" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a user may do in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Full administrative access, including schedule mutation.
    Admin,
    /// Internal staff with read access.
    Collaborator,
    /// Agency staff with read access.
    External,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Collaborator => "Collaborator",
            Self::External => "External",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Ok(Self::Admin),
            "collaborator" | "colaborador" => Ok(Self::Collaborator),
            "external" | "externo" => Ok(Self::External),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shipping agency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    /// Assigned by persistence. `None` until stored.
    pub agency_id: Option<i64>,
    pub name: String,
    pub kind: CargoKind,
    pub phone: String,
    pub email: String,
    pub status: RecordStatus,
}

impl Agency {
    #[must_use]
    pub const fn new(
        name: String,
        kind: CargoKind,
        phone: String,
        email: String,
        status: RecordStatus,
    ) -> Self {
        Self {
            agency_id: None,
            name,
            kind,
            phone,
            email,
            status,
        }
    }
}

/// A ship represented by an agency.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Assigned by persistence. `None` until stored.
    pub ship_id: Option<i64>,
    pub name: String,
    pub agency_id: i64,
    pub kind: CargoKind,
    pub loa: f64,
    pub status: RecordStatus,
}

impl Ship {
    #[must_use]
    pub const fn new(
        name: String,
        agency_id: i64,
        kind: CargoKind,
        loa: f64,
        status: RecordStatus,
    ) -> Self {
        Self {
            ship_id: None,
            name,
            agency_id,
            kind,
            loa,
            status,
        }
    }
}

/// A system user.
///
/// The password hash never leaves the persistence and authentication layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by persistence. `None` until stored.
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub agency_id: Option<i64>,
    pub status: RecordStatus,
}

impl User {
    #[must_use]
    pub const fn new(
        name: String,
        email: String,
        role: UserRole,
        agency_id: Option<i64>,
        status: RecordStatus,
    ) -> Self {
        Self {
            user_id: None,
            name,
            email,
            role,
            agency_id,
            status,
        }
    }
}
