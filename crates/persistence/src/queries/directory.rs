// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agency and ship queries.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use portcall_domain::{Agency, Ship};
use tracing::debug;

use crate::diesel_schema::{agencies, ships, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for agency rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = agencies)]
struct AgencyRow {
    agency_id: i64,
    name: String,
    kind: String,
    phone: String,
    email: String,
    status: String,
}

/// Diesel Queryable struct for ship rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ships)]
struct ShipRow {
    ship_id: i64,
    name: String,
    agency_id: i64,
    kind: String,
    loa: f64,
    status: String,
}

impl TryFrom<AgencyRow> for Agency {
    type Error = PersistenceError;

    fn try_from(row: AgencyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            agency_id: Some(row.agency_id),
            name: row.name,
            kind: row.kind.parse()?,
            phone: row.phone,
            email: row.email,
            status: row.status.parse()?,
        })
    }
}

impl TryFrom<ShipRow> for Ship {
    type Error = PersistenceError;

    fn try_from(row: ShipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            ship_id: Some(row.ship_id),
            name: row.name,
            agency_id: row.agency_id,
            kind: row.kind.parse()?,
            loa: row.loa,
            status: row.status.parse()?,
        })
    }
}

/// Lists all agencies ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_agencies(conn: &mut SqliteConnection) -> Result<Vec<Agency>, PersistenceError> {
    let rows: Vec<AgencyRow> = agencies::table
        .order(agencies::name.asc())
        .select(AgencyRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded agencies");
    rows.into_iter().map(Agency::try_from).collect()
}

/// Retrieves an agency by ID.
///
/// # Errors
///
/// Returns `PersistenceError::AgencyNotFound` if the id is unknown.
pub fn get_agency(conn: &mut SqliteConnection, agency_id: i64) -> Result<Agency, PersistenceError> {
    agencies::table
        .filter(agencies::agency_id.eq(agency_id))
        .select(AgencyRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::AgencyNotFound(agency_id))?
        .try_into()
}

/// Checks whether any ship or user references an agency.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_agency_referenced(
    conn: &mut SqliteConnection,
    agency_id: i64,
) -> Result<bool, PersistenceError> {
    let ship_count: i64 = ships::table
        .filter(ships::agency_id.eq(agency_id))
        .select(count_star())
        .first(conn)?;
    let user_count: i64 = users::table
        .filter(users::agency_id.eq(agency_id))
        .select(count_star())
        .first(conn)?;

    Ok(ship_count > 0 || user_count > 0)
}

/// Lists all ships ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_ships(conn: &mut SqliteConnection) -> Result<Vec<Ship>, PersistenceError> {
    let rows: Vec<ShipRow> = ships::table
        .order(ships::name.asc())
        .select(ShipRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded ships");
    rows.into_iter().map(Ship::try_from).collect()
}

/// Retrieves a ship by ID.
///
/// # Errors
///
/// Returns `PersistenceError::ShipNotFound` if the id is unknown.
pub fn get_ship(conn: &mut SqliteConnection, ship_id: i64) -> Result<Ship, PersistenceError> {
    ships::table
        .filter(ships::ship_id.eq(ship_id))
        .select(ShipRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ShipNotFound(ship_id))?
        .try_into()
}
