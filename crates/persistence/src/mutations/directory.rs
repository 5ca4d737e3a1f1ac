// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Agency and ship mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portcall_domain::{Agency, Ship};
use tracing::info;

use crate::diesel_schema::{agencies, ships};
use crate::error::PersistenceError;
use crate::queries::directory::is_agency_referenced;

/// Inserts an agency and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_agency(
    conn: &mut SqliteConnection,
    agency: &Agency,
) -> Result<i64, PersistenceError> {
    info!(name = %agency.name, kind = %agency.kind, "Creating agency");

    let agency_id: i64 = diesel::insert_into(agencies::table)
        .values((
            agencies::name.eq(&agency.name),
            agencies::kind.eq(agency.kind.as_str()),
            agencies::phone.eq(&agency.phone),
            agencies::email.eq(&agency.email),
            agencies::status.eq(agency.status.as_str()),
        ))
        .returning(agencies::agency_id)
        .get_result(conn)?;

    info!(agency_id, "Agency created");
    Ok(agency_id)
}

/// Replaces every editable field of an agency.
///
/// # Errors
///
/// Returns `PersistenceError::AgencyNotFound` if the id is unknown.
pub fn update_agency(
    conn: &mut SqliteConnection,
    agency_id: i64,
    agency: &Agency,
) -> Result<(), PersistenceError> {
    info!(agency_id, "Updating agency");

    let rows_affected: usize = diesel::update(agencies::table)
        .filter(agencies::agency_id.eq(agency_id))
        .set((
            agencies::name.eq(&agency.name),
            agencies::kind.eq(agency.kind.as_str()),
            agencies::phone.eq(&agency.phone),
            agencies::email.eq(&agency.email),
            agencies::status.eq(agency.status.as_str()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AgencyNotFound(agency_id));
    }
    Ok(())
}

/// Deletes an agency nothing refers to.
///
/// # Errors
///
/// Returns `PersistenceError::AgencyReferenced` if ships or users still
/// belong to the agency, or `AgencyNotFound` if the id is unknown.
pub fn delete_agency(conn: &mut SqliteConnection, agency_id: i64) -> Result<(), PersistenceError> {
    info!(agency_id, "Deleting agency");

    if is_agency_referenced(conn, agency_id)? {
        return Err(PersistenceError::AgencyReferenced { agency_id });
    }

    let rows_affected: usize = diesel::delete(agencies::table)
        .filter(agencies::agency_id.eq(agency_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::AgencyNotFound(agency_id));
    }
    Ok(())
}

/// Inserts a ship and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails or the agency does not exist.
pub fn create_ship(conn: &mut SqliteConnection, ship: &Ship) -> Result<i64, PersistenceError> {
    info!(name = %ship.name, agency_id = ship.agency_id, "Creating ship");

    let ship_id: i64 = diesel::insert_into(ships::table)
        .values((
            ships::name.eq(&ship.name),
            ships::agency_id.eq(ship.agency_id),
            ships::kind.eq(ship.kind.as_str()),
            ships::loa.eq(ship.loa),
            ships::status.eq(ship.status.as_str()),
        ))
        .returning(ships::ship_id)
        .get_result(conn)?;

    info!(ship_id, "Ship created");
    Ok(ship_id)
}

/// Replaces every editable field of a ship.
///
/// # Errors
///
/// Returns `PersistenceError::ShipNotFound` if the id is unknown.
pub fn update_ship(
    conn: &mut SqliteConnection,
    ship_id: i64,
    ship: &Ship,
) -> Result<(), PersistenceError> {
    info!(ship_id, "Updating ship");

    let rows_affected: usize = diesel::update(ships::table)
        .filter(ships::ship_id.eq(ship_id))
        .set((
            ships::name.eq(&ship.name),
            ships::agency_id.eq(ship.agency_id),
            ships::kind.eq(ship.kind.as_str()),
            ships::loa.eq(ship.loa),
            ships::status.eq(ship.status.as_str()),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ShipNotFound(ship_id));
    }
    Ok(())
}

/// Deletes a ship.
///
/// # Errors
///
/// Returns `PersistenceError::ShipNotFound` if the id is unknown.
pub fn delete_ship(conn: &mut SqliteConnection, ship_id: i64) -> Result<(), PersistenceError> {
    info!(ship_id, "Deleting ship");

    let rows_affected: usize = diesel::delete(ships::table)
        .filter(ships::ship_id.eq(ship_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::ShipNotFound(ship_id));
    }
    Ok(())
}
