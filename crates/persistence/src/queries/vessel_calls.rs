// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vessel-call queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portcall_domain::{DerivedTimes, VesselCall, parse_storage_timestamp};
use time::PrimitiveDateTime;
use tracing::debug;

use crate::diesel_schema::vessel_calls;
use crate::error::PersistenceError;

/// Diesel Queryable struct for vessel-call rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = vessel_calls)]
struct VesselCallRow {
    vessel_call_id: i64,
    vessel: String,
    loa: f64,
    operation_time: String,
    eta: Option<String>,
    pilot_on_board: Option<String>,
    berthing_time: Option<String>,
    operation_complete: Option<String>,
    departure_time: Option<String>,
    cargo: String,
}

fn parse_optional(value: Option<&str>) -> Result<Option<PrimitiveDateTime>, PersistenceError> {
    value
        .map(parse_storage_timestamp)
        .transpose()
        .map_err(PersistenceError::from)
}

impl TryFrom<VesselCallRow> for VesselCall {
    type Error = PersistenceError;

    fn try_from(row: VesselCallRow) -> Result<Self, Self::Error> {
        let eta: Option<PrimitiveDateTime> = parse_optional(row.eta.as_deref())?;

        // Derived times are written together; a partial set is treated as absent
        let derived: Option<DerivedTimes> = match (
            parse_optional(row.pilot_on_board.as_deref())?,
            parse_optional(row.berthing_time.as_deref())?,
            parse_optional(row.operation_complete.as_deref())?,
            parse_optional(row.departure_time.as_deref())?,
        ) {
            (
                Some(pilot_on_board),
                Some(berthing_time),
                Some(operation_complete),
                Some(departure_time),
            ) => Some(DerivedTimes {
                pilot_on_board,
                berthing_time,
                operation_complete,
                departure_time,
            }),
            _ => None,
        };

        Ok(Self::with_id(
            row.vessel_call_id,
            row.vessel,
            row.loa,
            row.operation_time,
            eta,
            derived,
            row.cargo,
        ))
    }
}

/// Lists every vessel call, in no particular order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_vessel_calls(conn: &mut SqliteConnection) -> Result<Vec<VesselCall>, PersistenceError> {
    let rows: Vec<VesselCallRow> = vessel_calls::table
        .select(VesselCallRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded vessel calls");
    rows.into_iter().map(VesselCall::try_from).collect()
}

/// Retrieves one vessel call.
///
/// # Errors
///
/// Returns `PersistenceError::VesselCallNotFound` if the id is unknown.
pub fn get_vessel_call(
    conn: &mut SqliteConnection,
    vessel_call_id: i64,
) -> Result<VesselCall, PersistenceError> {
    let row: Option<VesselCallRow> = vessel_calls::table
        .filter(vessel_calls::vessel_call_id.eq(vessel_call_id))
        .select(VesselCallRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::VesselCallNotFound(vessel_call_id))?
        .try_into()
}
