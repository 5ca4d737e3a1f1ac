// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vessel call mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use portcall::{NewVesselCall, VesselCallPatch};
use portcall_domain::format_storage_timestamp;
use time::PrimitiveDateTime;
use tracing::{debug, info};

use crate::diesel_schema::vessel_calls;
use crate::error::PersistenceError;

/// The columns a patch may touch. `None` columns are left alone.
#[derive(AsChangeset, Default)]
#[diesel(table_name = vessel_calls)]
struct VesselCallChangeset {
    vessel: Option<String>,
    loa: Option<f64>,
    operation_time: Option<String>,
    eta: Option<String>,
    pilot_on_board: Option<String>,
    berthing_time: Option<String>,
    operation_complete: Option<String>,
    departure_time: Option<String>,
    cargo: Option<String>,
}

fn storage_text(instant: Option<PrimitiveDateTime>) -> Result<Option<String>, PersistenceError> {
    Ok(instant.map(format_storage_timestamp).transpose()?)
}

impl TryFrom<&VesselCallPatch> for VesselCallChangeset {
    type Error = PersistenceError;

    fn try_from(patch: &VesselCallPatch) -> Result<Self, Self::Error> {
        let mut changeset: Self = Self {
            vessel: patch.vessel.clone(),
            loa: patch.loa,
            operation_time: patch.operation_time.clone(),
            eta: storage_text(patch.eta)?,
            cargo: patch.cargo.clone(),
            ..Self::default()
        };

        if let Some(derived) = patch.derived {
            changeset.pilot_on_board = Some(format_storage_timestamp(derived.pilot_on_board)?);
            changeset.berthing_time = Some(format_storage_timestamp(derived.berthing_time)?);
            changeset.operation_complete =
                Some(format_storage_timestamp(derived.operation_complete)?);
            changeset.departure_time = Some(format_storage_timestamp(derived.departure_time)?);
        }

        Ok(changeset)
    }
}

/// Inserts a vessel call without derived timestamps.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `call` - The operator-supplied fields
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_vessel_call(
    conn: &mut SqliteConnection,
    call: &NewVesselCall,
) -> Result<i64, PersistenceError> {
    info!(vessel = %call.vessel, "Creating vessel call");

    let eta: Option<String> = storage_text(call.eta)?;

    let vessel_call_id: i64 = diesel::insert_into(vessel_calls::table)
        .values((
            vessel_calls::vessel.eq(&call.vessel),
            vessel_calls::loa.eq(call.loa),
            vessel_calls::operation_time.eq(&call.operation_time),
            vessel_calls::eta.eq(eta),
            vessel_calls::cargo.eq(&call.cargo),
        ))
        .returning(vessel_calls::vessel_call_id)
        .get_result(conn)?;

    info!(vessel_call_id, "Vessel call created");
    Ok(vessel_call_id)
}

/// Applies a patch to one vessel call and bumps `updated_at`.
///
/// # Errors
///
/// Returns `PersistenceError::VesselCallNotFound` if no row has this id.
pub fn update_vessel_call(
    conn: &mut SqliteConnection,
    vessel_call_id: i64,
    patch: &VesselCallPatch,
) -> Result<(), PersistenceError> {
    debug!(
        vessel_call_id,
        inputs = patch.has_input_changes(),
        derived = patch.derived.is_some(),
        "Updating vessel call"
    );

    let changeset: VesselCallChangeset = VesselCallChangeset::try_from(patch)?;

    let rows_affected: usize = diesel::update(vessel_calls::table)
        .filter(vessel_calls::vessel_call_id.eq(vessel_call_id))
        .set((
            changeset,
            vessel_calls::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::VesselCallNotFound(vessel_call_id));
    }

    Ok(())
}

/// Removes a vessel call.
///
/// # Errors
///
/// Returns `PersistenceError::VesselCallNotFound` if no row has this id.
pub fn delete_vessel_call(
    conn: &mut SqliteConnection,
    vessel_call_id: i64,
) -> Result<(), PersistenceError> {
    info!(vessel_call_id, "Deleting vessel call");

    let rows_affected: usize = diesel::delete(vessel_calls::table)
        .filter(vessel_calls::vessel_call_id.eq(vessel_call_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::VesselCallNotFound(vessel_call_id));
    }

    Ok(())
}
