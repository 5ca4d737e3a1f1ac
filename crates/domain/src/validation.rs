// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Agency, Ship, User, VesselCall};
use std::collections::HashSet;

/// Validates the operator-entered fields of a vessel call.
///
/// Only checks that the fields are individually well-formed. ETA and
/// operation time are checked at the I/O boundary where they are parsed;
/// uniqueness requires the rest of the schedule.
///
/// # Errors
///
/// Returns an error if:
/// - The vessel name is empty
/// - The LOA is negative, NaN or infinite
pub fn validate_vessel_call_fields(vessel: &str, loa: f64) -> Result<(), DomainError> {
    if vessel.trim().is_empty() {
        return Err(DomainError::InvalidVesselName(String::from(
            "Vessel name cannot be empty",
        )));
    }

    if !loa.is_finite() || loa < 0.0 {
        return Err(DomainError::InvalidLoa(format!(
            "LOA must be a non-negative number, got {loa}"
        )));
    }

    Ok(())
}

/// Validates that a vessel has no other call in the open schedule.
///
/// Names are compared case-insensitively after trimming.
///
/// # Arguments
///
/// * `vessel` - The vessel name being scheduled
/// * `schedule` - The current open schedule
/// * `exclude_id` - The call being edited, which may keep its own name
///
/// # Errors
///
/// Returns an error if another call in the schedule uses the vessel name.
pub fn validate_vessel_unique(
    vessel: &str,
    schedule: &[VesselCall],
    exclude_id: Option<i64>,
) -> Result<(), DomainError> {
    let wanted: String = normalize(vessel);

    let clash: bool = schedule
        .iter()
        .filter(|call| exclude_id.is_none() || call.vessel_call_id() != exclude_id)
        .any(|call| normalize(call.vessel()) == wanted);

    if clash {
        return Err(DomainError::DuplicateVessel {
            vessel: vessel.trim().to_string(),
        });
    }
    Ok(())
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns the active ships with no call in the open schedule.
#[must_use]
pub fn available_ships(ships: &[Ship], schedule: &[VesselCall]) -> Vec<Ship> {
    let scheduled: HashSet<String> = schedule.iter().map(|c| normalize(c.vessel())).collect();

    ships
        .iter()
        .filter(|ship| ship.status.is_active() && !scheduled.contains(&normalize(&ship.name)))
        .cloned()
        .collect()
}

/// Validates an agency's fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the email is malformed.
pub fn validate_agency_fields(agency: &Agency) -> Result<(), DomainError> {
    if agency.name.trim().is_empty() {
        return Err(DomainError::InvalidAgencyName(String::from(
            "Agency name cannot be empty",
        )));
    }
    validate_email(&agency.email)
}

/// Validates a ship's fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the LOA is not a non-negative
/// number.
pub fn validate_ship_fields(ship: &Ship) -> Result<(), DomainError> {
    if ship.name.trim().is_empty() {
        return Err(DomainError::InvalidShipName(String::from(
            "Ship name cannot be empty",
        )));
    }
    if !ship.loa.is_finite() || ship.loa < 0.0 {
        return Err(DomainError::InvalidLoa(format!(
            "LOA must be a non-negative number, got {}",
            ship.loa
        )));
    }
    Ok(())
}

/// Validates a user's fields.
///
/// # Errors
///
/// Returns an error if the name is empty or the email is malformed.
pub fn validate_user_fields(user: &User) -> Result<(), DomainError> {
    if user.name.trim().is_empty() {
        return Err(DomainError::InvalidUserName(String::from(
            "Name cannot be empty",
        )));
    }
    validate_email(&user.email)
}

/// Checks the shape of an email address: one `@` with text on both sides and
/// a dot in the domain.
///
/// # Errors
///
/// Returns an error if the address does not have that shape.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();
    let valid: bool = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is not a valid email address"
        )))
    }
}
