// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_agency;
use crate::{Persistence, PersistenceError};
use portcall_domain::{Agency, CargoKind, RecordStatus, Ship, User, UserRole};

#[test]
fn test_agency_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let agency_id: i64 = persistence
        .create_agency(&create_test_agency("Maritima"))
        .unwrap();
    let mut agency: Agency = persistence.get_agency(agency_id).unwrap();
    assert_eq!(agency.agency_id, Some(agency_id));
    assert_eq!(agency.kind, CargoKind::RawMaterial);

    agency.status = RecordStatus::Inactive;
    persistence.update_agency(agency_id, &agency).unwrap();
    assert_eq!(
        persistence.get_agency(agency_id).unwrap().status,
        RecordStatus::Inactive
    );

    persistence.delete_agency(agency_id).unwrap();
    assert_eq!(
        persistence.get_agency(agency_id).unwrap_err(),
        PersistenceError::AgencyNotFound(agency_id)
    );
}

#[test]
fn test_agencies_are_listed_by_name() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.create_agency(&create_test_agency("Zeta")).unwrap();
    persistence.create_agency(&create_test_agency("Alfa")).unwrap();

    let names: Vec<String> = persistence
        .list_agencies()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();

    assert_eq!(names, vec![String::from("Alfa"), String::from("Zeta")]);
}

#[test]
fn test_agency_with_ship_cannot_be_deleted() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let agency_id: i64 = persistence
        .create_agency(&create_test_agency("Maritima"))
        .unwrap();
    persistence
        .create_ship(&Ship::new(
            String::from("NORDIC"),
            agency_id,
            CargoKind::FinishedProduct,
            225.0,
            RecordStatus::Active,
        ))
        .unwrap();

    assert_eq!(
        persistence.delete_agency(agency_id).unwrap_err(),
        PersistenceError::AgencyReferenced { agency_id }
    );
}

#[test]
fn test_agency_with_user_cannot_be_deleted() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let agency_id: i64 = persistence
        .create_agency(&create_test_agency("Maritima"))
        .unwrap();
    persistence
        .create_user(
            &User::new(
                String::from("Agent"),
                String::from("agent@agency.test"),
                UserRole::External,
                Some(agency_id),
                RecordStatus::Active,
            ),
            "secret",
        )
        .unwrap();

    assert!(matches!(
        persistence.delete_agency(agency_id),
        Err(PersistenceError::AgencyReferenced { .. })
    ));
}

#[test]
fn test_ship_requires_existing_agency() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.create_ship(&Ship::new(
        String::from("ORPHAN"),
        999,
        CargoKind::Service,
        80.0,
        RecordStatus::Active,
    ));

    assert!(result.is_err());
}

#[test]
fn test_ship_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let agency_id: i64 = persistence
        .create_agency(&create_test_agency("Maritima"))
        .unwrap();
    let ship_id: i64 = persistence
        .create_ship(&Ship::new(
            String::from("NORDIC"),
            agency_id,
            CargoKind::FinishedProduct,
            225.0,
            RecordStatus::Active,
        ))
        .unwrap();

    let mut ship: Ship = persistence.get_ship(ship_id).unwrap();
    assert!((ship.loa - 225.0).abs() < f64::EPSILON);
    ship.loa = 230.5;
    persistence.update_ship(ship_id, &ship).unwrap();
    assert!((persistence.get_ship(ship_id).unwrap().loa - 230.5).abs() < f64::EPSILON);

    persistence.delete_ship(ship_id).unwrap();
    assert!(persistence.list_ships().unwrap().is_empty());
    assert_eq!(
        persistence.delete_ship(ship_id).unwrap_err(),
        PersistenceError::ShipNotFound(ship_id)
    );
}
