// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use portcall_persistence::Persistence;

use crate::tests::helpers::{
    agency_request, create_test_admin, create_test_agency, create_test_clock,
    create_test_external, setup_persistence_with_admin, user_request, vessel_call_request,
};
use crate::{
    AgencyInfo, ApiError, ShipInfo, ShipRequest, create_agency, create_ship, create_user,
    create_vessel_call, delete_agency, delete_ship, get_agency, list_agencies,
    list_available_ships, list_ships, update_agency, update_ship,
};

fn ship_request(name: &str, agency_id: i64) -> ShipRequest {
    ShipRequest {
        name: String::from(name),
        agency_id,
        kind: String::from("RawMaterial"),
        loa: 180.0,
        status: None,
    }
}

#[test]
fn test_create_and_list_agencies() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_test_agency(&mut persistence, "Transmares");
    create_test_agency(&mut persistence, "Agencia Maritima");

    let agencies: Vec<AgencyInfo> = list_agencies(&mut persistence).unwrap();

    assert_eq!(agencies.len(), 2);
    assert_eq!(agencies[0].name, "Agencia Maritima");
    assert_eq!(agencies[0].status, "Active");
}

#[test]
fn test_agency_kind_accepts_spanish_label() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request = agency_request("Transmares");
    request.kind = String::from("Producto Terminado");

    let agency: AgencyInfo =
        create_agency(&mut persistence, &create_test_admin(), &request).unwrap();

    assert_eq!(agency.kind, "FinishedProduct");
}

#[test]
fn test_agency_with_bad_email_is_invalid() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request = agency_request("Transmares");
    request.email = String::from("not-an-email");

    let result = create_agency(&mut persistence, &create_test_admin(), &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "email"
    ));
}

#[test]
fn test_external_cannot_create_agency() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = create_agency(
        &mut persistence,
        &create_test_external(),
        &agency_request("Transmares"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_update_agency_replaces_fields() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");
    let mut request = agency_request("Transmares Norte");
    request.status = Some(String::from("Inactive"));

    update_agency(&mut persistence, &create_test_admin(), agency.agency_id, &request).unwrap();

    let stored: AgencyInfo = get_agency(&mut persistence, agency.agency_id).unwrap();
    assert_eq!(stored.name, "Transmares Norte");
    assert_eq!(stored.status, "Inactive");
}

#[test]
fn test_get_unknown_agency_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = get_agency(&mut persistence, 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_agency_with_ships_cannot_be_deleted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");
    create_ship(
        &mut persistence,
        &create_test_admin(),
        &ship_request("MV ALPHA", agency.agency_id),
    )
    .unwrap();

    let result = delete_agency(&mut persistence, &create_test_admin(), agency.agency_id);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "agency_in_use"
    ));
}

#[test]
fn test_agency_with_users_cannot_be_deleted() {
    let (mut persistence, _admin) = setup_persistence_with_admin();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");
    let mut request = user_request("Agent", "agent@transmares.test", "External");
    request.agency_id = Some(agency.agency_id);
    create_user(&mut persistence, &create_test_admin(), &request).unwrap();

    let result = delete_agency(&mut persistence, &create_test_admin(), agency.agency_id);

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_unreferenced_agency_is_deleted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");

    delete_agency(&mut persistence, &create_test_admin(), agency.agency_id).unwrap();

    assert!(list_agencies(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_ship_requires_existing_agency() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = create_ship(
        &mut persistence,
        &create_test_admin(),
        &ship_request("MV ALPHA", 99),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert!(list_ships(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_ship_crud() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");

    let ship: ShipInfo = create_ship(
        &mut persistence,
        &admin,
        &ship_request("MV ALPHA", agency.agency_id),
    )
    .unwrap();
    assert_eq!(ship.agency_id, agency.agency_id);

    let mut request = ship_request("MV ALPHA", agency.agency_id);
    request.loa = 201.5;
    let updated: ShipInfo = update_ship(&mut persistence, &admin, ship.ship_id, &request).unwrap();
    assert!((updated.loa - 201.5).abs() < f64::EPSILON);

    delete_ship(&mut persistence, &admin, ship.ship_id).unwrap();
    let result = delete_ship(&mut persistence, &admin, ship.ship_id);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_ship_with_negative_loa_is_invalid() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");
    let mut request = ship_request("MV ALPHA", agency.agency_id);
    request.loa = -1.0;

    let result = create_ship(&mut persistence, &create_test_admin(), &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "loa"
    ));
}

#[test]
fn test_available_ships_excludes_scheduled_and_inactive() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin = create_test_admin();
    let agency: AgencyInfo = create_test_agency(&mut persistence, "Transmares");
    for name in ["ALPHA", "BRAVO"] {
        create_ship(&mut persistence, &admin, &ship_request(name, agency.agency_id)).unwrap();
    }
    let mut retired = ship_request("CHARLIE", agency.agency_id);
    retired.status = Some(String::from("Inactive"));
    create_ship(&mut persistence, &admin, &retired).unwrap();
    create_vessel_call(
        &mut persistence,
        &create_test_clock(),
        &admin,
        &vessel_call_request("alpha", "10/03 08:00", "4:00"),
    )
    .unwrap();

    let available: Vec<ShipInfo> = list_available_ships(&mut persistence).unwrap();

    let names: Vec<&str> = available.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["BRAVO"]);
}
