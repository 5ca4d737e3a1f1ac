// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use super::{send, session_for_role, setup_with_admin};

async fn create_agency(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/agencies",
        Some(token),
        Some(json!({
            "name": name,
            "kind": "materia prima",
            "phone": "+52 229 000 0000",
            "email": "ops@transmares.test",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "agency creation failed: {body}");
    body["agency_id"].as_i64().unwrap()
}

fn ship(name: &str, agency_id: i64) -> Value {
    json!({
        "name": name,
        "agency_id": agency_id,
        "kind": "RawMaterial",
        "loa": 180.0,
    })
}

#[tokio::test]
async fn test_agency_lifecycle() {
    let (app, _state, token) = setup_with_admin().await;
    let agency_id: i64 = create_agency(&app, &token, "Transmares").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/agencies/{agency_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "RawMaterial");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/agencies/{agency_id}"),
        Some(&token),
        Some(json!({
            "name": "Transmares Sur",
            "kind": "Service",
            "email": "sur@transmares.test",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Transmares Sur");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/agencies/{agency_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/agencies/{agency_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_referenced_agency_delete_is_unprocessable() {
    let (app, _state, token) = setup_with_admin().await;
    let agency_id: i64 = create_agency(&app, &token, "Transmares").await;
    let (status, _) = send(
        &app,
        "POST",
        "/ships",
        Some(&token),
        Some(ship("MV ALPHA", agency_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/agencies/{agency_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_external_reads_directory_but_cannot_write() {
    let (app, _state, admin_token) = setup_with_admin().await;
    let agency_id: i64 = create_agency(&app, &admin_token, "Transmares").await;
    let token: String = session_for_role(&app, &admin_token, "External").await;

    let (status, body) = send(&app, "GET", "/agencies", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/ships",
        Some(&token),
        Some(ship("MV ALPHA", agency_id)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_available_ships_skip_scheduled_vessels() {
    let (app, _state, token) = setup_with_admin().await;
    let agency_id: i64 = create_agency(&app, &token, "Transmares").await;
    for name in ["ALPHA", "BRAVO"] {
        send(&app, "POST", "/ships", Some(&token), Some(ship(name, agency_id))).await;
    }
    send(
        &app,
        "POST",
        "/schedule",
        Some(&token),
        Some(json!({
            "vessel": "ALPHA",
            "loa": 180.0,
            "operation_time": "6:00",
            "eta": "10/03 08:00",
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        "/schedule/available_ships",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["BRAVO"]);
}

#[tokio::test]
async fn test_ship_for_missing_agency_is_not_found() {
    let (app, _state, token) = setup_with_admin().await;

    let (status, _) = send(
        &app,
        "POST",
        "/ships",
        Some(&token),
        Some(ship("MV ALPHA", 9)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
