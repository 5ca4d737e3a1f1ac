// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod directory_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use portcall_domain::PortClock;
use portcall_persistence::Persistence;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const ADMIN_EMAIL: &str = "admin@port.test";
pub const ADMIN_PASSWORD: &str = "berth2026";

/// Helper to create test app state with in-memory persistence.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, PortClock::utc())
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["session_token"].as_str().unwrap().to_string()
}

/// Builds a router whose first admin exists, returning an admin session.
pub async fn setup_with_admin() -> (Router, AppState, String) {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/auth/bootstrap",
        None,
        Some(json!({
            "name": "Harbor Master",
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token: String = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    (app, app_state, token)
}

/// Creates a user with the given role and returns their session.
pub async fn session_for_role(app: &Router, admin_token: &str, role: &str) -> String {
    let email: String = format!("{}@port.test", role.to_lowercase());
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(admin_token),
        Some(json!({
            "name": format!("{role} User"),
            "email": email,
            "password": "quay4567",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "user creation failed: {body}");
    login(app, &email, "quay4567").await
}
