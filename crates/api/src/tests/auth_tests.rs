// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use portcall_persistence::Persistence;

use crate::tests::helpers::{
    ADMIN_EMAIL, ADMIN_PASSWORD, create_test_user, setup_persistence_with_admin,
};
use crate::{
    ApiError, AuthenticationService, BootstrapStatusResponse, CreateFirstAdminRequest,
    LoginRequest, LoginResponse, Role, UpdateUserRequest, WhoAmIResponse, check_bootstrap_status,
    create_first_admin, login, logout, update_user, whoami,
};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: String::from(email),
        password: String::from(password),
    }
}

#[test]
fn test_empty_store_is_in_bootstrap_mode() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let status: BootstrapStatusResponse = check_bootstrap_status(&mut persistence).unwrap();

    assert!(status.is_bootstrap_mode);
}

#[test]
fn test_first_admin_ends_bootstrap_mode() {
    let (mut persistence, admin) = setup_persistence_with_admin();

    assert_eq!(admin.role, "Admin");
    assert_eq!(admin.email, ADMIN_EMAIL);
    assert!(!check_bootstrap_status(&mut persistence).unwrap().is_bootstrap_mode);
}

#[test]
fn test_second_first_admin_is_refused() {
    let (mut persistence, _admin) = setup_persistence_with_admin();

    let result = create_first_admin(
        &mut persistence,
        &CreateFirstAdminRequest {
            name: String::from("Intruder"),
            email: String::from("intruder@port.test"),
            password: String::from("takeover99"),
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_first_admin_password_must_meet_policy() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result = create_first_admin(
        &mut persistence,
        &CreateFirstAdminRequest {
            name: String::from("Harbor Master"),
            email: String::from(ADMIN_EMAIL),
            password: String::from("short"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
    assert!(check_bootstrap_status(&mut persistence).unwrap().is_bootstrap_mode);
}

#[test]
fn test_login_returns_session_and_user() {
    let (mut persistence, admin) = setup_persistence_with_admin();

    let response: LoginResponse =
        login(&mut persistence, &login_request(ADMIN_EMAIL, ADMIN_PASSWORD)).unwrap();

    assert!(response.session_token.starts_with("session_"));
    assert_eq!(response.user, admin);
    assert!(!response.expires_at.is_empty());

    let (actor, user) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();
    assert_eq!(actor.user_id, admin.user_id);
    assert_eq!(actor.role, Role::Admin);
    assert_eq!(user.email, ADMIN_EMAIL);
}

#[test]
fn test_login_email_is_case_insensitive() {
    let (mut persistence, _admin) = setup_persistence_with_admin();

    let result = login(
        &mut persistence,
        &login_request("ADMIN@Port.Test", ADMIN_PASSWORD),
    );

    assert!(result.is_ok());
}

#[test]
fn test_login_with_wrong_password_fails() {
    let (mut persistence, _admin) = setup_persistence_with_admin();

    let result = login(&mut persistence, &login_request(ADMIN_EMAIL, "wrong-pass1"));

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_login_with_unknown_email_fails() {
    let (mut persistence, _admin) = setup_persistence_with_admin();

    let result = login(
        &mut persistence,
        &login_request("ghost@port.test", ADMIN_PASSWORD),
    );

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_inactive_user_cannot_log_in() {
    let (mut persistence, admin) = setup_persistence_with_admin();
    let clerk = create_test_user(&mut persistence, "clerk@port.test", "Collaborator");
    update_user(
        &mut persistence,
        &crate::tests::helpers::admin_actor(&admin),
        clerk.user_id,
        &UpdateUserRequest {
            status: Some(String::from("Inactive")),
            ..UpdateUserRequest::default()
        },
    )
    .unwrap();

    let result = login(&mut persistence, &login_request("clerk@port.test", "quay4567"));

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_logout_invalidates_session() {
    let (mut persistence, _admin) = setup_persistence_with_admin();
    let response: LoginResponse =
        login(&mut persistence, &login_request(ADMIN_EMAIL, ADMIN_PASSWORD)).unwrap();

    logout(&mut persistence, &response.session_token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.session_token);
    assert!(result.is_err());
}

#[test]
fn test_expired_session_is_rejected_and_removed() {
    let (mut persistence, admin) = setup_persistence_with_admin();
    persistence
        .create_session("session_stale", admin.user_id, "2020-01-01T00:00:00.000000000Z")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_stale");

    assert!(result.is_err());
    assert!(
        persistence
            .get_session_by_token("session_stale")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_unknown_session_is_rejected() {
    let (mut persistence, _admin) = setup_persistence_with_admin();

    let result = AuthenticationService::validate_session(&mut persistence, "session_missing");

    assert!(result.is_err());
}

#[test]
fn test_whoami_reports_capabilities() {
    let (mut persistence, _admin) = setup_persistence_with_admin();
    let response: LoginResponse =
        login(&mut persistence, &login_request(ADMIN_EMAIL, ADMIN_PASSWORD)).unwrap();
    let (actor, user) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();

    let me: WhoAmIResponse = whoami(&actor, &user).unwrap();

    assert_eq!(me.user.email, ADMIN_EMAIL);
    assert!(me.capabilities.can_manage_users.is_allowed());
    assert!(me.capabilities.schedule.can_create.is_allowed());
}
