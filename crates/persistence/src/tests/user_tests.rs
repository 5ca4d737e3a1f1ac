// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError, SessionData, UserRecord};
use portcall_domain::{RecordStatus, User, UserRole};

fn create_test_user(email: &str) -> User {
    User::new(
        String::from("Harbor Master"),
        String::from(email),
        UserRole::Admin,
        None,
        RecordStatus::Active,
    )
}

#[test]
fn test_create_user_hashes_password() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();
    let record: UserRecord = persistence.get_user_by_id(user_id).unwrap().unwrap();

    assert_ne!(record.password_hash, "hunter22");
    assert!(bcrypt::verify("hunter22", &record.password_hash).unwrap());
    assert_eq!(record.user.role, UserRole::Admin);
    assert!(record.last_login_at.is_none());
}

#[test]
fn test_email_lookup_is_case_insensitive() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_user(&create_test_user("Master@Port.Test"), "hunter22")
        .unwrap();

    let record: Option<UserRecord> = persistence.get_user_by_email("MASTER@port.test").unwrap();

    assert_eq!(record.unwrap().user.email, "master@port.test");
    assert!(persistence.get_user_by_email("nobody@port.test").unwrap().is_none());
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();

    let result = persistence.create_user(&create_test_user("MASTER@port.test"), "other");

    assert_eq!(
        result.unwrap_err(),
        PersistenceError::DuplicateEmail(String::from("master@port.test"))
    );
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_update_user_changes_role_and_status() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();

    let mut user: User = create_test_user("master@port.test");
    user.role = UserRole::Collaborator;
    user.status = RecordStatus::Inactive;
    persistence.update_user(user_id, &user).unwrap();

    let stored: User = persistence.get_user_by_id(user_id).unwrap().unwrap().user;
    assert_eq!(stored.role, UserRole::Collaborator);
    assert_eq!(stored.status, RecordStatus::Inactive);
}

#[test]
fn test_update_password_replaces_hash() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();

    persistence.update_password(user_id, "newsecret").unwrap();

    let record: UserRecord = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert!(bcrypt::verify("newsecret", &record.password_hash).unwrap());
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();

    persistence
        .create_session("session_abc", user_id, "2026-01-01T08:00:00.000000000Z")
        .unwrap();
    let session: SessionData = persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, user_id);

    persistence.delete_session("session_abc").unwrap();
    assert!(persistence.get_session_by_token("session_abc").unwrap().is_none());
}

#[test]
fn test_deleting_user_removes_sessions() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();
    persistence
        .create_session("session_abc", user_id, "2026-01-01T08:00:00.000000000Z")
        .unwrap();

    persistence.delete_user(user_id).unwrap();

    assert!(persistence.get_session_by_token("session_abc").unwrap().is_none());
    assert_eq!(
        persistence.delete_user(user_id).unwrap_err(),
        PersistenceError::UserNotFound(user_id.to_string())
    );
}

#[test]
fn test_update_last_login_sets_timestamp() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user(&create_test_user("master@port.test"), "hunter22")
        .unwrap();

    persistence.update_last_login(user_id).unwrap();

    let record: UserRecord = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert!(record.last_login_at.is_some());
}
