// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use portcall_domain::User;
use tracing::{debug, info};

use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

fn map_unique_email(err: DieselError, email: &str) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateEmail(email.to_string())
        }
        other => other.into(),
    }
}

/// Creates a user.
///
/// The email is normalized to lowercase for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user` - The user to store
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if the email is taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &User,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = user.email.trim().to_lowercase();
    info!(email = %normalized_email, role = %user.role, "Creating user");

    let password_hash: String = hash_password(password)?;

    let user_id: i64 = diesel::insert_into(users::table)
        .values((
            users::name.eq(&user.name),
            users::email.eq(&normalized_email),
            users::password_hash.eq(&password_hash),
            users::role.eq(user.role.as_str()),
            users::agency_id.eq(user.agency_id),
            users::status.eq(user.status.as_str()),
        ))
        .returning(users::user_id)
        .get_result(conn)
        .map_err(|e| map_unique_email(e, &normalized_email))?;

    info!(user_id, "User created");
    Ok(user_id)
}

/// Replaces the profile fields of a user. The password is untouched.
///
/// # Errors
///
/// Returns `PersistenceError::UserNotFound` if the id is unknown or
/// `DuplicateEmail` if the new email belongs to someone else.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    user: &User,
) -> Result<(), PersistenceError> {
    let normalized_email: String = user.email.trim().to_lowercase();
    info!(user_id, "Updating user");

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::name.eq(&user.name),
            users::email.eq(&normalized_email),
            users::role.eq(user.role.as_str()),
            users::agency_id.eq(user.agency_id),
            users::status.eq(user.status.as_str()),
        ))
        .execute(conn)
        .map_err(|e| map_unique_email(e, &normalized_email))?;

    if rows_affected == 0 {
        return Err(PersistenceError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

/// Replaces a user's password.
///
/// # Errors
///
/// Returns `PersistenceError::UserNotFound` if the id is unknown.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    password: &str,
) -> Result<(), PersistenceError> {
    info!(user_id, "Updating user password");

    let password_hash: String = hash_password(password)?;
    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::password_hash.eq(&password_hash))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

/// Deletes a user. Their sessions go with them.
///
/// # Errors
///
/// Returns `PersistenceError::UserNotFound` if the id is unknown.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!(user_id, "Deleting user");

    let rows_affected: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating last_login_at");

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}

/// Creates a session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The opaque token handed to the client
/// * `user_id` - The user the session belongs to
/// * `expires_at` - ISO 8601 expiry, UTC
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(user_id, expires_at, "Creating session");

    let session_id: i64 = diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .returning(sessions::session_id)
        .get_result(conn)?;

    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Deletes a session by token. Unknown tokens are ignored.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes every session a user holds.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::user_id.eq(user_id))
        .execute(conn)?;

    info!(user_id, rows_affected, "Deleted sessions for user");
    Ok(rows_affected)
}
