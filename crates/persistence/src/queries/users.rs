// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session queries.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use portcall_domain::User;
use tracing::debug;

use crate::data_models::{SessionData, UserRecord};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    agency_id: Option<i64>,
    status: String,
    created_at: String,
    last_login_at: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    user_id: i64,
    created_at: String,
    expires_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user: User {
                user_id: Some(row.user_id),
                name: row.name,
                email: row.email,
                role: row.role.parse()?,
                agency_id: row.agency_id,
                status: row.status.parse()?,
            },
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        })
    }
}

/// Lists all users ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::name.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded users");
    rows.into_iter()
        .map(|row| UserRecord::try_from(row).map(|record| record.user))
        .collect()
}

/// Counts all users.
///
/// Zero users means the system has not been bootstrapped yet.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let count: i64 = users::table.select(count_star()).first(conn)?;
    Ok(count)
}

/// Retrieves a user by email.
///
/// The email is normalized to lowercase for case-insensitive lookup.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has this email.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserRecord>, PersistenceError> {
    let normalized: String = email.trim().to_lowercase();
    debug!(email = %normalized, "Looking up user by email");

    users::table
        .filter(users::email.eq(&normalized))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRecord::try_from)
        .transpose()
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserRecord>, PersistenceError> {
    users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRecord::try_from)
        .transpose()
}

/// Retrieves a session by its token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the token is unknown.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| SessionData {
        session_id: row.session_id,
        session_token: row.session_token,
        user_id: row.user_id,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }))
}
