// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Portcall system.
//!
//! This crate stores the berth schedule, the agency and ship directory,
//! users and login sessions in `SQLite` through Diesel.
//!
//! ## Storage conventions
//!
//! - Timestamps are stored as text, `YYYY-MM-DDTHH:MM:SS`, in port-local
//!   wall-clock time
//! - Derived schedule timestamps are nullable: a record that has never been
//!   computed, or was skipped by the cascade, has none
//! - Emails are stored lowercase
//!
//! ## Testing
//!
//! Tests use isolated shared-cache in-memory databases created through
//! [`Persistence::new_in_memory`]. Every instance gets its own database name.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use portcall::{NewVesselCall, RepositoryError, VesselCallPatch, VesselCallRepository};
use portcall_domain::{Agency, Ship, User, VesselCall};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UserRecord};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The `SQLite`-backed store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_portcall_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Vessel calls
    // ========================================================================

    /// Lists every stored vessel call in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be reconstructed.
    pub fn list_vessel_calls(&mut self) -> Result<Vec<VesselCall>, PersistenceError> {
        queries::vessel_calls::list_vessel_calls(&mut self.conn)
    }

    /// Retrieves one vessel call.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VesselCallNotFound` if the id is unknown.
    pub fn get_vessel_call(&mut self, vessel_call_id: i64) -> Result<VesselCall, PersistenceError> {
        queries::vessel_calls::get_vessel_call(&mut self.conn, vessel_call_id)
    }

    /// Inserts a vessel call and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_vessel_call(&mut self, call: &NewVesselCall) -> Result<i64, PersistenceError> {
        mutations::vessel_calls::create_vessel_call(&mut self.conn, call)
    }

    /// Applies a partial update to a vessel call.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VesselCallNotFound` if the id is unknown.
    pub fn update_vessel_call(
        &mut self,
        vessel_call_id: i64,
        patch: &VesselCallPatch,
    ) -> Result<(), PersistenceError> {
        mutations::vessel_calls::update_vessel_call(&mut self.conn, vessel_call_id, patch)
    }

    /// Deletes a vessel call.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VesselCallNotFound` if the id is unknown.
    pub fn delete_vessel_call(&mut self, vessel_call_id: i64) -> Result<(), PersistenceError> {
        mutations::vessel_calls::delete_vessel_call(&mut self.conn, vessel_call_id)
    }

    // ========================================================================
    // Agencies & ships
    // ========================================================================

    /// Lists all agencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_agencies(&mut self) -> Result<Vec<Agency>, PersistenceError> {
        queries::directory::list_agencies(&mut self.conn)
    }

    /// Retrieves one agency.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgencyNotFound` if the id is unknown.
    pub fn get_agency(&mut self, agency_id: i64) -> Result<Agency, PersistenceError> {
        queries::directory::get_agency(&mut self.conn, agency_id)
    }

    /// Inserts an agency and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_agency(&mut self, agency: &Agency) -> Result<i64, PersistenceError> {
        mutations::directory::create_agency(&mut self.conn, agency)
    }

    /// Replaces an agency's fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgencyNotFound` if the id is unknown.
    pub fn update_agency(
        &mut self,
        agency_id: i64,
        agency: &Agency,
    ) -> Result<(), PersistenceError> {
        mutations::directory::update_agency(&mut self.conn, agency_id, agency)
    }

    /// Deletes an agency that nothing references.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::AgencyReferenced` while ships or users
    /// belong to it.
    pub fn delete_agency(&mut self, agency_id: i64) -> Result<(), PersistenceError> {
        mutations::directory::delete_agency(&mut self.conn, agency_id)
    }

    /// Lists all ships.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ships(&mut self) -> Result<Vec<Ship>, PersistenceError> {
        queries::directory::list_ships(&mut self.conn)
    }

    /// Retrieves one ship.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipNotFound` if the id is unknown.
    pub fn get_ship(&mut self, ship_id: i64) -> Result<Ship, PersistenceError> {
        queries::directory::get_ship(&mut self.conn, ship_id)
    }

    /// Inserts a ship and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the agency does not exist.
    pub fn create_ship(&mut self, ship: &Ship) -> Result<i64, PersistenceError> {
        mutations::directory::create_ship(&mut self.conn, ship)
    }

    /// Replaces a ship's fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipNotFound` if the id is unknown.
    pub fn update_ship(&mut self, ship_id: i64, ship: &Ship) -> Result<(), PersistenceError> {
        mutations::directory::update_ship(&mut self.conn, ship_id, ship)
    }

    /// Deletes a ship.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ShipNotFound` if the id is unknown.
    pub fn delete_ship(&mut self, ship_id: i64) -> Result<(), PersistenceError> {
        mutations::directory::delete_ship(&mut self.conn, ship_id)
    }

    // ========================================================================
    // Users & sessions
    // ========================================================================

    /// Counts users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Lists all users without credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Looks a user up by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Looks a user up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken.
    pub fn create_user(&mut self, user: &User, password: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user, password)
    }

    /// Replaces a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UserNotFound` if the id is unknown.
    pub fn update_user(&mut self, user_id: i64, user: &User) -> Result<(), PersistenceError> {
        mutations::users::update_user(&mut self.conn, user_id, user)
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UserNotFound` if the id is unknown.
    pub fn update_password(
        &mut self,
        user_id: i64,
        password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_password(&mut self.conn, user_id, password)
    }

    /// Deletes a user and their sessions.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UserNotFound` if the id is unknown.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_last_login(&mut self.conn, user_id)
    }

    /// Stores a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Looks a session up by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_user(&mut self, user_id: i64) -> Result<usize, PersistenceError> {
        mutations::users::delete_sessions_for_user(&mut self.conn, user_id)
    }
}

impl VesselCallRepository for Persistence {
    fn list_all(&mut self) -> Result<Vec<VesselCall>, RepositoryError> {
        Ok(self.list_vessel_calls()?)
    }

    fn get(&mut self, vessel_call_id: i64) -> Result<VesselCall, RepositoryError> {
        Ok(self.get_vessel_call(vessel_call_id)?)
    }

    fn create(&mut self, call: &NewVesselCall) -> Result<VesselCall, RepositoryError> {
        let vessel_call_id: i64 = self.create_vessel_call(call)?;
        Ok(self.get_vessel_call(vessel_call_id)?)
    }

    fn update(
        &mut self,
        vessel_call_id: i64,
        patch: &VesselCallPatch,
    ) -> Result<VesselCall, RepositoryError> {
        self.update_vessel_call(vessel_call_id, patch)?;
        Ok(self.get_vessel_call(vessel_call_id)?)
    }

    fn delete(&mut self, vessel_call_id: i64) -> Result<(), RepositoryError> {
        Ok(self.delete_vessel_call(vessel_call_id)?)
    }
}
