// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Vine church portal.
//!
//! This crate stores accounts, sessions, member profiles, children,
//! check-ins and the public content tables in `SQLite` through Diesel.
//! The schema is applied from embedded migrations when a connection is
//! opened.
//!
//! ## Layout
//!
//! - `queries/` — read-only lookups, one module per resource
//! - `mutations/` — writes, one module per resource
//! - `backend/` — connection setup, PRAGMAs, migrations
//!
//! [`Persistence`] is the only public entry point. It owns one connection
//! and is shared by the HTTP layer behind a mutex.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

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
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod timestamps;

#[cfg(test)]
mod tests;

pub use data_models::{
    AccountData, CheckInData, CheckInFilter, CheckInRecord, CheckOut, FamilySection,
    GalleryImageData, GalleryImageFields, MemberChildData, MemberChildFields, MemberProfileData,
    MemberProfileFields, MemberSummaryData, NewCheckIn, Page, PageRequest, PersonalSection,
    ProfileChanges, ScheduleEventData, ScheduleEventFields, SermonData, SermonFields, SessionData,
    SpiritualSection, VisitorChildData, VisitorChildFields, VisitorData, VisitorFields,
    VolunteerData, VolunteerFields, VolunteerSection,
};
pub use error::PersistenceError;
pub use mutations::accounts::verify_password;
pub use timestamps::{format_date, format_timestamp, now_timestamp, timestamp_in_hours};

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:vine_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

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
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Re-checks that foreign key enforcement is active.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Accounts and sessions
    // ========================================================================

    /// Creates an account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email is taken.
    pub fn create_account(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
        role: &str,
    ) -> Result<AccountData, PersistenceError> {
        mutations::accounts::create_account(&mut self.conn, email, password, display_name, role)
    }

    /// Retrieves an account by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_email(&mut self.conn, email)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)
    }

    /// Counts all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_accounts(&mut self) -> Result<i64, PersistenceError> {
        queries::accounts::count_accounts(&mut self.conn)
    }

    /// Records a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_sign_in(&mut self, account_id: &str) -> Result<(), PersistenceError> {
        mutations::accounts::update_last_sign_in(&mut self.conn, account_id)
    }

    /// Sets an account's role.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the account does not exist.
    pub fn set_account_role(
        &mut self,
        account_id: &str,
        role: &str,
    ) -> Result<AccountData, PersistenceError> {
        mutations::accounts::set_account_role(&mut self.conn, account_id, role)
    }

    /// Lists accounts with their profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_members(
        &mut self,
        request: &PageRequest,
    ) -> Result<Page<MemberSummaryData>, PersistenceError> {
        queries::accounts::list_member_summaries(&mut self.conn, request)
    }

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, account_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Retrieves a session together with its account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_with_account(
        &mut self,
        session_token: &str,
    ) -> Result<Option<(SessionData, AccountData)>, PersistenceError> {
        queries::sessions::get_session_with_account(&mut self.conn, session_token)
    }

    /// Updates a session's last activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    /// Deletes every session of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_sessions_for_account(
        &mut self,
        account_id: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_sessions_for_account(&mut self.conn, account_id)
    }

    // ========================================================================
    // Member profiles
    // ========================================================================

    /// Creates an account's member profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the account already has one.
    pub fn create_member_profile(
        &mut self,
        account_id: &str,
        fields: &MemberProfileFields,
    ) -> Result<MemberProfileData, PersistenceError> {
        mutations::member_profiles::create_profile(&mut self.conn, account_id, fields)
    }

    /// Retrieves an account's member profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_member_profile_by_account(
        &mut self,
        account_id: &str,
    ) -> Result<Option<MemberProfileData>, PersistenceError> {
        queries::member_profiles::get_profile_by_account(&mut self.conn, account_id)
    }

    /// Retrieves a member profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_member_profile(
        &mut self,
        profile_id: &str,
    ) -> Result<Option<MemberProfileData>, PersistenceError> {
        queries::member_profiles::get_profile_by_id(&mut self.conn, profile_id)
    }

    /// Updates a member profile, optionally guarded by version.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version.
    pub fn update_member_profile(
        &mut self,
        profile_id: &str,
        changes: &ProfileChanges,
        expected_version: Option<i32>,
    ) -> Result<MemberProfileData, PersistenceError> {
        mutations::member_profiles::update_profile(
            &mut self.conn,
            profile_id,
            changes,
            expected_version,
        )
    }

    /// Links two profiles as spouses.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if either is already linked.
    pub fn link_spouse(
        &mut self,
        profile_id: &str,
        spouse_profile_id: &str,
    ) -> Result<(), PersistenceError> {
        mutations::member_profiles::link_spouse(&mut self.conn, profile_id, spouse_profile_id)
    }

    /// Removes a profile's spouse link.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn unlink_spouse(&mut self, profile_id: &str) -> Result<bool, PersistenceError> {
        mutations::member_profiles::unlink_spouse(&mut self.conn, profile_id)
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Creates a member child.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_member_child(
        &mut self,
        fields: &MemberChildFields,
    ) -> Result<MemberChildData, PersistenceError> {
        mutations::children::create_member_child(&mut self.conn, fields)
    }

    /// Retrieves a member child.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_member_child(
        &mut self,
        child_id: &str,
    ) -> Result<Option<MemberChildData>, PersistenceError> {
        queries::children::get_member_child(&mut self.conn, child_id)
    }

    /// Lists the children of a parent profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_children_for_parent(
        &mut self,
        profile_id: &str,
    ) -> Result<Vec<MemberChildData>, PersistenceError> {
        queries::children::list_children_for_parent(&mut self.conn, profile_id)
    }

    /// Lists all member children.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_children(
        &mut self,
        search: Option<&str>,
    ) -> Result<Vec<MemberChildData>, PersistenceError> {
        queries::children::list_all_children(&mut self.conn, search)
    }

    /// Updates a member child.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version.
    pub fn update_member_child(
        &mut self,
        child_id: &str,
        fields: &MemberChildFields,
        expected_version: Option<i32>,
    ) -> Result<MemberChildData, PersistenceError> {
        mutations::children::update_member_child(&mut self.conn, child_id, fields, expected_version)
    }

    /// Deletes a member child without check-in history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the child has history.
    pub fn delete_member_child(&mut self, child_id: &str) -> Result<(), PersistenceError> {
        mutations::children::delete_member_child(&mut self.conn, child_id)
    }

    /// Registers a visitor child.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_visitor_child(
        &mut self,
        fields: &VisitorChildFields,
        created_by: Option<&str>,
    ) -> Result<VisitorChildData, PersistenceError> {
        mutations::visitor_children::create_visitor_child(&mut self.conn, fields, created_by)
    }

    /// Retrieves a visitor child.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_visitor_child(
        &mut self,
        visitor_child_id: &str,
    ) -> Result<Option<VisitorChildData>, PersistenceError> {
        queries::visitor_children::get_visitor_child(&mut self.conn, visitor_child_id)
    }

    /// Lists visitor children.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_visitor_children(
        &mut self,
        search: Option<&str>,
    ) -> Result<Vec<VisitorChildData>, PersistenceError> {
        queries::visitor_children::list_visitor_children(&mut self.conn, search)
    }

    // ========================================================================
    // Check-ins
    // ========================================================================

    /// Records a check-in.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the child does not exist.
    pub fn create_check_in(
        &mut self,
        new_check_in: &NewCheckIn,
    ) -> Result<CheckInRecord, PersistenceError> {
        mutations::check_ins::create_check_in(&mut self.conn, new_check_in)
    }

    /// Records a check-out.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the row is already checked out.
    pub fn check_out(&mut self, request: &CheckOut) -> Result<CheckInRecord, PersistenceError> {
        mutations::check_ins::check_out(&mut self.conn, request)
    }

    /// Retrieves a check-in row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_check_in(
        &mut self,
        check_in_id: &str,
    ) -> Result<Option<CheckInRecord>, PersistenceError> {
        queries::check_ins::get_check_in_record(&mut self.conn, check_in_id)
    }

    /// Lists check-ins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_check_ins(
        &mut self,
        filter: &CheckInFilter,
    ) -> Result<Vec<CheckInRecord>, PersistenceError> {
        queries::check_ins::list_check_ins(&mut self.conn, filter)
    }

    // ========================================================================
    // Sermons, schedule and gallery
    // ========================================================================

    /// Lists sermons.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_sermons(
        &mut self,
        language: Option<&str>,
    ) -> Result<Vec<SermonData>, PersistenceError> {
        queries::sermons::list_sermons(&mut self.conn, language)
    }

    /// Retrieves a sermon.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_sermon(&mut self, sermon_id: &str) -> Result<Option<SermonData>, PersistenceError> {
        queries::sermons::get_sermon(&mut self.conn, sermon_id)
    }

    /// Creates a sermon.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_sermon(&mut self, fields: &SermonFields) -> Result<SermonData, PersistenceError> {
        mutations::sermons::create_sermon(&mut self.conn, fields)
    }

    /// Updates a sermon.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version.
    pub fn update_sermon(
        &mut self,
        sermon_id: &str,
        fields: &SermonFields,
        expected_version: Option<i32>,
    ) -> Result<SermonData, PersistenceError> {
        mutations::sermons::update_sermon(&mut self.conn, sermon_id, fields, expected_version)
    }

    /// Deletes a sermon.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn delete_sermon(&mut self, sermon_id: &str) -> Result<(), PersistenceError> {
        mutations::sermons::delete_sermon(&mut self.conn, sermon_id)
    }

    /// Lists schedule events.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_schedule_events(
        &mut self,
        language: Option<&str>,
    ) -> Result<Vec<ScheduleEventData>, PersistenceError> {
        queries::schedule_events::list_schedule_events(&mut self.conn, language)
    }

    /// Retrieves a schedule event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_schedule_event(
        &mut self,
        event_id: &str,
    ) -> Result<Option<ScheduleEventData>, PersistenceError> {
        queries::schedule_events::get_schedule_event(&mut self.conn, event_id)
    }

    /// Creates a schedule event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_schedule_event(
        &mut self,
        fields: &ScheduleEventFields,
    ) -> Result<ScheduleEventData, PersistenceError> {
        mutations::schedule_events::create_schedule_event(&mut self.conn, fields)
    }

    /// Updates a schedule event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` on a stale version.
    pub fn update_schedule_event(
        &mut self,
        event_id: &str,
        fields: &ScheduleEventFields,
        expected_version: Option<i32>,
    ) -> Result<ScheduleEventData, PersistenceError> {
        mutations::schedule_events::update_schedule_event(
            &mut self.conn,
            event_id,
            fields,
            expected_version,
        )
    }

    /// Deletes a schedule event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn delete_schedule_event(&mut self, event_id: &str) -> Result<(), PersistenceError> {
        mutations::schedule_events::delete_schedule_event(&mut self.conn, event_id)
    }

    /// Lists gallery images.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_gallery_images(&mut self) -> Result<Vec<GalleryImageData>, PersistenceError> {
        queries::gallery::list_gallery_images(&mut self.conn)
    }

    /// Retrieves a gallery image.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_gallery_image(
        &mut self,
        image_id: &str,
    ) -> Result<Option<GalleryImageData>, PersistenceError> {
        queries::gallery::get_gallery_image(&mut self.conn, image_id)
    }

    /// Creates a gallery image.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_gallery_image(
        &mut self,
        fields: &GalleryImageFields,
    ) -> Result<GalleryImageData, PersistenceError> {
        mutations::gallery::create_gallery_image(&mut self.conn, fields)
    }

    /// Updates a gallery image.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn update_gallery_image(
        &mut self,
        image_id: &str,
        fields: &GalleryImageFields,
    ) -> Result<GalleryImageData, PersistenceError> {
        mutations::gallery::update_gallery_image(&mut self.conn, image_id, fields)
    }

    /// Deletes a gallery image and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn delete_gallery_image(
        &mut self,
        image_id: &str,
    ) -> Result<GalleryImageData, PersistenceError> {
        mutations::gallery::delete_gallery_image(&mut self.conn, image_id)
    }

    // ========================================================================
    // Visitors and volunteers
    // ========================================================================

    /// Stores a visitor registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_visitor(&mut self, fields: &VisitorFields) -> Result<VisitorData, PersistenceError> {
        mutations::visitors::create_visitor(&mut self.conn, fields)
    }

    /// Retrieves a visitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_visitor(&mut self, visitor_id: &str) -> Result<Option<VisitorData>, PersistenceError> {
        queries::visitors::get_visitor(&mut self.conn, visitor_id)
    }

    /// Lists one page of visitors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_visitors(
        &mut self,
        request: &PageRequest,
    ) -> Result<Page<VisitorData>, PersistenceError> {
        queries::visitors::list_visitors(&mut self.conn, request)
    }

    /// Updates a visitor.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn update_visitor(
        &mut self,
        visitor_id: &str,
        fields: &VisitorFields,
    ) -> Result<VisitorData, PersistenceError> {
        mutations::visitors::update_visitor(&mut self.conn, visitor_id, fields)
    }

    /// Deletes a visitor.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn delete_visitor(&mut self, visitor_id: &str) -> Result<(), PersistenceError> {
        mutations::visitors::delete_visitor(&mut self.conn, visitor_id)
    }

    /// Stores a volunteer sign-up.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_volunteer(
        &mut self,
        fields: &VolunteerFields,
    ) -> Result<VolunteerData, PersistenceError> {
        mutations::volunteers::create_volunteer(&mut self.conn, fields)
    }

    /// Retrieves a volunteer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_volunteer(
        &mut self,
        volunteer_id: &str,
    ) -> Result<Option<VolunteerData>, PersistenceError> {
        queries::volunteers::get_volunteer(&mut self.conn, volunteer_id)
    }

    /// Lists one page of volunteers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_volunteers(
        &mut self,
        request: &PageRequest,
    ) -> Result<Page<VolunteerData>, PersistenceError> {
        queries::volunteers::list_volunteers(&mut self.conn, request)
    }

    /// Updates a volunteer.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn update_volunteer(
        &mut self,
        volunteer_id: &str,
        fields: &VolunteerFields,
    ) -> Result<VolunteerData, PersistenceError> {
        mutations::volunteers::update_volunteer(&mut self.conn, volunteer_id, fields)
    }

    /// Deletes a volunteer.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if it does not exist.
    pub fn delete_volunteer(&mut self, volunteer_id: &str) -> Result<(), PersistenceError> {
        mutations::volunteers::delete_volunteer(&mut self.conn, volunteer_id)
    }
}
