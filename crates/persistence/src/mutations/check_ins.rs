// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in mutations.
//!
//! Check-out is a single update filtered on `status = 'checked_in'`, so of
//! two concurrent check-outs of the same row exactly one succeeds.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{info, warn};
use vine_domain::{CheckInStatus, ChildRef};

use crate::data_models::{CheckInRecord, CheckOut, NewCheckIn};
use crate::diesel_schema::check_ins;
use crate::error::PersistenceError;
use crate::mutations::{check_version, new_id};
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable)]
#[diesel(table_name = check_ins)]
struct NewCheckInRow<'a> {
    check_in_id: &'a str,
    member_child_id: Option<&'a str>,
    visitor_child_id: Option<&'a str>,
    checked_in_by: &'a str,
    checked_in_by_name: &'a str,
    checked_in_at: &'a str,
    status: &'a str,
    checkin_notes: Option<&'a str>,
}

/// Records a child's arrival.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the referenced child does not
/// exist, or another error if the insert fails.
pub fn create_check_in(
    conn: &mut SqliteConnection,
    new_check_in: &NewCheckIn,
) -> Result<CheckInRecord, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: bool = match &new_check_in.child {
            ChildRef::Member(id) => queries::children::get_member_child(conn, id)?.is_some(),
            ChildRef::Visitor(id) => {
                queries::visitor_children::get_visitor_child(conn, id)?.is_some()
            }
        };
        if !exists {
            return Err(PersistenceError::NotFound(format!(
                "Child {}",
                new_check_in.child.id()
            )));
        }

        let check_in_id: String = new_id();
        let now: String = now_timestamp()?;

        diesel::insert_into(check_ins::table)
            .values(NewCheckInRow {
                check_in_id: &check_in_id,
                member_child_id: new_check_in.child.member_child_id(),
                visitor_child_id: new_check_in.child.visitor_child_id(),
                checked_in_by: &new_check_in.checked_in_by,
                checked_in_by_name: &new_check_in.checked_in_by_name,
                checked_in_at: &now,
                status: CheckInStatus::CheckedIn.as_str(),
                checkin_notes: new_check_in.checkin_notes.as_deref(),
            })
            .execute(conn)?;

        info!(
            check_in_id,
            child_id = new_check_in.child.id(),
            checked_in_by = %new_check_in.checked_in_by,
            "Child checked in"
        );

        queries::check_ins::get_check_in_record(conn, &check_in_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Check-in {check_in_id}")))
    })
}

/// Records a child's departure.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the row does not exist,
/// `PersistenceError::Conflict` if it was already checked out and
/// `PersistenceError::VersionConflict` on a stale version.
pub fn check_out(
    conn: &mut SqliteConnection,
    request: &CheckOut,
) -> Result<CheckInRecord, PersistenceError> {
    let check_in_id: &str = &request.check_in_id;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current = queries::check_ins::get_check_in(conn, check_in_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Check-in {check_in_id}")))?;
        check_version(request.expected_version, current.version)?;

        let now: String = now_timestamp()?;
        let rows_affected: usize = diesel::update(check_ins::table)
            .filter(check_ins::check_in_id.eq(check_in_id))
            .filter(check_ins::status.eq(CheckInStatus::CheckedIn.as_str()))
            .set((
                check_ins::status.eq(CheckInStatus::CheckedOut.as_str()),
                check_ins::checked_out_by.eq(Some(request.checked_out_by.as_str())),
                check_ins::checked_out_by_name.eq(Some(request.checked_out_by_name.as_str())),
                check_ins::checked_out_at.eq(Some(now.as_str())),
                check_ins::checkout_notes.eq(request.checkout_notes.as_deref()),
                check_ins::version.eq(current.version + 1),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            warn!(check_in_id, status = %current.status, "Rejected check-out");
            return Err(PersistenceError::Conflict(format!(
                "Check-in {check_in_id} is already {}",
                current.status
            )));
        }

        info!(
            check_in_id,
            checked_out_by = %request.checked_out_by,
            "Child checked out"
        );

        queries::check_ins::get_check_in_record(conn, check_in_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Check-in {check_in_id}")))
    })
}
