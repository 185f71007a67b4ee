// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member child mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{MemberChildData, MemberChildFields};
use crate::diesel_schema::member_children;
use crate::error::PersistenceError;
use crate::mutations::{check_version, new_id};
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(AsChangeset)]
#[diesel(table_name = member_children, treat_none_as_null = true)]
struct MemberChildChangeset<'a> {
    name: &'a str,
    date_of_birth: Option<&'a str>,
    parent1_id: Option<&'a str>,
    parent2_id: Option<&'a str>,
    allergies: Option<&'a str>,
    special_needs: Option<&'a str>,
    photo_permission: i32,
}

impl<'a> From<&'a MemberChildFields> for MemberChildChangeset<'a> {
    fn from(fields: &'a MemberChildFields) -> Self {
        Self {
            name: &fields.name,
            date_of_birth: fields.date_of_birth.as_deref(),
            parent1_id: fields.parent1_id.as_deref(),
            parent2_id: fields.parent2_id.as_deref(),
            allergies: fields.allergies.as_deref(),
            special_needs: fields.special_needs.as_deref(),
            photo_permission: i32::from(fields.photo_permission),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = member_children)]
struct NewMemberChildRow<'a> {
    child_id: &'a str,
    name: &'a str,
    date_of_birth: Option<&'a str>,
    parent1_id: Option<&'a str>,
    parent2_id: Option<&'a str>,
    allergies: Option<&'a str>,
    special_needs: Option<&'a str>,
    photo_permission: i32,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Creates a member child.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if a parent profile does
/// not exist, or another error if the insert fails.
pub fn create_member_child(
    conn: &mut SqliteConnection,
    fields: &MemberChildFields,
) -> Result<MemberChildData, PersistenceError> {
    let child_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(member_children::table)
        .values(NewMemberChildRow {
            child_id: &child_id,
            name: &fields.name,
            date_of_birth: fields.date_of_birth.as_deref(),
            parent1_id: fields.parent1_id.as_deref(),
            parent2_id: fields.parent2_id.as_deref(),
            allergies: fields.allergies.as_deref(),
            special_needs: fields.special_needs.as_deref(),
            photo_permission: i32::from(fields.photo_permission),
            created_at: &now,
            updated_at: &now,
        })
        .execute(conn)?;

    info!(child_id, "Member child created");

    queries::children::get_member_child(conn, &child_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Member child {child_id}")))
}

/// Replaces a member child's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the child does not exist and
/// `PersistenceError::VersionConflict` on a stale version.
pub fn update_member_child(
    conn: &mut SqliteConnection,
    child_id: &str,
    fields: &MemberChildFields,
    expected_version: Option<i32>,
) -> Result<MemberChildData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: i32 = member_children::table
            .filter(member_children::child_id.eq(child_id))
            .select(member_children::version)
            .first(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::NotFound(format!("Member child {child_id}")))?;
        check_version(expected_version, current)?;

        let now: String = now_timestamp()?;
        diesel::update(member_children::table)
            .filter(member_children::child_id.eq(child_id))
            .filter(member_children::version.eq(current))
            .set((
                MemberChildChangeset::from(fields),
                member_children::version.eq(current + 1),
                member_children::updated_at.eq(&now),
            ))
            .execute(conn)?;

        info!(child_id, version = current + 1, "Member child updated");

        queries::children::get_member_child(conn, child_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Member child {child_id}")))
    })
}

/// Deletes a member child that has no check-in history.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if check-in rows reference the
/// child and `PersistenceError::NotFound` if it does not exist.
pub fn delete_member_child(
    conn: &mut SqliteConnection,
    child_id: &str,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete member child: {}", child_id);

    if queries::children::has_check_in_history(conn, child_id)? {
        return Err(PersistenceError::Conflict(format!(
            "Member child {child_id} has check-in history and cannot be deleted"
        )));
    }

    let rows_affected: usize = diesel::delete(member_children::table)
        .filter(member_children::child_id.eq(child_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Member child with ID {child_id} not found"
        )));
    }

    info!("Deleted member child: {}", child_id);
    Ok(())
}
