// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member child queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::MemberChildData;
use crate::diesel_schema::{check_ins, member_children};
use crate::error::PersistenceError;

/// Diesel Queryable struct for member child rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = member_children)]
struct MemberChildRow {
    child_id: String,
    name: String,
    date_of_birth: Option<String>,
    parent1_id: Option<String>,
    parent2_id: Option<String>,
    allergies: Option<String>,
    special_needs: Option<String>,
    photo_permission: i32,
    version: i32,
    created_at: String,
    updated_at: String,
}

impl From<MemberChildRow> for MemberChildData {
    fn from(row: MemberChildRow) -> Self {
        Self {
            child_id: row.child_id,
            name: row.name,
            date_of_birth: row.date_of_birth,
            parent1_id: row.parent1_id,
            parent2_id: row.parent2_id,
            allergies: row.allergies,
            special_needs: row.special_needs,
            photo_permission: row.photo_permission != 0,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a member child by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the child is not found.
pub fn get_member_child(
    conn: &mut SqliteConnection,
    child_id: &str,
) -> Result<Option<MemberChildData>, PersistenceError> {
    debug!("Looking up member child: {}", child_id);

    let row: Option<MemberChildRow> = member_children::table
        .filter(member_children::child_id.eq(child_id))
        .select(MemberChildRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(MemberChildData::from))
}

/// Lists the children where the profile is either parent, by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_children_for_parent(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Vec<MemberChildData>, PersistenceError> {
    let rows: Vec<MemberChildRow> = member_children::table
        .filter(
            member_children::parent1_id
                .eq(profile_id)
                .or(member_children::parent2_id.eq(profile_id)),
        )
        .order(member_children::name.asc())
        .select(MemberChildRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MemberChildData::from).collect())
}

/// Lists all member children by name, optionally filtered by a name
/// fragment.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_children(
    conn: &mut SqliteConnection,
    search: Option<&str>,
) -> Result<Vec<MemberChildData>, PersistenceError> {
    let pattern: String = format!("%{}%", search.map(str::trim).unwrap_or_default());

    let rows: Vec<MemberChildRow> = member_children::table
        .filter(member_children::name.like(&pattern))
        .order(member_children::name.asc())
        .select(MemberChildRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MemberChildData::from).collect())
}

/// Retrieves several member children by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_member_children(
    conn: &mut SqliteConnection,
    child_ids: &[String],
) -> Result<Vec<MemberChildData>, PersistenceError> {
    if child_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<MemberChildRow> = member_children::table
        .filter(member_children::child_id.eq_any(child_ids))
        .select(MemberChildRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MemberChildData::from).collect())
}

/// Returns true if any check-in row references the child.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn has_check_in_history(
    conn: &mut SqliteConnection,
    child_id: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = check_ins::table
        .filter(check_ins::member_child_id.eq(child_id))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}
