// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor child queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::VisitorChildData;
use crate::diesel_schema::visitor_children;
use crate::error::PersistenceError;

/// Diesel Queryable struct for visitor child rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = visitor_children)]
struct VisitorChildRow {
    visitor_child_id: String,
    name: String,
    date_of_birth: Option<String>,
    parent_name: String,
    parent_phone: String,
    parent_email: Option<String>,
    allergies: Option<String>,
    special_needs: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_phone: Option<String>,
    photo_permission: i32,
    created_by: Option<String>,
    created_at: String,
}

impl From<VisitorChildRow> for VisitorChildData {
    fn from(row: VisitorChildRow) -> Self {
        Self {
            visitor_child_id: row.visitor_child_id,
            name: row.name,
            date_of_birth: row.date_of_birth,
            parent_name: row.parent_name,
            parent_phone: row.parent_phone,
            parent_email: row.parent_email,
            allergies: row.allergies,
            special_needs: row.special_needs,
            emergency_contact_name: row.emergency_contact_name,
            emergency_contact_phone: row.emergency_contact_phone,
            photo_permission: row.photo_permission != 0,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a visitor child by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the child is not found.
pub fn get_visitor_child(
    conn: &mut SqliteConnection,
    visitor_child_id: &str,
) -> Result<Option<VisitorChildData>, PersistenceError> {
    let row: Option<VisitorChildRow> = visitor_children::table
        .filter(visitor_children::visitor_child_id.eq(visitor_child_id))
        .select(VisitorChildRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(VisitorChildData::from))
}

/// Lists visitor children, newest first, optionally filtered by child or
/// parent name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_visitor_children(
    conn: &mut SqliteConnection,
    search: Option<&str>,
) -> Result<Vec<VisitorChildData>, PersistenceError> {
    let pattern: String = format!("%{}%", search.map(str::trim).unwrap_or_default());

    let rows: Vec<VisitorChildRow> = visitor_children::table
        .filter(
            visitor_children::name
                .like(&pattern)
                .or(visitor_children::parent_name.like(&pattern)),
        )
        .order(visitor_children::created_at.desc())
        .select(VisitorChildRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(VisitorChildData::from).collect())
}

/// Retrieves several visitor children by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_visitor_children(
    conn: &mut SqliteConnection,
    visitor_child_ids: &[String],
) -> Result<Vec<VisitorChildData>, PersistenceError> {
    if visitor_child_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<VisitorChildRow> = visitor_children::table
        .filter(visitor_children::visitor_child_id.eq_any(visitor_child_ids))
        .select(VisitorChildRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(VisitorChildData::from).collect())
}
