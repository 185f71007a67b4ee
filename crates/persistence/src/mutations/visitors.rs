// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor registration mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{VisitorData, VisitorFields};
use crate::diesel_schema::visitors;
use crate::error::PersistenceError;
use crate::mutations::new_id;
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = visitors, treat_none_as_null = true)]
struct VisitorChangeset<'a> {
    full_name: &'a str,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    visit_date: Option<&'a str>,
    how_heard: Option<&'a str>,
    prayer_request: Option<&'a str>,
    wants_contact: i32,
    followed_up: i32,
}

impl<'a> From<&'a VisitorFields> for VisitorChangeset<'a> {
    fn from(fields: &'a VisitorFields) -> Self {
        Self {
            full_name: &fields.full_name,
            email: fields.email.as_deref(),
            phone: fields.phone.as_deref(),
            visit_date: fields.visit_date.as_deref(),
            how_heard: fields.how_heard.as_deref(),
            prayer_request: fields.prayer_request.as_deref(),
            wants_contact: i32::from(fields.wants_contact),
            followed_up: i32::from(fields.followed_up),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = visitors)]
struct NewVisitorRow<'a> {
    visitor_id: &'a str,
    #[diesel(embed)]
    fields: VisitorChangeset<'a>,
    created_at: &'a str,
}

/// Stores a visitor registration.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_visitor(
    conn: &mut SqliteConnection,
    fields: &VisitorFields,
) -> Result<VisitorData, PersistenceError> {
    let visitor_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(visitors::table)
        .values(NewVisitorRow {
            visitor_id: &visitor_id,
            fields: VisitorChangeset::from(fields),
            created_at: &now,
        })
        .execute(conn)?;

    info!(visitor_id, "Visitor registered");

    queries::visitors::get_visitor(conn, &visitor_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Visitor {visitor_id}")))
}

/// Replaces a visitor registration.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the visitor does not exist.
pub fn update_visitor(
    conn: &mut SqliteConnection,
    visitor_id: &str,
    fields: &VisitorFields,
) -> Result<VisitorData, PersistenceError> {
    let rows_affected: usize = diesel::update(visitors::table)
        .filter(visitors::visitor_id.eq(visitor_id))
        .set(VisitorChangeset::from(fields))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Visitor with ID {visitor_id} not found"
        )));
    }

    queries::visitors::get_visitor(conn, visitor_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Visitor {visitor_id}")))
}

/// Deletes a visitor registration.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the visitor does not exist.
pub fn delete_visitor(conn: &mut SqliteConnection, visitor_id: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(visitors::table)
        .filter(visitors::visitor_id.eq(visitor_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Visitor with ID {visitor_id} not found"
        )));
    }

    info!("Deleted visitor: {}", visitor_id);
    Ok(())
}
