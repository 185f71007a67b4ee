// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor child mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{VisitorChildData, VisitorChildFields};
use crate::diesel_schema::visitor_children;
use crate::error::PersistenceError;
use crate::mutations::new_id;
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable)]
#[diesel(table_name = visitor_children)]
struct NewVisitorChildRow<'a> {
    visitor_child_id: &'a str,
    name: &'a str,
    date_of_birth: Option<&'a str>,
    parent_name: &'a str,
    parent_phone: &'a str,
    parent_email: Option<&'a str>,
    allergies: Option<&'a str>,
    special_needs: Option<&'a str>,
    emergency_contact_name: Option<&'a str>,
    emergency_contact_phone: Option<&'a str>,
    photo_permission: i32,
    created_by: Option<&'a str>,
    created_at: &'a str,
}

/// Registers a visitor child.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_visitor_child(
    conn: &mut SqliteConnection,
    fields: &VisitorChildFields,
    created_by: Option<&str>,
) -> Result<VisitorChildData, PersistenceError> {
    let visitor_child_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(visitor_children::table)
        .values(NewVisitorChildRow {
            visitor_child_id: &visitor_child_id,
            name: &fields.name,
            date_of_birth: fields.date_of_birth.as_deref(),
            parent_name: &fields.parent_name,
            parent_phone: &fields.parent_phone,
            parent_email: fields.parent_email.as_deref(),
            allergies: fields.allergies.as_deref(),
            special_needs: fields.special_needs.as_deref(),
            emergency_contact_name: fields.emergency_contact_name.as_deref(),
            emergency_contact_phone: fields.emergency_contact_phone.as_deref(),
            photo_permission: i32::from(fields.photo_permission),
            created_by,
            created_at: &now,
        })
        .execute(conn)?;

    info!(visitor_child_id, "Visitor child registered");

    queries::visitor_children::get_visitor_child(conn, &visitor_child_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Visitor child {visitor_child_id}"))
    })
}
