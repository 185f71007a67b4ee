// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in queries.
//!
//! Listing resolves each row's child and parent contact with one batched
//! lookup per table instead of one query per row.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{
    CheckInData, CheckInFilter, CheckInRecord, MemberChildData, VisitorChildData,
};
use crate::diesel_schema::check_ins;
use crate::error::PersistenceError;
use crate::queries::{children, member_profiles, visitor_children};
use crate::timestamps::format_date;

/// Diesel Queryable struct for check-in rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = check_ins)]
struct CheckInRow {
    check_in_id: String,
    member_child_id: Option<String>,
    visitor_child_id: Option<String>,
    checked_in_by: String,
    checked_in_by_name: String,
    checked_in_at: String,
    status: String,
    checked_out_by: Option<String>,
    checked_out_by_name: Option<String>,
    checked_out_at: Option<String>,
    checkin_notes: Option<String>,
    checkout_notes: Option<String>,
    version: i32,
}

impl From<CheckInRow> for CheckInData {
    fn from(row: CheckInRow) -> Self {
        Self {
            check_in_id: row.check_in_id,
            member_child_id: row.member_child_id,
            visitor_child_id: row.visitor_child_id,
            checked_in_by: row.checked_in_by,
            checked_in_by_name: row.checked_in_by_name,
            checked_in_at: row.checked_in_at,
            status: row.status,
            checked_out_by: row.checked_out_by,
            checked_out_by_name: row.checked_out_by_name,
            checked_out_at: row.checked_out_at,
            checkin_notes: row.checkin_notes,
            checkout_notes: row.checkout_notes,
            version: row.version,
        }
    }
}

/// Retrieves a check-in row by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the row is not found.
pub fn get_check_in(
    conn: &mut SqliteConnection,
    check_in_id: &str,
) -> Result<Option<CheckInData>, PersistenceError> {
    debug!("Looking up check-in: {}", check_in_id);

    let row: Option<CheckInRow> = check_ins::table
        .filter(check_ins::check_in_id.eq(check_in_id))
        .select(CheckInRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CheckInData::from))
}

/// Retrieves a check-in row joined with its child.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the row is not found.
pub fn get_check_in_record(
    conn: &mut SqliteConnection,
    check_in_id: &str,
) -> Result<Option<CheckInRecord>, PersistenceError> {
    let Some(check_in) = get_check_in(conn, check_in_id)? else {
        return Ok(None);
    };

    Ok(attach_children(conn, vec![check_in])?.pop())
}

/// Lists check-ins matching the filter, newest first.
///
/// `from_date` and `to_date` are inclusive calendar days over
/// `checked_in_at`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_check_ins(
    conn: &mut SqliteConnection,
    filter: &CheckInFilter,
) -> Result<Vec<CheckInRecord>, PersistenceError> {
    debug!(?filter, "Listing check-ins");

    let lower: String = match filter.from_date {
        Some(date) => format_date(date)?,
        None => String::new(),
    };
    // The day after `to_date`, compared exclusively. Stored timestamps
    // always sort below "~".
    let upper: String = match filter.to_date.and_then(time::Date::next_day) {
        Some(date) => format_date(date)?,
        None => String::from("~"),
    };

    let mut query = check_ins::table
        .filter(check_ins::checked_in_at.ge(lower))
        .filter(check_ins::checked_in_at.lt(upper))
        .into_boxed();

    if let Some(status) = &filter.status {
        query = query.filter(check_ins::status.eq(status.clone()));
    }

    let rows: Vec<CheckInRow> = query
        .order(check_ins::checked_in_at.desc())
        .then_order_by(check_ins::check_in_id.desc())
        .select(CheckInRow::as_select())
        .load(conn)?;

    attach_children(conn, rows.into_iter().map(CheckInData::from).collect())
}

/// Joins check-in rows to their member or visitor child.
///
/// Member children take the parent contact from parent 1, falling back to
/// parent 2. Visitor children carry their own parent contact.
fn attach_children(
    conn: &mut SqliteConnection,
    rows: Vec<CheckInData>,
) -> Result<Vec<CheckInRecord>, PersistenceError> {
    let member_ids: Vec<String> = rows
        .iter()
        .filter_map(|r| r.member_child_id.clone())
        .collect();
    let visitor_ids: Vec<String> = rows
        .iter()
        .filter_map(|r| r.visitor_child_id.clone())
        .collect();

    let members: HashMap<String, MemberChildData> = children::get_member_children(conn, &member_ids)?
        .into_iter()
        .map(|c| (c.child_id.clone(), c))
        .collect();
    let visitors: HashMap<String, VisitorChildData> =
        visitor_children::get_visitor_children(conn, &visitor_ids)?
            .into_iter()
            .map(|c| (c.visitor_child_id.clone(), c))
            .collect();

    let parent_ids: Vec<String> = members
        .values()
        .flat_map(|c| [c.parent1_id.clone(), c.parent2_id.clone()])
        .flatten()
        .collect();
    let parents: HashMap<String, (String, String)> =
        member_profiles::get_contacts_for_profiles(conn, &parent_ids)?;

    Ok(rows
        .into_iter()
        .map(|check_in| {
            if let Some(child) = check_in
                .member_child_id
                .as_ref()
                .and_then(|id| members.get(id))
            {
                let parent = [&child.parent1_id, &child.parent2_id]
                    .into_iter()
                    .flatten()
                    .find_map(|id| parents.get(id));
                CheckInRecord {
                    child_type: String::from("member"),
                    child_name: Some(child.name.clone()),
                    child_date_of_birth: child.date_of_birth.clone(),
                    allergies: child.allergies.clone(),
                    special_needs: child.special_needs.clone(),
                    parent_name: parent.map(|(name, _)| name.clone()),
                    parent_phone: parent.map(|(_, phone)| phone.clone()),
                    check_in,
                }
            } else if let Some(child) = check_in
                .visitor_child_id
                .as_ref()
                .and_then(|id| visitors.get(id))
            {
                CheckInRecord {
                    child_type: String::from("visitor"),
                    child_name: Some(child.name.clone()),
                    child_date_of_birth: child.date_of_birth.clone(),
                    allergies: child.allergies.clone(),
                    special_needs: child.special_needs.clone(),
                    parent_name: Some(child.parent_name.clone()),
                    parent_phone: Some(child.parent_phone.clone()),
                    check_in,
                }
            } else {
                let child_type: &str = if check_in.member_child_id.is_some() {
                    "member"
                } else {
                    "visitor"
                };
                CheckInRecord {
                    child_type: child_type.to_string(),
                    child_name: None,
                    child_date_of_birth: None,
                    allergies: None,
                    special_needs: None,
                    parent_name: None,
                    parent_phone: None,
                    check_in,
                }
            }
        })
        .collect())
}
