// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor registration queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::data_models::{Page, PageRequest, VisitorData};
use crate::diesel_schema::visitors;
use crate::error::PersistenceError;

/// Diesel Queryable struct for visitor rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = visitors)]
struct VisitorRow {
    visitor_id: String,
    full_name: String,
    email: Option<String>,
    phone: Option<String>,
    visit_date: Option<String>,
    how_heard: Option<String>,
    prayer_request: Option<String>,
    wants_contact: i32,
    followed_up: i32,
    created_at: String,
}

impl From<VisitorRow> for VisitorData {
    fn from(row: VisitorRow) -> Self {
        Self {
            visitor_id: row.visitor_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            visit_date: row.visit_date,
            how_heard: row.how_heard,
            prayer_request: row.prayer_request,
            wants_contact: row.wants_contact != 0,
            followed_up: row.followed_up != 0,
            created_at: row.created_at,
        }
    }
}

fn search_query(pattern: Option<&str>) -> visitors::BoxedQuery<'_, Sqlite> {
    let mut query = visitors::table.into_boxed();
    if let Some(pattern) = pattern {
        query = query.filter(
            visitors::full_name
                .like(pattern)
                .or(visitors::email.like(pattern))
                .or(visitors::phone.like(pattern)),
        );
    }
    query
}

/// Retrieves a visitor by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_visitor(
    conn: &mut SqliteConnection,
    visitor_id: &str,
) -> Result<Option<VisitorData>, PersistenceError> {
    let row: Option<VisitorRow> = visitors::table
        .filter(visitors::visitor_id.eq(visitor_id))
        .select(VisitorRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(VisitorData::from))
}

/// Lists one page of visitors, newest first. The search term matches
/// name, email or phone.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_visitors(
    conn: &mut SqliteConnection,
    request: &PageRequest,
) -> Result<Page<VisitorData>, PersistenceError> {
    let pattern: Option<String> = request.like_pattern();

    let total: i64 = search_query(pattern.as_deref()).count().get_result(conn)?;

    let rows: Vec<VisitorRow> = search_query(pattern.as_deref())
        .order(visitors::created_at.desc())
        .then_order_by(visitors::visitor_id.asc())
        .limit(request.limit())
        .offset(request.offset())
        .select(VisitorRow::as_select())
        .load(conn)?;

    Ok(Page {
        items: rows.into_iter().map(VisitorData::from).collect(),
        total,
        page: request.page.max(1),
        per_page: request.limit(),
    })
}
