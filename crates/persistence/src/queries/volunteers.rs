// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Volunteer sign-up queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::data_models::{Page, PageRequest, VolunteerData};
use crate::diesel_schema::volunteers;
use crate::error::PersistenceError;

/// Diesel Queryable struct for volunteer rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = volunteers)]
struct VolunteerRow {
    volunteer_id: String,
    full_name: String,
    email: Option<String>,
    phone: Option<String>,
    areas: String,
    availability: Option<String>,
    message: Option<String>,
    contacted: i32,
    created_at: String,
}

impl TryFrom<VolunteerRow> for VolunteerData {
    type Error = PersistenceError;

    fn try_from(row: VolunteerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            volunteer_id: row.volunteer_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            areas: serde_json::from_str(&row.areas)?,
            availability: row.availability,
            message: row.message,
            contacted: row.contacted != 0,
            created_at: row.created_at,
        })
    }
}

fn search_query(pattern: Option<&str>) -> volunteers::BoxedQuery<'_, Sqlite> {
    let mut query = volunteers::table.into_boxed();
    if let Some(pattern) = pattern {
        query = query.filter(
            volunteers::full_name
                .like(pattern)
                .or(volunteers::email.like(pattern))
                .or(volunteers::phone.like(pattern))
                .or(volunteers::areas.like(pattern)),
        );
    }
    query
}

/// Retrieves a volunteer by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored areas are
/// not valid JSON.
pub fn get_volunteer(
    conn: &mut SqliteConnection,
    volunteer_id: &str,
) -> Result<Option<VolunteerData>, PersistenceError> {
    let row: Option<VolunteerRow> = volunteers::table
        .filter(volunteers::volunteer_id.eq(volunteer_id))
        .select(VolunteerRow::as_select())
        .first(conn)
        .optional()?;

    row.map(VolunteerData::try_from).transpose()
}

/// Lists one page of volunteers, newest first. The search term matches
/// name, email, phone or area.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_volunteers(
    conn: &mut SqliteConnection,
    request: &PageRequest,
) -> Result<Page<VolunteerData>, PersistenceError> {
    let pattern: Option<String> = request.like_pattern();

    let total: i64 = search_query(pattern.as_deref()).count().get_result(conn)?;

    let rows: Vec<VolunteerRow> = search_query(pattern.as_deref())
        .order(volunteers::created_at.desc())
        .then_order_by(volunteers::volunteer_id.asc())
        .limit(request.limit())
        .offset(request.offset())
        .select(VolunteerRow::as_select())
        .load(conn)?;

    Ok(Page {
        items: rows
            .into_iter()
            .map(VolunteerData::try_from)
            .collect::<Result<Vec<_>, _>>()?,
        total,
        page: request.page.max(1),
        per_page: request.limit(),
    })
}
