// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::ScheduleEventData;
use crate::diesel_schema::schedule_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for schedule event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedule_events)]
struct ScheduleEventRow {
    event_id: String,
    title: String,
    description: Option<String>,
    day_of_week: Option<i32>,
    event_date: Option<String>,
    start_time: String,
    end_time: Option<String>,
    location: Option<String>,
    language: String,
    is_recurring: i32,
    version: i32,
    created_at: String,
    updated_at: String,
}

impl From<ScheduleEventRow> for ScheduleEventData {
    fn from(row: ScheduleEventRow) -> Self {
        Self {
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            day_of_week: row.day_of_week,
            event_date: row.event_date,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            language: row.language,
            is_recurring: row.is_recurring != 0,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a schedule event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_schedule_event(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> Result<Option<ScheduleEventData>, PersistenceError> {
    let row: Option<ScheduleEventRow> = schedule_events::table
        .filter(schedule_events::event_id.eq(event_id))
        .select(ScheduleEventRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ScheduleEventData::from))
}

/// Lists schedule events by weekday then start time, optionally for one
/// language. One-off events without a weekday sort last.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_schedule_events(
    conn: &mut SqliteConnection,
    language: Option<&str>,
) -> Result<Vec<ScheduleEventData>, PersistenceError> {
    let mut query = schedule_events::table.into_boxed();
    if let Some(language) = language {
        query = query.filter(schedule_events::language.eq(language.to_string()));
    }

    let rows: Vec<ScheduleEventRow> = query
        .order(schedule_events::day_of_week.is_null())
        .then_order_by(schedule_events::day_of_week.asc())
        .then_order_by(schedule_events::event_date.asc())
        .then_order_by(schedule_events::start_time.asc())
        .select(ScheduleEventRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(ScheduleEventData::from).collect())
}
