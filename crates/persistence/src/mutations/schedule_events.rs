// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule event mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{ScheduleEventData, ScheduleEventFields};
use crate::diesel_schema::schedule_events;
use crate::error::PersistenceError;
use crate::mutations::{check_version, new_id};
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = schedule_events, treat_none_as_null = true)]
struct ScheduleEventChangeset<'a> {
    title: &'a str,
    description: Option<&'a str>,
    day_of_week: Option<i32>,
    event_date: Option<&'a str>,
    start_time: &'a str,
    end_time: Option<&'a str>,
    location: Option<&'a str>,
    language: &'a str,
    is_recurring: i32,
}

impl<'a> From<&'a ScheduleEventFields> for ScheduleEventChangeset<'a> {
    fn from(fields: &'a ScheduleEventFields) -> Self {
        Self {
            title: &fields.title,
            description: fields.description.as_deref(),
            day_of_week: fields.day_of_week,
            event_date: fields.event_date.as_deref(),
            start_time: &fields.start_time,
            end_time: fields.end_time.as_deref(),
            location: fields.location.as_deref(),
            language: &fields.language,
            is_recurring: i32::from(fields.is_recurring),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schedule_events)]
struct NewScheduleEventRow<'a> {
    event_id: &'a str,
    #[diesel(embed)]
    fields: ScheduleEventChangeset<'a>,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Creates a schedule event.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_schedule_event(
    conn: &mut SqliteConnection,
    fields: &ScheduleEventFields,
) -> Result<ScheduleEventData, PersistenceError> {
    let event_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(schedule_events::table)
        .values(NewScheduleEventRow {
            event_id: &event_id,
            fields: ScheduleEventChangeset::from(fields),
            created_at: &now,
            updated_at: &now,
        })
        .execute(conn)?;

    info!(event_id, title = %fields.title, "Schedule event created");

    queries::schedule_events::get_schedule_event(conn, &event_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Schedule event {event_id}")))
}

/// Replaces a schedule event's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist and
/// `PersistenceError::VersionConflict` on a stale version.
pub fn update_schedule_event(
    conn: &mut SqliteConnection,
    event_id: &str,
    fields: &ScheduleEventFields,
    expected_version: Option<i32>,
) -> Result<ScheduleEventData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: i32 = schedule_events::table
            .filter(schedule_events::event_id.eq(event_id))
            .select(schedule_events::version)
            .first(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::NotFound(format!("Schedule event {event_id}")))?;
        check_version(expected_version, current)?;

        let now: String = now_timestamp()?;
        diesel::update(schedule_events::table)
            .filter(schedule_events::event_id.eq(event_id))
            .filter(schedule_events::version.eq(current))
            .set((
                ScheduleEventChangeset::from(fields),
                schedule_events::version.eq(current + 1),
                schedule_events::updated_at.eq(&now),
            ))
            .execute(conn)?;

        info!(event_id, version = current + 1, "Schedule event updated");

        queries::schedule_events::get_schedule_event(conn, event_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Schedule event {event_id}")))
    })
}

/// Deletes a schedule event.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist.
pub fn delete_schedule_event(
    conn: &mut SqliteConnection,
    event_id: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(schedule_events::table)
        .filter(schedule_events::event_id.eq(event_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Schedule event with ID {event_id} not found"
        )));
    }

    info!("Deleted schedule event: {}", event_id);
    Ok(())
}
