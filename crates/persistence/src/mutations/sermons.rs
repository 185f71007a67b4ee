// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sermon mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{SermonData, SermonFields};
use crate::diesel_schema::sermons;
use crate::error::PersistenceError;
use crate::mutations::{check_version, new_id};
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = sermons, treat_none_as_null = true)]
struct SermonChangeset<'a> {
    title: &'a str,
    speaker: Option<&'a str>,
    sermon_date: &'a str,
    series: Option<&'a str>,
    description: Option<&'a str>,
    video_url: Option<&'a str>,
    audio_url: Option<&'a str>,
    thumbnail_url: Option<&'a str>,
    language: &'a str,
}

impl<'a> From<&'a SermonFields> for SermonChangeset<'a> {
    fn from(fields: &'a SermonFields) -> Self {
        Self {
            title: &fields.title,
            speaker: fields.speaker.as_deref(),
            sermon_date: &fields.sermon_date,
            series: fields.series.as_deref(),
            description: fields.description.as_deref(),
            video_url: fields.video_url.as_deref(),
            audio_url: fields.audio_url.as_deref(),
            thumbnail_url: fields.thumbnail_url.as_deref(),
            language: &fields.language,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = sermons)]
struct NewSermonRow<'a> {
    sermon_id: &'a str,
    #[diesel(embed)]
    fields: SermonChangeset<'a>,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Creates a sermon.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_sermon(
    conn: &mut SqliteConnection,
    fields: &SermonFields,
) -> Result<SermonData, PersistenceError> {
    let sermon_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(sermons::table)
        .values(NewSermonRow {
            sermon_id: &sermon_id,
            fields: SermonChangeset::from(fields),
            created_at: &now,
            updated_at: &now,
        })
        .execute(conn)?;

    info!(sermon_id, title = %fields.title, "Sermon created");

    queries::sermons::get_sermon(conn, &sermon_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Sermon {sermon_id}")))
}

/// Replaces a sermon's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the sermon does not exist and
/// `PersistenceError::VersionConflict` on a stale version.
pub fn update_sermon(
    conn: &mut SqliteConnection,
    sermon_id: &str,
    fields: &SermonFields,
    expected_version: Option<i32>,
) -> Result<SermonData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: i32 = sermons::table
            .filter(sermons::sermon_id.eq(sermon_id))
            .select(sermons::version)
            .first(conn)
            .optional()?
            .ok_or_else(|| PersistenceError::NotFound(format!("Sermon {sermon_id}")))?;
        check_version(expected_version, current)?;

        let now: String = now_timestamp()?;
        diesel::update(sermons::table)
            .filter(sermons::sermon_id.eq(sermon_id))
            .filter(sermons::version.eq(current))
            .set((
                SermonChangeset::from(fields),
                sermons::version.eq(current + 1),
                sermons::updated_at.eq(&now),
            ))
            .execute(conn)?;

        info!(sermon_id, version = current + 1, "Sermon updated");

        queries::sermons::get_sermon(conn, sermon_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Sermon {sermon_id}")))
    })
}

/// Deletes a sermon.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the sermon does not exist.
pub fn delete_sermon(conn: &mut SqliteConnection, sermon_id: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(sermons::table)
        .filter(sermons::sermon_id.eq(sermon_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Sermon with ID {sermon_id} not found"
        )));
    }

    info!("Deleted sermon: {}", sermon_id);
    Ok(())
}
