// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sermon queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::SermonData;
use crate::diesel_schema::sermons;
use crate::error::PersistenceError;

/// Diesel Queryable struct for sermon rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sermons)]
struct SermonRow {
    sermon_id: String,
    title: String,
    speaker: Option<String>,
    sermon_date: String,
    series: Option<String>,
    description: Option<String>,
    video_url: Option<String>,
    audio_url: Option<String>,
    thumbnail_url: Option<String>,
    language: String,
    version: i32,
    created_at: String,
    updated_at: String,
}

impl From<SermonRow> for SermonData {
    fn from(row: SermonRow) -> Self {
        Self {
            sermon_id: row.sermon_id,
            title: row.title,
            speaker: row.speaker,
            sermon_date: row.sermon_date,
            series: row.series,
            description: row.description,
            video_url: row.video_url,
            audio_url: row.audio_url,
            thumbnail_url: row.thumbnail_url,
            language: row.language,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a sermon by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_sermon(
    conn: &mut SqliteConnection,
    sermon_id: &str,
) -> Result<Option<SermonData>, PersistenceError> {
    let row: Option<SermonRow> = sermons::table
        .filter(sermons::sermon_id.eq(sermon_id))
        .select(SermonRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(SermonData::from))
}

/// Lists sermons, most recent first, optionally for one language.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_sermons(
    conn: &mut SqliteConnection,
    language: Option<&str>,
) -> Result<Vec<SermonData>, PersistenceError> {
    let mut query = sermons::table.into_boxed();
    if let Some(language) = language {
        query = query.filter(sermons::language.eq(language.to_string()));
    }

    let rows: Vec<SermonRow> = query
        .order(sermons::sermon_date.desc())
        .then_order_by(sermons::created_at.desc())
        .select(SermonRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(SermonData::from).collect())
}
