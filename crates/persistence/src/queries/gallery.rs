// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kids gallery queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::GalleryImageData;
use crate::diesel_schema::gallery_images;
use crate::error::PersistenceError;

/// Diesel Queryable struct for gallery image rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = gallery_images)]
struct GalleryImageRow {
    image_id: String,
    title: Option<String>,
    description: Option<String>,
    image_url: String,
    display_order: i32,
    created_at: String,
    updated_at: String,
}

impl From<GalleryImageRow> for GalleryImageData {
    fn from(row: GalleryImageRow) -> Self {
        Self {
            image_id: row.image_id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a gallery image by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_gallery_image(
    conn: &mut SqliteConnection,
    image_id: &str,
) -> Result<Option<GalleryImageData>, PersistenceError> {
    let row: Option<GalleryImageRow> = gallery_images::table
        .filter(gallery_images::image_id.eq(image_id))
        .select(GalleryImageRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(GalleryImageData::from))
}

/// Lists gallery images by display order, newest first within an order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_gallery_images(
    conn: &mut SqliteConnection,
) -> Result<Vec<GalleryImageData>, PersistenceError> {
    let rows: Vec<GalleryImageRow> = gallery_images::table
        .order(gallery_images::display_order.asc())
        .then_order_by(gallery_images::created_at.desc())
        .select(GalleryImageRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(GalleryImageData::from).collect())
}
