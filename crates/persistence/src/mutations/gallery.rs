// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kids gallery mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{GalleryImageData, GalleryImageFields};
use crate::diesel_schema::gallery_images;
use crate::error::PersistenceError;
use crate::mutations::new_id;
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = gallery_images, treat_none_as_null = true)]
struct GalleryImageChangeset<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    image_url: &'a str,
    display_order: i32,
}

impl<'a> From<&'a GalleryImageFields> for GalleryImageChangeset<'a> {
    fn from(fields: &'a GalleryImageFields) -> Self {
        Self {
            title: fields.title.as_deref(),
            description: fields.description.as_deref(),
            image_url: &fields.image_url,
            display_order: fields.display_order,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = gallery_images)]
struct NewGalleryImageRow<'a> {
    image_id: &'a str,
    #[diesel(embed)]
    fields: GalleryImageChangeset<'a>,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Adds an image to the gallery.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_gallery_image(
    conn: &mut SqliteConnection,
    fields: &GalleryImageFields,
) -> Result<GalleryImageData, PersistenceError> {
    let image_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(gallery_images::table)
        .values(NewGalleryImageRow {
            image_id: &image_id,
            fields: GalleryImageChangeset::from(fields),
            created_at: &now,
            updated_at: &now,
        })
        .execute(conn)?;

    info!(image_id, "Gallery image created");

    queries::gallery::get_gallery_image(conn, &image_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Gallery image {image_id}")))
}

/// Replaces a gallery image's fields.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the image does not exist.
pub fn update_gallery_image(
    conn: &mut SqliteConnection,
    image_id: &str,
    fields: &GalleryImageFields,
) -> Result<GalleryImageData, PersistenceError> {
    let now: String = now_timestamp()?;
    let rows_affected: usize = diesel::update(gallery_images::table)
        .filter(gallery_images::image_id.eq(image_id))
        .set((
            GalleryImageChangeset::from(fields),
            gallery_images::updated_at.eq(&now),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Gallery image with ID {image_id} not found"
        )));
    }

    queries::gallery::get_gallery_image(conn, image_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Gallery image {image_id}")))
}

/// Deletes a gallery image row.
///
/// # Returns
///
/// The deleted row, so the caller can remove the stored object.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the image does not exist.
pub fn delete_gallery_image(
    conn: &mut SqliteConnection,
    image_id: &str,
) -> Result<GalleryImageData, PersistenceError> {
    let image: GalleryImageData = queries::gallery::get_gallery_image(conn, image_id)?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!("Gallery image with ID {image_id} not found"))
        })?;

    diesel::delete(gallery_images::table)
        .filter(gallery_images::image_id.eq(image_id))
        .execute(conn)?;

    info!("Deleted gallery image: {}", image_id);
    Ok(image)
}
