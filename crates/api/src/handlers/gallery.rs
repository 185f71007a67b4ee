// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vine kids gallery handlers.
//!
//! Image bytes are written by the server's storage layer. These handlers
//! authorize and validate uploads and manage the gallery rows.

use tracing::info;
use vine_domain::validate_image_upload;
use vine_persistence::{GalleryImageData, GalleryImageFields, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{optional_text, required_text};
use crate::request_response::{GalleryImageRequest, ImageUpload};

fn build_fields(request: &GalleryImageRequest) -> Result<GalleryImageFields, ApiError> {
    Ok(GalleryImageFields {
        title: optional_text(request.title.as_deref()),
        description: optional_text(request.description.as_deref()),
        image_url: required_text("image_url", request.image_url.as_deref())?,
        display_order: request.display_order.unwrap_or(0),
    })
}

/// Lists gallery images in display order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_gallery_images(
    persistence: &mut Persistence,
) -> Result<Vec<GalleryImageData>, ApiError> {
    persistence
        .list_gallery_images()
        .map_err(|e| translate_persistence_error(e, "Gallery image"))
}

/// Retrieves one gallery image.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_gallery_image(
    persistence: &mut Persistence,
    image_id: &str,
) -> Result<GalleryImageData, ApiError> {
    persistence
        .get_gallery_image(image_id)
        .map_err(|e| translate_persistence_error(e, "Gallery image"))?
        .ok_or_else(|| ApiError::not_found("Gallery image", image_id))
}

/// Creates a gallery image row.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins.
pub fn create_gallery_image(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &GalleryImageRequest,
) -> Result<GalleryImageData, ApiError> {
    AuthorizationService::require_admin(actor, "create_gallery_image")?;
    let fields: GalleryImageFields = build_fields(request)?;

    let image: GalleryImageData = persistence
        .create_gallery_image(&fields)
        .map_err(|e| translate_persistence_error(e, "Gallery image"))?;

    info!(image_id = %image.image_id, "Gallery image created");
    Ok(image)
}

/// Replaces a gallery image row.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown image.
pub fn update_gallery_image(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    image_id: &str,
    request: &GalleryImageRequest,
) -> Result<GalleryImageData, ApiError> {
    AuthorizationService::require_admin(actor, "update_gallery_image")?;
    let fields: GalleryImageFields = build_fields(request)?;

    persistence
        .update_gallery_image(image_id, &fields)
        .map_err(|e| translate_persistence_error(e, "Gallery image"))
}

/// Deletes a gallery image row and returns it so the caller can remove
/// the stored file.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown image.
pub fn delete_gallery_image(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    image_id: &str,
) -> Result<GalleryImageData, ApiError> {
    AuthorizationService::require_admin(actor, "delete_gallery_image")?;

    let removed: GalleryImageData = persistence
        .delete_gallery_image(image_id)
        .map_err(|e| translate_persistence_error(e, "Gallery image"))?;

    info!(image_id, "Gallery image deleted");
    Ok(removed)
}

/// Authorizes and validates an image upload.
///
/// # Returns
///
/// The file extension to store the image under.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins, a validation error for a
/// non-image type and `ApiError::PayloadTooLarge` above the size limit.
pub fn authorize_upload(
    actor: &AuthenticatedActor,
    upload: &ImageUpload,
) -> Result<&'static str, ApiError> {
    AuthorizationService::require_admin(actor, "upload_gallery_image")?;
    Ok(validate_image_upload(&upload.content_type, upload.size)?)
}
