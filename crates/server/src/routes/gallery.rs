// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vine Kids gallery.
//!
//! Uploading is two steps: the image bytes go to `/upload`, which answers
//! with a public URL, and the client then creates the gallery row that
//! points at it.

use axum::{
    body::Bytes,
    extract::{Path, State as AxumState, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};
use tracing::{error, info, warn};
use vine_api::handlers::gallery::{
    authorize_upload, create_gallery_image, delete_gallery_image, get_gallery_image,
    list_gallery_images, update_gallery_image,
};
use vine_api::{AuthorizationService, GalleryImageRequest, ImageUpload, UploadResponse};
use vine_persistence::GalleryImageData;

use super::deleted;
use crate::AppState;
use crate::error::{HttpError, HttpResult, respond};
use crate::session::{JsonBody, SessionActor};

/// Handler for GET `/api/vine-kids-gallery`.
pub async fn handle_list_images(AxumState(app_state): AxumState<AppState>) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let images: Vec<GalleryImageData> = list_gallery_images(&mut persistence)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, images))
}

/// Handler for GET `/api/vine-kids-gallery/{id}`.
pub async fn handle_get_image(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let image: GalleryImageData = get_gallery_image(&mut persistence, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, image))
}

/// Handler for POST `/api/vine-kids-gallery`.
pub async fn handle_create_image(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<GalleryImageRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let image: GalleryImageData = create_gallery_image(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, image))
}

/// Handler for POST `/api/vine-kids-gallery/upload`.
///
/// The body is the raw image. Non-admins are refused before the body is
/// looked at, so an oversized upload from a member is a 403, not a 413.
pub async fn handle_upload_image(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> HttpResult {
    AuthorizationService::require_admin(&actor, "upload_gallery_image")?;
    let bytes: Bytes = body?;

    let content_type: String = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let extension: &'static str = authorize_upload(
        &actor,
        &ImageUpload {
            content_type,
            size: bytes.len(),
        },
    )?;

    let stored: UploadResponse = app_state
        .uploads
        .store(extension, &bytes)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store uploaded image");
            HttpError::internal("Failed to store image")
        })?;

    info!(
        account_id = %actor.account_id,
        file_name = %stored.file_name,
        "Gallery image uploaded"
    );
    Ok(respond(StatusCode::CREATED, stored))
}

/// Handler for PUT `/api/vine-kids-gallery/{id}`.
pub async fn handle_update_image(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<GalleryImageRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let image: GalleryImageData = update_gallery_image(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, image))
}

/// Handler for DELETE `/api/vine-kids-gallery/{id}`.
///
/// Removes the stored file too when it was uploaded here. A file that
/// cannot be removed is logged and left behind; the row stays deleted.
pub async fn handle_delete_image(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let removed: GalleryImageData = delete_gallery_image(&mut persistence, &actor, &id)?;
    drop(persistence);

    if let Err(e) = app_state.uploads.remove(&removed.image_url).await {
        warn!(error = %e, image_url = %removed.image_url, "Failed to remove stored image");
    }

    Ok(deleted(id))
}
