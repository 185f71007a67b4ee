// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sermon handlers. Reads are public, writes are admin only.

use tracing::{info, warn};
use vine_persistence::{Persistence, SermonData, SermonFields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    language_filter, language_or_default, optional_text, required_date, required_text,
};
use crate::request_response::{ContentList, DataSource, LanguageQuery, SermonRequest};
use crate::static_content::fallback_sermons;

fn build_fields(request: &SermonRequest) -> Result<SermonFields, ApiError> {
    Ok(SermonFields {
        title: required_text("title", request.title.as_deref())?,
        speaker: optional_text(request.speaker.as_deref()),
        sermon_date: required_date("sermon_date", request.sermon_date.as_deref())?,
        series: optional_text(request.series.as_deref()),
        description: optional_text(request.description.as_deref()),
        video_url: optional_text(request.video_url.as_deref()),
        audio_url: optional_text(request.audio_url.as_deref()),
        thumbnail_url: optional_text(request.thumbnail_url.as_deref()),
        language: language_or_default(request.language.as_deref())?,
    })
}

/// Lists sermons, newest first.
///
/// When the database call fails the bundled sermons are returned with
/// [`DataSource::Static`].
///
/// # Errors
///
/// Returns a validation error for an unknown language.
pub fn list_sermons(
    persistence: &mut Persistence,
    query: &LanguageQuery,
) -> Result<ContentList<SermonData>, ApiError> {
    let language: Option<String> = language_filter(query.language.as_deref())?;

    match persistence.list_sermons(language.as_deref()) {
        Ok(items) => Ok(ContentList {
            items,
            source: DataSource::Database,
        }),
        Err(e) => {
            warn!(error = %e, "Sermon query failed, serving bundled sermons");
            Ok(ContentList {
                items: fallback_sermons(language.as_deref()),
                source: DataSource::Static,
            })
        }
    }
}

/// Retrieves one sermon.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_sermon(persistence: &mut Persistence, sermon_id: &str) -> Result<SermonData, ApiError> {
    persistence
        .get_sermon(sermon_id)
        .map_err(|e| translate_persistence_error(e, "Sermon"))?
        .ok_or_else(|| ApiError::not_found("Sermon", sermon_id))
}

/// Creates a sermon.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins and a validation error for
/// bad fields.
pub fn create_sermon(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &SermonRequest,
) -> Result<SermonData, ApiError> {
    AuthorizationService::require_admin(actor, "create_sermon")?;
    let fields: SermonFields = build_fields(request)?;

    let sermon: SermonData = persistence
        .create_sermon(&fields)
        .map_err(|e| translate_persistence_error(e, "Sermon"))?;

    info!(sermon_id = %sermon.sermon_id, created_by = %actor.account_id, "Sermon created");
    Ok(sermon)
}

/// Replaces a sermon.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown sermon and
/// `ApiError::Conflict` on a stale `expected_version`.
pub fn update_sermon(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sermon_id: &str,
    request: &SermonRequest,
) -> Result<SermonData, ApiError> {
    AuthorizationService::require_admin(actor, "update_sermon")?;
    let fields: SermonFields = build_fields(request)?;

    persistence
        .update_sermon(sermon_id, &fields, request.expected_version)
        .map_err(|e| translate_persistence_error(e, "Sermon"))
}

/// Deletes a sermon.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown sermon.
pub fn delete_sermon(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sermon_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::require_admin(actor, "delete_sermon")?;

    persistence
        .delete_sermon(sermon_id)
        .map_err(|e| translate_persistence_error(e, "Sermon"))
}
