// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Volunteer sign-up and reporting.

use tracing::info;
use vine_persistence::{Page, Persistence, VolunteerData, VolunteerFields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    clean_list, optional_email, optional_phone, optional_text, page_request, required_text,
};
use crate::request_response::{PageQuery, VolunteerRequest};

fn build_fields(request: &VolunteerRequest) -> Result<VolunteerFields, ApiError> {
    Ok(VolunteerFields {
        full_name: required_text("full_name", request.full_name.as_deref())?,
        email: optional_email("email", request.email.as_deref())?,
        phone: optional_phone("phone", request.phone.as_deref())?,
        areas: clean_list(request.areas.as_deref()),
        availability: optional_text(request.availability.as_deref()),
        message: optional_text(request.message.as_deref()),
        contacted: request.contacted.unwrap_or(false),
    })
}

/// Stores a submission of the public volunteer form.
///
/// # Errors
///
/// Returns a validation error for bad fields or when no area is chosen.
pub fn register_volunteer(
    persistence: &mut Persistence,
    request: &VolunteerRequest,
) -> Result<VolunteerData, ApiError> {
    let mut fields: VolunteerFields = build_fields(request)?;
    if fields.areas.is_empty() {
        return Err(ApiError::validation("areas", "Choose at least one area"));
    }
    fields.contacted = false;

    let volunteer: VolunteerData = persistence
        .create_volunteer(&fields)
        .map_err(|e| translate_persistence_error(e, "Volunteer"))?;

    info!(volunteer_id = %volunteer.volunteer_id, areas = ?volunteer.areas, "Volunteer signed up");
    Ok(volunteer)
}

/// Lists volunteers, newest first.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` without the visitor management capability.
pub fn list_volunteers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &PageQuery,
) -> Result<Page<VolunteerData>, ApiError> {
    AuthorizationService::require_visitor_manager(actor, "list_volunteers")?;

    persistence
        .list_volunteers(&page_request(query))
        .map_err(|e| translate_persistence_error(e, "Volunteer"))
}

/// Retrieves one volunteer.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_volunteer(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    volunteer_id: &str,
) -> Result<VolunteerData, ApiError> {
    AuthorizationService::require_visitor_manager(actor, "get_volunteer")?;

    persistence
        .get_volunteer(volunteer_id)
        .map_err(|e| translate_persistence_error(e, "Volunteer"))?
        .ok_or_else(|| ApiError::not_found("Volunteer", volunteer_id))
}

/// Replaces a volunteer record, typically to mark them contacted.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins and `ApiError::NotFound`
/// for an unknown volunteer.
pub fn update_volunteer(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    volunteer_id: &str,
    request: &VolunteerRequest,
) -> Result<VolunteerData, ApiError> {
    AuthorizationService::require_admin(actor, "update_volunteer")?;
    let fields: VolunteerFields = build_fields(request)?;

    persistence
        .update_volunteer(volunteer_id, &fields)
        .map_err(|e| translate_persistence_error(e, "Volunteer"))
}

/// Deletes a volunteer record.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown volunteer.
pub fn delete_volunteer(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    volunteer_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::require_admin(actor, "delete_volunteer")?;

    persistence
        .delete_volunteer(volunteer_id)
        .map_err(|e| translate_persistence_error(e, "Volunteer"))
}
