// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor children: kids registered by staff at the check-in desk.

use tracing::info;
use vine_domain::{validate_date_of_birth, validate_phone};
use vine_persistence::{Persistence, VisitorChildData, VisitorChildFields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{optional_email, optional_phone, optional_text, required_text, today};
use crate::request_response::{SearchQuery, VisitorChildRequest};

/// Lists visitor children, optionally filtered by child or parent name.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-staff callers.
pub fn list_visitor_children(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &SearchQuery,
) -> Result<Vec<VisitorChildData>, ApiError> {
    AuthorizationService::require_kids_staff(actor, "list_visitor_children")?;
    let search: Option<String> = optional_text(query.search.as_deref());

    persistence
        .list_visitor_children(search.as_deref())
        .map_err(|e| translate_persistence_error(e, "Visitor child"))
}

/// Retrieves one visitor child.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_visitor_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    visitor_child_id: &str,
) -> Result<VisitorChildData, ApiError> {
    AuthorizationService::require_kids_staff(actor, "get_visitor_child")?;

    persistence
        .get_visitor_child(visitor_child_id)
        .map_err(|e| translate_persistence_error(e, "Visitor child"))?
        .ok_or_else(|| ApiError::not_found("Visitor child", visitor_child_id))
}

/// Registers a visitor child.
///
/// # Errors
///
/// Returns a validation error when the child name or parent contact is
/// missing or malformed.
pub fn create_visitor_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &VisitorChildRequest,
) -> Result<VisitorChildData, ApiError> {
    AuthorizationService::require_kids_staff(actor, "create_visitor_child")?;

    let name: String = required_text("name", request.name.as_deref())?;
    let parent_name: String = required_text("parent_name", request.parent_name.as_deref())?;
    let parent_phone: String = required_text("parent_phone", request.parent_phone.as_deref())?;
    validate_phone(&parent_phone)
        .map_err(|e| ApiError::validation("parent_phone", e.to_string()))?;

    let date_of_birth: Option<String> = match request.date_of_birth.as_deref() {
        Some(value) => validate_date_of_birth(value, today())?.map(|_| value.trim().to_string()),
        None => None,
    };

    let fields: VisitorChildFields = VisitorChildFields {
        name,
        date_of_birth,
        parent_name,
        parent_phone,
        parent_email: optional_email("parent_email", request.parent_email.as_deref())?,
        allergies: optional_text(request.allergies.as_deref()),
        special_needs: optional_text(request.special_needs.as_deref()),
        emergency_contact_name: optional_text(request.emergency_contact_name.as_deref()),
        emergency_contact_phone: optional_phone(
            "emergency_contact_phone",
            request.emergency_contact_phone.as_deref(),
        )?,
        photo_permission: request.photo_permission.unwrap_or(false),
    };

    let child: VisitorChildData = persistence
        .create_visitor_child(&fields, Some(&actor.account_id))
        .map_err(|e| translate_persistence_error(e, "Visitor child"))?;

    info!(
        visitor_child_id = %child.visitor_child_id,
        created_by = %actor.account_id,
        "Visitor child registered"
    );
    Ok(child)
}
