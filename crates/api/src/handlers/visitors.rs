// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor registration and reporting.

use tracing::info;
use vine_persistence::{Page, Persistence, VisitorData, VisitorFields};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    optional_date, optional_email, optional_phone, optional_text, page_request, required_text,
};
use crate::request_response::{PageQuery, VisitorRequest};

fn build_fields(request: &VisitorRequest) -> Result<VisitorFields, ApiError> {
    Ok(VisitorFields {
        full_name: required_text("full_name", request.full_name.as_deref())?,
        email: optional_email("email", request.email.as_deref())?,
        phone: optional_phone("phone", request.phone.as_deref())?,
        visit_date: optional_date("visit_date", request.visit_date.as_deref())?,
        how_heard: optional_text(request.how_heard.as_deref()),
        prayer_request: optional_text(request.prayer_request.as_deref()),
        wants_contact: request.wants_contact.unwrap_or(false),
        followed_up: request.followed_up.unwrap_or(false),
    })
}

/// Stores a submission of the public visitor form.
///
/// `followed_up` is always false for new registrations.
///
/// # Errors
///
/// Returns a validation error for bad fields.
pub fn register_visitor(
    persistence: &mut Persistence,
    request: &VisitorRequest,
) -> Result<VisitorData, ApiError> {
    let mut fields: VisitorFields = build_fields(request)?;
    fields.followed_up = false;

    let visitor: VisitorData = persistence
        .create_visitor(&fields)
        .map_err(|e| translate_persistence_error(e, "Visitor"))?;

    info!(visitor_id = %visitor.visitor_id, "Visitor registered");
    Ok(visitor)
}

/// Lists visitors, newest first.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` without the visitor management capability.
pub fn list_visitors(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &PageQuery,
) -> Result<Page<VisitorData>, ApiError> {
    AuthorizationService::require_visitor_manager(actor, "list_visitors")?;

    persistence
        .list_visitors(&page_request(query))
        .map_err(|e| translate_persistence_error(e, "Visitor"))
}

/// Retrieves one visitor.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if it does not exist.
pub fn get_visitor(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    visitor_id: &str,
) -> Result<VisitorData, ApiError> {
    AuthorizationService::require_visitor_manager(actor, "get_visitor")?;

    persistence
        .get_visitor(visitor_id)
        .map_err(|e| translate_persistence_error(e, "Visitor"))?
        .ok_or_else(|| ApiError::not_found("Visitor", visitor_id))
}

/// Replaces a visitor record, typically to mark follow-up.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins and `ApiError::NotFound`
/// for an unknown visitor.
pub fn update_visitor(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    visitor_id: &str,
    request: &VisitorRequest,
) -> Result<VisitorData, ApiError> {
    AuthorizationService::require_admin(actor, "update_visitor")?;
    let fields: VisitorFields = build_fields(request)?;

    persistence
        .update_visitor(visitor_id, &fields)
        .map_err(|e| translate_persistence_error(e, "Visitor"))
}

/// Deletes a visitor record.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown visitor.
pub fn delete_visitor(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    visitor_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::require_admin(actor, "delete_visitor")?;

    persistence
        .delete_visitor(visitor_id)
        .map_err(|e| translate_persistence_error(e, "Visitor"))
}
