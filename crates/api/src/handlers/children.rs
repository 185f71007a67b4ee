// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member children handlers.
//!
//! Parents manage their own children. Admins manage any child. Kids staff
//! may read every child for the check-in screen.

use tracing::info;
use vine_domain::validate_date_of_birth;
use vine_persistence::{MemberChildData, MemberChildFields, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{optional_text, required_text, today};
use crate::request_response::{ListChildrenQuery, MemberChildRequest};

/// The caller's profile id, if they have a profile.
fn caller_profile_id(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Option<String>, ApiError> {
    if actor.is_service {
        return Ok(None);
    }
    Ok(persistence
        .get_member_profile_by_account(&actor.account_id)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?
        .map(|profile| profile.profile_id))
}

fn load_child(persistence: &mut Persistence, child_id: &str) -> Result<MemberChildData, ApiError> {
    persistence
        .get_member_child(child_id)
        .map_err(|e| translate_persistence_error(e, "Child"))?
        .ok_or_else(|| ApiError::not_found("Child", child_id))
}

/// Admins, or a parent of the child.
fn require_parent_or_admin(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    child: &MemberChildData,
    action: &str,
) -> Result<(), ApiError> {
    if actor.is_admin() {
        return Ok(());
    }
    let profile_id: Option<String> = caller_profile_id(persistence, actor)?;
    if profile_id.is_some_and(|id| child.has_parent(&id)) {
        Ok(())
    } else {
        Err(ApiError::forbidden(action, "parent of the child or admin role"))
    }
}

fn build_fields(
    request: &MemberChildRequest,
    parent1_id: Option<String>,
    parent2_id: Option<String>,
) -> Result<MemberChildFields, ApiError> {
    let name: String = required_text("name", request.name.as_deref())?;
    let date_of_birth: Option<String> = match request.date_of_birth.as_deref() {
        Some(value) => validate_date_of_birth(value, today())?.map(|_| value.trim().to_string()),
        None => None,
    };

    if parent1_id.is_some() && parent1_id == parent2_id {
        return Err(ApiError::validation(
            "parent2_id",
            "parent2_id must differ from parent1_id",
        ));
    }

    Ok(MemberChildFields {
        name,
        date_of_birth,
        parent1_id,
        parent2_id,
        allergies: optional_text(request.allergies.as_deref()),
        special_needs: optional_text(request.special_needs.as_deref()),
        photo_permission: request.photo_permission.unwrap_or(false),
    })
}

/// Lists children.
///
/// By default the caller's own children. With `all=true`, kids staff get
/// every child, optionally filtered by `search`.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` when non-staff ask for all children.
pub fn list_children(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListChildrenQuery,
) -> Result<Vec<MemberChildData>, ApiError> {
    if query.all.unwrap_or(false) {
        AuthorizationService::require_kids_staff(actor, "list_all_children")?;
        let search: Option<String> = optional_text(query.search.as_deref());
        return persistence
            .list_all_children(search.as_deref())
            .map_err(|e| translate_persistence_error(e, "Child"));
    }

    AuthorizationService::require_profile_access(actor, "list_children")?;
    match caller_profile_id(persistence, actor)? {
        Some(profile_id) => persistence
            .list_children_for_parent(&profile_id)
            .map_err(|e| translate_persistence_error(e, "Child")),
        None => Ok(Vec::new()),
    }
}

/// Retrieves one child.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown child and
/// `ApiError::Forbidden` unless the caller is staff or a parent.
pub fn get_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    child_id: &str,
) -> Result<MemberChildData, ApiError> {
    let child: MemberChildData = load_child(persistence, child_id)?;
    if !actor.permissions().can_access_kids_checkin {
        require_parent_or_admin(persistence, actor, &child, "get_child")?;
    }
    Ok(child)
}

/// Registers a child.
///
/// A member registers their own child: `parent1_id` defaults to the
/// caller's profile and the caller must be one of the parents. Admins may
/// name any parents.
///
/// # Errors
///
/// Returns a validation error for bad fields or unknown parent profiles.
pub fn create_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &MemberChildRequest,
) -> Result<MemberChildData, ApiError> {
    AuthorizationService::require_profile_access(actor, "create_child")?;

    let mut parent1_id: Option<String> = optional_text(request.parent1_id.as_deref());
    let parent2_id: Option<String> = optional_text(request.parent2_id.as_deref());

    if !actor.is_admin() {
        let own: String = caller_profile_id(persistence, actor)?.ok_or_else(|| {
            ApiError::validation("parent1_id", "Create your member profile before adding children")
        })?;
        if parent1_id.is_none() {
            parent1_id = Some(own.clone());
        }
        if parent1_id.as_deref() != Some(own.as_str()) && parent2_id.as_deref() != Some(own.as_str())
        {
            return Err(ApiError::forbidden("create_child", "parent of the child or admin role"));
        }
    }

    let fields: MemberChildFields = build_fields(request, parent1_id, parent2_id)?;
    let child: MemberChildData = persistence
        .create_member_child(&fields)
        .map_err(|e| translate_persistence_error(e, "Child"))?;

    info!(child_id = %child.child_id, created_by = %actor.account_id, "Child registered");
    Ok(child)
}

/// Updates a child. Omitted parent ids keep their current values.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` unless the caller is a parent or admin,
/// `ApiError::Conflict` on a stale `expected_version`.
pub fn update_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    child_id: &str,
    request: &MemberChildRequest,
) -> Result<MemberChildData, ApiError> {
    let current: MemberChildData = load_child(persistence, child_id)?;
    require_parent_or_admin(persistence, actor, &current, "update_child")?;

    let parent1_id: Option<String> =
        optional_text(request.parent1_id.as_deref()).or(current.parent1_id);
    let parent2_id: Option<String> =
        optional_text(request.parent2_id.as_deref()).or(current.parent2_id);
    let fields: MemberChildFields = build_fields(request, parent1_id, parent2_id)?;

    persistence
        .update_member_child(child_id, &fields, request.expected_version)
        .map_err(|e| translate_persistence_error(e, "Child"))
}

/// Deletes a child.
///
/// # Errors
///
/// Returns `ApiError::Conflict` if the child has check-in history.
pub fn delete_child(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    child_id: &str,
) -> Result<(), ApiError> {
    let current: MemberChildData = load_child(persistence, child_id)?;
    require_parent_or_admin(persistence, actor, &current, "delete_child")?;

    persistence
        .delete_member_child(child_id)
        .map_err(|e| translate_persistence_error(e, "Child"))?;

    info!(child_id, deleted_by = %actor.account_id, "Child deleted");
    Ok(())
}
