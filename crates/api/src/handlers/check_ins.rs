// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kids check-in and check-out handlers.
//!
//! Every call requires a teacher, leader or admin. The staff member's name
//! is resolved on each call and stored on the row, so the record stays
//! readable if the account is later renamed.

use std::str::FromStr;
use time::Date;
use tracing::info;
use vine_domain::{CheckInStatus, ChildRef, parse_optional_date, resolve_display_name};
use vine_persistence::{CheckInFilter, CheckInRecord, CheckOut, NewCheckIn, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{optional_text, required_text};
use crate::request_response::{CheckOutRequest, CreateCheckInRequest, ListCheckInsQuery};

/// Resolves the name recorded for a staff member.
///
/// Profile full name, then account display name, then email, then the
/// generic staff label.
///
/// # Errors
///
/// Returns an error if the profile lookup fails.
pub fn resolve_staff_name(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<String, ApiError> {
    let profile_name: Option<String> = if actor.is_service {
        None
    } else {
        persistence
            .get_member_profile_by_account(&actor.account_id)
            .map_err(|e| translate_persistence_error(e, "Member profile"))?
            .map(|profile| profile.full_name())
    };

    Ok(resolve_display_name(
        profile_name.as_deref(),
        actor.display_name.as_deref(),
        Some(&actor.email),
    ))
}

/// Checks a child in.
///
/// Exactly one of `member_child_id` and `visitor_child_id` must be given.
///
/// # Errors
///
/// Returns a validation error for zero or two child references,
/// `ApiError::NotFound` if the child does not exist and
/// `ApiError::Forbidden` for non-staff callers.
pub fn create_check_in(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateCheckInRequest,
) -> Result<CheckInRecord, ApiError> {
    AuthorizationService::require_kids_staff(actor, "create_check_in")?;

    let child: ChildRef = ChildRef::from_ids(
        request.member_child_id.as_deref(),
        request.visitor_child_id.as_deref(),
    )?;
    let staff_name: String = resolve_staff_name(persistence, actor)?;

    let record: CheckInRecord = persistence
        .create_check_in(&NewCheckIn {
            child,
            checked_in_by: actor.account_id.clone(),
            checked_in_by_name: staff_name,
            checkin_notes: optional_text(request.checkin_notes.as_deref()),
        })
        .map_err(|e| translate_persistence_error(e, "Child"))?;

    info!(
        check_in_id = %record.check_in.check_in_id,
        child_type = %record.child_type,
        "Check-in recorded"
    );
    Ok(record)
}

/// Checks a child out.
///
/// # Errors
///
/// Returns `ApiError::NotFound` for an unknown row and `ApiError::Conflict`
/// if the row was already checked out or the version is stale.
pub fn check_out(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CheckOutRequest,
) -> Result<CheckInRecord, ApiError> {
    AuthorizationService::require_kids_staff(actor, "check_out")?;

    let check_in_id: String = required_text("id", request.id.as_deref())?;
    let staff_name: String = resolve_staff_name(persistence, actor)?;

    let record: CheckInRecord = persistence
        .check_out(&CheckOut {
            check_in_id,
            checked_out_by: actor.account_id.clone(),
            checked_out_by_name: staff_name,
            checkout_notes: optional_text(request.checkout_notes.as_deref()),
            expected_version: request.expected_version,
        })
        .map_err(|e| translate_persistence_error(e, "Check-in"))?;

    info!(check_in_id = %record.check_in.check_in_id, "Check-out recorded");
    Ok(record)
}

/// Retrieves one check-in with its child details.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the row does not exist.
pub fn get_check_in(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    check_in_id: &str,
) -> Result<CheckInRecord, ApiError> {
    AuthorizationService::require_kids_staff(actor, "get_check_in")?;

    persistence
        .get_check_in(check_in_id)
        .map_err(|e| translate_persistence_error(e, "Check-in"))?
        .ok_or_else(|| ApiError::not_found("Check-in", check_in_id))
}

/// Lists check-ins, newest first.
///
/// # Errors
///
/// Returns a validation error for an unknown status, a malformed date or a
/// `from_date` after `to_date`.
pub fn list_check_ins(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListCheckInsQuery,
) -> Result<Vec<CheckInRecord>, ApiError> {
    AuthorizationService::require_kids_staff(actor, "list_check_ins")?;

    let status: Option<String> = optional_text(query.status.as_deref())
        .map(|s| CheckInStatus::from_str(&s).map(|st| st.as_str().to_string()))
        .transpose()?;
    let from_date: Option<Date> = parse_optional_date(query.from_date.as_deref())
        .map_err(|e| ApiError::validation("from_date", e.to_string()))?;
    let to_date: Option<Date> = parse_optional_date(query.to_date.as_deref())
        .map_err(|e| ApiError::validation("to_date", e.to_string()))?;

    if let (Some(from), Some(to)) = (from_date, to_date)
        && from > to
    {
        return Err(ApiError::validation(
            "from_date",
            format!("from_date {from} is after to_date {to}"),
        ));
    }

    persistence
        .list_check_ins(&CheckInFilter {
            status,
            from_date,
            to_date,
        })
        .map_err(|e| translate_persistence_error(e, "Check-in"))
}
