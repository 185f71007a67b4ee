// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Members directory and role management.

use std::str::FromStr;
use tracing::info;
use vine_domain::Role;
use vine_persistence::{AccountData, MemberSummaryData, Page, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{page_request, required_text};
use crate::request_response::{AccountInfo, PageQuery, SetRoleRequest};

/// Lists accounts with their profile summary.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` without the member management capability.
pub fn list_members(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &PageQuery,
) -> Result<Page<MemberSummaryData>, ApiError> {
    AuthorizationService::require_member_manager(actor, "list_members")?;

    persistence
        .list_members(&page_request(query))
        .map_err(|e| translate_persistence_error(e, "Account"))
}

/// Changes an account's role.
///
/// The new role takes effect on the account's next request.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` for non-admins, a validation error for an
/// unknown role and `ApiError::NotFound` for an unknown account.
pub fn set_member_role(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    account_id: &str,
    request: &SetRoleRequest,
) -> Result<AccountInfo, ApiError> {
    AuthorizationService::require_admin(actor, "set_member_role")?;

    let role: Role = Role::from_str(&required_text("role", request.role.as_deref())?)?;
    let account: AccountData = persistence
        .set_account_role(account_id, role.as_str())
        .map_err(|e| translate_persistence_error(e, "Account"))?;

    info!(
        account_id,
        role = %role,
        changed_by = %actor.account_id,
        "Account role changed"
    );
    Ok(AccountInfo::from(&account))
}
