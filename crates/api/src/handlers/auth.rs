// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account creation, sign-in and session handlers.

use tracing::info;
use vine_domain::{Role, validate_email};
use vine_persistence::{AccountData, Persistence};

use crate::auth::{AuthenticatedActor, AuthenticationService, SignedInSession};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{optional_text, required_text};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AccountInfo, BootstrapStatusResponse, SessionInfoResponse, SignInRequest, SignInResponse,
    SignUpRequest,
};

fn count_accounts(persistence: &mut Persistence) -> Result<i64, ApiError> {
    persistence
        .count_accounts()
        .map_err(|e| translate_persistence_error(e, "Account"))
}

fn sign_in_response(session: SignedInSession, account: &AccountData) -> SignInResponse {
    SignInResponse {
        permissions: session.actor.permissions(),
        session_token: session.session_token,
        expires_at: session.expires_at,
        account: AccountInfo::from(account),
    }
}

/// Validates the request, creates an account with `role` and signs it in.
fn create_account_and_sign_in(
    persistence: &mut Persistence,
    auth: &AuthenticationService,
    request: &SignUpRequest,
    role: Role,
) -> Result<SignInResponse, ApiError> {
    let email: String = required_text("email", request.email.as_deref())?;
    validate_email(&email)?;
    let password: String = required_text("password", request.password.as_deref())?;

    PasswordPolicy::default().validate(
        &password,
        request.password_confirmation.as_deref(),
        &email,
    )?;

    let display_name: Option<String> = optional_text(request.display_name.as_deref());
    let account: AccountData = persistence
        .create_account(&email, &password, display_name.as_deref(), role.as_str())
        .map_err(|e| translate_persistence_error(e, "Account"))?;

    info!(account_id = %account.account_id, role = %account.role, "Account created");

    let session: SignedInSession = auth.start_session(persistence, &account)?;
    Ok(sign_in_response(session, &account))
}

/// Reports whether the first admin still has to be created.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn bootstrap_status(
    persistence: &mut Persistence,
) -> Result<BootstrapStatusResponse, ApiError> {
    Ok(BootstrapStatusResponse {
        is_bootstrap_mode: count_accounts(persistence)? == 0,
    })
}

/// Creates the first admin account.
///
/// Only succeeds while no account exists.
///
/// # Errors
///
/// Returns `ApiError::Forbidden` once any account exists, and a validation
/// error if the email or password is rejected.
pub fn bootstrap_admin(
    persistence: &mut Persistence,
    auth: &AuthenticationService,
    request: &SignUpRequest,
) -> Result<SignInResponse, ApiError> {
    if count_accounts(persistence)? > 0 {
        return Err(ApiError::forbidden(
            "bootstrap_admin",
            "bootstrap mode (no accounts exist)",
        ));
    }

    create_account_and_sign_in(persistence, auth, request, Role::Admin)
}

/// Creates a member account and signs it in.
///
/// # Errors
///
/// Returns a validation error for a bad email or password and
/// `ApiError::Conflict` if the email is taken.
pub fn sign_up(
    persistence: &mut Persistence,
    auth: &AuthenticationService,
    request: &SignUpRequest,
) -> Result<SignInResponse, ApiError> {
    create_account_and_sign_in(persistence, auth, request, Role::Member)
}

/// Signs in with email and password.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for bad credentials.
pub fn sign_in(
    persistence: &mut Persistence,
    auth: &AuthenticationService,
    request: &SignInRequest,
) -> Result<SignInResponse, ApiError> {
    let email: String = required_text("email", request.email.as_deref())?;
    let password: String = required_text("password", request.password.as_deref())?;

    let session: SignedInSession = auth.sign_in(persistence, &email, &password)?;
    let account: AccountData = persistence
        .get_account_by_id(&session.actor.account_id)
        .map_err(|e| translate_persistence_error(e, "Account"))?
        .ok_or_else(|| ApiError::not_found("Account", &session.actor.account_id))?;

    Ok(sign_in_response(session, &account))
}

/// Ends the session behind `session_token`.
///
/// # Errors
///
/// Returns an error if the database fails.
pub fn sign_out(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::sign_out(persistence, session_token)
}

/// Describes the caller's account and capabilities.
#[must_use]
pub fn session_info(actor: &AuthenticatedActor) -> SessionInfoResponse {
    SessionInfoResponse {
        account: AccountInfo {
            account_id: actor.account_id.clone(),
            email: actor.email.clone(),
            role: actor.role.clone(),
            display_name: actor.display_name.clone(),
        },
        permissions: actor.permissions(),
        is_service: actor.is_service,
    }
}
