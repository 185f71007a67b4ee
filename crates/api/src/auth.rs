// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use std::str::FromStr;
use tracing::{debug, info, warn};
use vine_domain::{Permissions, Role, role_to_permissions};
use vine_persistence::{
    AccountData, Persistence, SessionData, now_timestamp, timestamp_in_hours, verify_password,
};

use crate::error::{ApiError, translate_persistence_error};

/// Account id recorded for actions taken with the service-role key.
pub const SERVICE_ACCOUNT_ID: &str = "service";

/// An authenticated caller.
///
/// The role is read from the account row in the same lookup that validates
/// the session token, so it is current for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account id, or [`SERVICE_ACCOUNT_ID`].
    pub account_id: String,
    /// The account email.
    pub email: String,
    /// The stored role string.
    pub role: String,
    /// The account display name.
    pub display_name: Option<String>,
    /// True when authenticated with the service-role key.
    pub is_service: bool,
}

impl AuthenticatedActor {
    /// Builds an actor from an account row.
    #[must_use]
    pub fn from_account(account: &AccountData) -> Self {
        Self {
            account_id: account.account_id.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
            display_name: account.display_name.clone(),
            is_service: false,
        }
    }

    /// The synthetic admin actor behind the service-role key.
    #[must_use]
    pub fn service() -> Self {
        Self {
            account_id: String::from(SERVICE_ACCOUNT_ID),
            email: String::new(),
            role: String::from(Role::Admin.as_str()),
            display_name: Some(String::from("Service")),
            is_service: true,
        }
    }

    /// The parsed role, or `None` for an unknown role string.
    #[must_use]
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_str(&self.role).ok()
    }

    /// The capability record for this actor.
    #[must_use]
    pub fn permissions(&self) -> Permissions {
        if self.is_service {
            Permissions::ALL
        } else {
            role_to_permissions(&self.role)
        }
    }

    /// Returns true for admins and the service actor.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_service || self.parsed_role() == Some(Role::Admin)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Every mutating handler calls one of these before touching persistence.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only admins may perform the action.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for any other role.
    pub fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "admin role"))
        }
    }

    /// Teachers, leaders and admins may run the kids check-in workflow.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for any other role.
    pub fn require_kids_staff(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
        if actor.is_service || actor.parsed_role().is_some_and(|r| r.is_kids_staff()) {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "teacher, leader or admin role"))
        }
    }

    /// Admins and trainees may edit the service schedule.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for any other role.
    pub fn require_schedule_editor(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), ApiError> {
        if actor.is_service || actor.parsed_role().is_some_and(|r| r.can_edit_schedule()) {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "admin or trainee role"))
        }
    }

    /// Requires the `can_manage_visitors` capability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` without the capability.
    pub fn require_visitor_manager(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), ApiError> {
        if actor.permissions().can_manage_visitors {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "visitor management capability"))
        }
    }

    /// Requires the `can_manage_members` capability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` without the capability.
    pub fn require_member_manager(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), ApiError> {
        if actor.permissions().can_manage_members {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "member management capability"))
        }
    }

    /// Requires the `can_access_profile` capability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` without the capability.
    pub fn require_profile_access(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), ApiError> {
        if actor.permissions().can_access_profile {
            Ok(())
        } else {
            Err(ApiError::forbidden(action, "profile access capability"))
        }
    }
}

/// A freshly created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInSession {
    /// The bearer token.
    pub session_token: String,
    /// When the token stops being accepted.
    pub expires_at: String,
    /// The signed-in account.
    pub actor: AuthenticatedActor,
}

/// Authentication service for bearer session tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationService {
    session_ttl_hours: i64,
    service_role_key: Option<String>,
}

impl Default for AuthenticationService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SESSION_TTL_HOURS, None)
    }
}

impl AuthenticationService {
    /// Default session lifetime (7 days).
    pub const DEFAULT_SESSION_TTL_HOURS: i64 = 168;

    /// Creates the service.
    ///
    /// A blank service-role key counts as not configured.
    #[must_use]
    pub fn new(session_ttl_hours: i64, service_role_key: Option<String>) -> Self {
        Self {
            session_ttl_hours: session_ttl_hours.max(1),
            service_role_key: service_role_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Verifies email and password and creates a session.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials and
    /// `ApiError::ServerError` if the database fails.
    pub fn sign_in(
        &self,
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<SignedInSession, ApiError> {
        let account: Option<AccountData> = persistence
            .get_account_by_email(email)
            .map_err(|e| translate_persistence_error(e, "Account"))?;

        let Some(account) = account else {
            debug!(email, "Sign-in for unknown email");
            return Err(Self::invalid_credentials());
        };

        let valid: bool = verify_password(password, &account.password_hash)
            .map_err(|e| translate_persistence_error(e, "Account"))?;
        if !valid {
            warn!(account_id = %account.account_id, "Sign-in with wrong password");
            return Err(Self::invalid_credentials());
        }

        self.start_session(persistence, &account)
    }

    /// Creates a session for an account that has already been verified.
    ///
    /// Sessions of any account that have expired are pruned first, so
    /// abandoned tokens do not pile up.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ServerError` if the database fails.
    pub fn start_session(
        &self,
        persistence: &mut Persistence,
        account: &AccountData,
    ) -> Result<SignedInSession, ApiError> {
        let now: String =
            now_timestamp().map_err(|e| translate_persistence_error(e, "Session"))?;
        persistence
            .delete_expired_sessions(&now)
            .map_err(|e| translate_persistence_error(e, "Session"))?;

        let session_token: String = Self::generate_session_token();
        let expires_at: String = timestamp_in_hours(self.session_ttl_hours)
            .map_err(|e| translate_persistence_error(e, "Session"))?;

        persistence
            .create_session(&session_token, &account.account_id, &expires_at)
            .map_err(|e| translate_persistence_error(e, "Session"))?;
        persistence
            .update_last_sign_in(&account.account_id)
            .map_err(|e| translate_persistence_error(e, "Account"))?;

        info!(account_id = %account.account_id, role = %account.role, "Session started");

        Ok(SignedInSession {
            session_token,
            expires_at,
            actor: AuthenticatedActor::from_account(account),
        })
    }

    /// Resolves a bearer token to an actor.
    ///
    /// The service-role key is accepted as a token and yields
    /// [`AuthenticatedActor::service`]. Expired sessions are deleted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for unknown or expired tokens.
    pub fn validate_token(
        &self,
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<AuthenticatedActor, ApiError> {
        if self.is_service_key(token) {
            return Ok(AuthenticatedActor::service());
        }

        let found: Option<(SessionData, AccountData)> = persistence
            .get_session_with_account(token)
            .map_err(|e| translate_persistence_error(e, "Session"))?;

        let Some((session, account)) = found else {
            return Err(ApiError::Unauthorized {
                reason: String::from("Invalid session token"),
            });
        };

        let now: String =
            now_timestamp().map_err(|e| translate_persistence_error(e, "Session"))?;
        if session.expires_at <= now {
            persistence
                .delete_session(token)
                .map_err(|e| translate_persistence_error(e, "Session"))?;
            debug!(session_id = session.session_id, "Expired session removed");
            return Err(ApiError::Unauthorized {
                reason: String::from("Session expired"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| translate_persistence_error(e, "Session"))?;

        Ok(AuthenticatedActor::from_account(&account))
    }

    /// Deletes the session behind a token. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ServerError` if the database fails.
    pub fn sign_out(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
        persistence
            .delete_session(token)
            .map_err(|e| translate_persistence_error(e, "Session"))
    }

    /// Returns true if `token` is the configured service-role key.
    #[must_use]
    pub fn is_service_key(&self, token: &str) -> bool {
        self.service_role_key
            .as_deref()
            .is_some_and(|key| key == token)
    }

    /// Generates an unguessable session token (256 random bits, hex).
    fn generate_session_token() -> String {
        format!(
            "{:032x}{:032x}",
            rand::random::<u128>(),
            rand::random::<u128>()
        )
    }

    fn invalid_credentials() -> ApiError {
        ApiError::Unauthorized {
            reason: String::from("Invalid email or password"),
        }
    }
}
