// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use vine_domain::DomainError;
use vine_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// public contract. Each variant has a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No valid credentials were presented.
    #[error("Authentication required: {reason}")]
    Unauthorized {
        /// Why the credentials were rejected.
        reason: String,
    },
    /// The caller is authenticated but lacks the role for the action.
    #[error("Forbidden: '{action}' requires {required}")]
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role or capability required.
        required: String,
    },
    /// A requested resource does not exist.
    #[error("{resource} not found: {message}")]
    NotFound {
        /// The kind of resource.
        resource: String,
        /// What was not found.
        message: String,
    },
    /// The request failed validation.
    #[error("Validation failed: {message}")]
    Validation {
        /// The offending request field, when known.
        field: Option<String>,
        /// A human-readable description.
        message: String,
    },
    /// The change collides with the current state of the row.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// An upload exceeded the size limit.
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// A human-readable description.
        message: String,
    },
    /// The backend failed.
    #[error("Server error: {message}")]
    ServerError {
        /// The database error kind, when the failure came from the database.
        code: Option<String>,
        /// A human-readable description.
        message: String,
    },
}

impl ApiError {
    /// The stable error code used in response envelopes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::ServerError { .. } => "server_error",
        }
    }

    /// The request field an error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Builds a validation error for a named field.
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    /// Builds a not-found error.
    #[must_use]
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            message: format!("{resource} '{id}' does not exist"),
        }
    }

    /// Builds a forbidden error.
    #[must_use]
    pub fn forbidden(action: &str, required: &str) -> Self {
        Self::Forbidden {
            action: action.to_string(),
            required: required.to_string(),
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        let field: &str = match err {
            PasswordPolicyError::ConfirmationMismatch => "password_confirmation",
            _ => "password",
        };
        Self::validation(field, err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// Every domain rule violation is a client mistake, so most map to
/// `validation_error`. Oversized uploads map to `payload_too_large`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UploadTooLarge { .. } => ApiError::PayloadTooLarge {
            message: err.to_string(),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        _ => ApiError::Validation {
            field: err.field().map(ToString::to_string),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `resource` names the kind of row the failing call was about and is used
/// for not-found messages.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound {
            resource: resource.to_string(),
            message,
        },
        PersistenceError::UniqueViolation(message) | PersistenceError::Conflict(message) => {
            ApiError::Conflict { message }
        }
        PersistenceError::VersionConflict { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::CheckViolation(message)
        | PersistenceError::ForeignKeyViolation(message) => ApiError::Validation {
            field: None,
            message,
        },
        PersistenceError::DatabaseError { code, message } => ApiError::ServerError {
            code: Some(code),
            message,
        },
        PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::SerializationError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled
        | PersistenceError::Other(_) => ApiError::ServerError {
            code: None,
            message: err.to_string(),
        },
    }
}
