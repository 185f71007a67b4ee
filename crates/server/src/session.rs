// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request extractors for the server boundary.
//!
//! Bearer session validation, the anonymous form key, and JSON/query
//! extractors whose rejections use the error envelope.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use vine_api::AuthenticatedActor;

use crate::AppState;
use crate::error::HttpError;

/// Header carrying the anonymous key on public form submissions.
pub const API_KEY_HEADER: &str = "apikey";

/// Reads the token from an `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns a 401 if the header is missing or not a bearer token.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, HttpError> {
    let header: &str = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            HttpError::unauthorized("Missing Authorization header")
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            HttpError::unauthorized("Invalid Authorization header")
        })?;

    let token: &str = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("Authorization header does not carry a bearer token");
            HttpError::unauthorized("Invalid Authorization header format. Expected: 'Bearer <token>'")
        })?;

    Ok(token.to_string())
}

/// Validates a token and resolves the caller's current account and role.
///
/// # Errors
///
/// Returns a 401 for unknown, expired or signed-out tokens.
pub async fn authenticate(state: &AppState, token: &str) -> Result<AuthenticatedActor, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: AuthenticatedActor = state
        .auth
        .validate_token(&mut persistence, token)
        .map_err(|e| {
            warn!(error = %e, "Session validation failed");
            HttpError::from(e)
        })?;
    drop(persistence);

    debug!(account_id = %actor.account_id, role = %actor.role, "Session validated");
    Ok(actor)
}

/// Extractor for authenticated callers.
///
/// The account row is re-read on every request, so role changes apply to
/// the next call.
pub struct SessionActor(pub AuthenticatedActor);

impl FromRequestParts<AppState> for SessionActor {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(&parts.headers)?;
        Ok(Self(authenticate(state, &token).await?))
    }
}

/// Extractor for the raw bearer token, without validating it.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(&parts.headers)?))
    }
}

/// Guard for public form submissions.
///
/// When an anonymous key is configured the `apikey` header must match it.
pub struct PublicFormKey;

impl FromRequestParts<AppState> for PublicFormKey {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.anon_key.as_deref() else {
            return Ok(Self);
        };

        let presented: Option<&str> = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        if presented == Some(expected) {
            Ok(Self)
        } else {
            warn!("Public form submission without a valid apikey header");
            Err(HttpError::unauthorized("Missing or invalid apikey header"))
        }
    }
}

/// JSON body extractor whose rejection uses the error envelope.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string extractor whose rejection uses the error envelope.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
