// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{extract::State as AxumState, http::StatusCode};
use tracing::info;
use vine_api::handlers::auth::{
    bootstrap_admin, bootstrap_status, session_info, sign_in, sign_out, sign_up,
};
use vine_api::{BootstrapStatusResponse, SignInRequest, SignInResponse, SignUpRequest};

use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::session::{BearerToken, JsonBody, SessionActor};

/// Handler for GET `/api/auth/bootstrap`.
pub async fn handle_bootstrap_status(AxumState(app_state): AxumState<AppState>) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let status: BootstrapStatusResponse = bootstrap_status(&mut persistence)?;
    Ok(respond(StatusCode::OK, status))
}

/// Handler for POST `/api/auth/bootstrap`.
///
/// Creates the first admin. Refused once any account exists.
pub async fn handle_bootstrap(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> HttpResult {
    info!("Handling bootstrap request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SignInResponse = bootstrap_admin(&mut persistence, &app_state.auth, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, response))
}

/// Handler for POST `/api/auth/sign-up`.
pub async fn handle_sign_up(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let response: SignInResponse = sign_up(&mut persistence, &app_state.auth, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, response))
}

/// Handler for POST `/api/auth/sign-in`.
pub async fn handle_sign_in(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let response: SignInResponse = sign_in(&mut persistence, &app_state.auth, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, response))
}

/// Handler for POST `/api/auth/sign-out`.
pub async fn handle_sign_out(
    AxumState(app_state): AxumState<AppState>,
    BearerToken(token): BearerToken,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    sign_out(&mut persistence, &token)?;
    drop(persistence);

    Ok(respond(
        StatusCode::OK,
        serde_json::json!({ "signed_out": true }),
    ))
}

/// Handler for GET `/api/auth/session`.
pub async fn handle_session(SessionActor(actor): SessionActor) -> HttpResult {
    Ok(respond(StatusCode::OK, session_info(&actor)))
}
