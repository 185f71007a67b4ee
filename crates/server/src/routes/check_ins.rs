// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::info;
use vine_api::handlers::check_ins::{check_out, create_check_in, get_check_in, list_check_ins};
use vine_api::{CheckOutRequest, CreateCheckInRequest, ListCheckInsQuery};
use vine_persistence::CheckInRecord;

use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::live::LiveEvent;
use crate::session::{JsonBody, QueryParams, SessionActor};

/// Handler for GET `/api/check-ins`.
pub async fn handle_list_check_ins(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<ListCheckInsQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let records: Vec<CheckInRecord> = list_check_ins(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, records))
}

/// Handler for GET `/api/check-ins/{id}`.
pub async fn handle_get_check_in(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let record: CheckInRecord = get_check_in(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, record))
}

/// Handler for POST `/api/check-ins`.
pub async fn handle_create_check_in(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<CreateCheckInRequest>,
) -> HttpResult {
    info!(
        account_id = %actor.account_id,
        member_child_id = ?req.member_child_id,
        visitor_child_id = ?req.visitor_child_id,
        "Handling create_check_in request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let record: CheckInRecord = create_check_in(&mut persistence, &actor, &req)?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(&LiveEvent::checked_in(&record));

    Ok(respond(StatusCode::CREATED, record))
}

/// Handler for PUT `/api/check-ins`.
///
/// Checks a child out. The row id travels in the body.
pub async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<CheckOutRequest>,
) -> HttpResult {
    info!(
        account_id = %actor.account_id,
        check_in_id = ?req.id,
        "Handling check_out request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let record: CheckInRecord = check_out(&mut persistence, &actor, &req)?;
    drop(persistence);

    app_state
        .live_events
        .broadcast(&LiveEvent::checked_out(&record));

    Ok(respond(StatusCode::OK, record))
}
