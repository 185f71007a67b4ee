// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visitor and volunteer forms.
//!
//! Submitting is public; everything else needs a session.

use axum::{
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use vine_api::handlers::visitors::{
    delete_visitor, get_visitor, list_visitors, register_visitor, update_visitor,
};
use vine_api::handlers::volunteers::{
    delete_volunteer, get_volunteer, list_volunteers, register_volunteer, update_volunteer,
};
use vine_api::{PageQuery, VisitorRequest, VolunteerRequest};
use vine_persistence::{Page, VisitorData, VolunteerData};

use super::{deleted, respond_page};
use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::session::{JsonBody, PublicFormKey, QueryParams, SessionActor};

/// Handler for POST `/api/visitors`.
pub async fn handle_register_visitor(
    AxumState(app_state): AxumState<AppState>,
    _key: PublicFormKey,
    JsonBody(req): JsonBody<VisitorRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let visitor: VisitorData = register_visitor(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, visitor))
}

/// Handler for GET `/api/visitors`.
pub async fn handle_list_visitors(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<PageQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let page: Page<VisitorData> = list_visitors(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond_page(page))
}

/// Handler for GET `/api/visitors/{id}`.
pub async fn handle_get_visitor(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let visitor: VisitorData = get_visitor(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, visitor))
}

/// Handler for PUT `/api/visitors/{id}`.
pub async fn handle_update_visitor(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<VisitorRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let visitor: VisitorData = update_visitor(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, visitor))
}

/// Handler for DELETE `/api/visitors/{id}`.
pub async fn handle_delete_visitor(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    delete_visitor(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(deleted(id))
}

/// Handler for POST `/api/volunteers`.
pub async fn handle_register_volunteer(
    AxumState(app_state): AxumState<AppState>,
    _key: PublicFormKey,
    JsonBody(req): JsonBody<VolunteerRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let volunteer: VolunteerData = register_volunteer(&mut persistence, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, volunteer))
}

/// Handler for GET `/api/volunteers`.
pub async fn handle_list_volunteers(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<PageQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let page: Page<VolunteerData> = list_volunteers(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond_page(page))
}

/// Handler for GET `/api/volunteers/{id}`.
pub async fn handle_get_volunteer(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let volunteer: VolunteerData = get_volunteer(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, volunteer))
}

/// Handler for PUT `/api/volunteers/{id}`.
pub async fn handle_update_volunteer(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<VolunteerRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let volunteer: VolunteerData = update_volunteer(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, volunteer))
}

/// Handler for DELETE `/api/volunteers/{id}`.
pub async fn handle_delete_volunteer(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    delete_volunteer(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(deleted(id))
}
