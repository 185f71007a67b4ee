// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sermons and the service schedule.

use axum::{
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use vine_api::handlers::schedule_events::{
    create_schedule_event, delete_schedule_event, get_schedule_event, list_schedule_events,
    update_schedule_event,
};
use vine_api::handlers::sermons::{
    create_sermon, delete_sermon, get_sermon, list_sermons, update_sermon,
};
use vine_api::{ContentList, LanguageQuery, ScheduleEventRequest, SermonRequest};
use vine_persistence::{ScheduleEventData, SermonData};

use super::{deleted, respond_content};
use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::session::{JsonBody, QueryParams, SessionActor};

/// Handler for GET `/api/sermons`.
pub async fn handle_list_sermons(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<LanguageQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let sermons: ContentList<SermonData> = list_sermons(&mut persistence, &query)?;
    drop(persistence);

    Ok(respond_content(sermons))
}

/// Handler for GET `/api/sermons/{id}`.
pub async fn handle_get_sermon(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let sermon: SermonData = get_sermon(&mut persistence, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, sermon))
}

/// Handler for POST `/api/sermons`.
pub async fn handle_create_sermon(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<SermonRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let sermon: SermonData = create_sermon(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, sermon))
}

/// Handler for PUT `/api/sermons/{id}`.
pub async fn handle_update_sermon(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<SermonRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let sermon: SermonData = update_sermon(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, sermon))
}

/// Handler for DELETE `/api/sermons/{id}`.
pub async fn handle_delete_sermon(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    delete_sermon(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(deleted(id))
}

/// Handler for GET `/api/schedule-events`.
pub async fn handle_list_schedule_events(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<LanguageQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let events: ContentList<ScheduleEventData> = list_schedule_events(&mut persistence, &query)?;
    drop(persistence);

    Ok(respond_content(events))
}

/// Handler for GET `/api/schedule-events/{id}`.
pub async fn handle_get_schedule_event(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let event: ScheduleEventData = get_schedule_event(&mut persistence, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, event))
}

/// Handler for POST `/api/schedule-events`.
pub async fn handle_create_schedule_event(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<ScheduleEventRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let event: ScheduleEventData = create_schedule_event(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, event))
}

/// Handler for PUT `/api/schedule-events/{id}`.
pub async fn handle_update_schedule_event(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ScheduleEventRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let event: ScheduleEventData = update_schedule_event(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, event))
}

/// Handler for DELETE `/api/schedule-events/{id}`.
pub async fn handle_delete_schedule_event(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    delete_schedule_event(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(deleted(id))
}
