// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use vine_api::handlers::children::{
    create_child, delete_child, get_child, list_children, update_child,
};
use vine_api::handlers::visitor_children::{
    create_visitor_child, get_visitor_child, list_visitor_children,
};
use vine_api::{ListChildrenQuery, MemberChildRequest, SearchQuery, VisitorChildRequest};
use vine_persistence::{MemberChildData, VisitorChildData};

use super::deleted;
use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::session::{JsonBody, QueryParams, SessionActor};

/// Handler for GET `/api/children`.
pub async fn handle_list_children(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<ListChildrenQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let children: Vec<MemberChildData> = list_children(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, children))
}

/// Handler for GET `/api/children/{id}`.
pub async fn handle_get_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let child: MemberChildData = get_child(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, child))
}

/// Handler for POST `/api/children`.
pub async fn handle_create_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<MemberChildRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let child: MemberChildData = create_child(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, child))
}

/// Handler for PUT `/api/children/{id}`.
pub async fn handle_update_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<MemberChildRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let child: MemberChildData = update_child(&mut persistence, &actor, &id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, child))
}

/// Handler for DELETE `/api/children/{id}`.
pub async fn handle_delete_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    delete_child(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(deleted(id))
}

/// Handler for GET `/api/visitor-children`.
pub async fn handle_list_visitor_children(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<SearchQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let children: Vec<VisitorChildData> = list_visitor_children(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, children))
}

/// Handler for GET `/api/visitor-children/{id}`.
pub async fn handle_get_visitor_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let child: VisitorChildData = get_visitor_child(&mut persistence, &actor, &id)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, child))
}

/// Handler for POST `/api/visitor-children`.
pub async fn handle_create_visitor_child(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<VisitorChildRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let child: VisitorChildData = create_visitor_child(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, child))
}
