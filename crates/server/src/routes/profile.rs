// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::info;
use vine_api::handlers::member_profile::{
    create_my_profile, get_my_profile, link_my_spouse, replace_my_profile, unlink_my_spouse,
    update_my_profile_section,
};
use vine_api::handlers::members::{list_members, set_member_role};
use vine_api::{
    AccountInfo, MemberProfileRequest, MemberProfileResponse, PageQuery, ProfileSectionRequest,
    SetRoleRequest, SpouseLinkRequest,
};
use vine_persistence::{MemberProfileData, MemberSummaryData, Page};

use super::respond_page;
use crate::AppState;
use crate::error::{HttpResult, respond};
use crate::session::{JsonBody, QueryParams, SessionActor};

/// Handler for GET `/api/member-profile`.
pub async fn handle_get_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileResponse = get_my_profile(&mut persistence, &actor)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, profile))
}

/// Handler for POST `/api/member-profile`.
pub async fn handle_create_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<MemberProfileRequest>,
) -> HttpResult {
    info!(account_id = %actor.account_id, "Handling create_member_profile request");

    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileResponse = create_my_profile(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::CREATED, profile))
}

/// Handler for PUT `/api/member-profile`.
pub async fn handle_replace_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<MemberProfileRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileResponse = replace_my_profile(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, profile))
}

/// Handler for PATCH `/api/member-profile`.
///
/// Saves one section; other sections keep their stored values.
pub async fn handle_update_profile_section(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<ProfileSectionRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileResponse =
        update_my_profile_section(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, profile))
}

/// Handler for PUT `/api/member-profile/spouse`.
pub async fn handle_link_spouse(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    JsonBody(req): JsonBody<SpouseLinkRequest>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileData = link_my_spouse(&mut persistence, &actor, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, profile))
}

/// Handler for DELETE `/api/member-profile/spouse`.
pub async fn handle_unlink_spouse(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let profile: MemberProfileData = unlink_my_spouse(&mut persistence, &actor)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, profile))
}

/// Handler for GET `/api/members`.
pub async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    QueryParams(query): QueryParams<PageQuery>,
) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let page: Page<MemberSummaryData> = list_members(&mut persistence, &actor, &query)?;
    drop(persistence);

    Ok(respond_page(page))
}

/// Handler for PUT `/api/members/{account_id}/role`.
pub async fn handle_set_member_role(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(account_id): Path<String>,
    JsonBody(req): JsonBody<SetRoleRequest>,
) -> HttpResult {
    info!(
        admin = %actor.account_id,
        account_id,
        role = ?req.role,
        "Handling set_member_role request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let account: AccountInfo = set_member_role(&mut persistence, &actor, &account_id, &req)?;
    drop(persistence);

    Ok(respond(StatusCode::OK, account))
}
