// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes.
//!
//! Handlers here only extract, lock persistence, call into `vine_api` and
//! wrap the result. Validation and role checks live in the API layer.

mod auth;
mod check_ins;
mod children;
mod content;
mod gallery;
mod profile;
mod reports;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, State as AxumState},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;
use vine_api::{ApiError, ContentList};
use vine_domain::MAX_UPLOAD_BYTES;
use vine_persistence::Page;

use crate::AppState;
use crate::error::{HttpError, HttpResult, respond, respond_with};
use crate::live::live_events_handler;
use crate::storage::content_type_for;

/// Upload bodies above this are refused before they are buffered. The
/// image size rule itself is enforced by the API layer.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024;

/// Acknowledgement for deletes.
#[derive(Debug, Serialize)]
struct Deleted {
    id: String,
    deleted: bool,
}

fn deleted(id: String) -> axum::response::Response {
    respond(StatusCode::OK, Deleted { id, deleted: true })
}

/// Page items as `data`, counts as top-level members.
fn respond_page<T: Serialize>(page: Page<T>) -> axum::response::Response {
    let mut extra: Map<String, Value> = Map::new();
    extra.insert(String::from("total"), Value::from(page.total));
    extra.insert(String::from("page"), Value::from(page.page));
    extra.insert(String::from("per_page"), Value::from(page.per_page));
    respond_with(StatusCode::OK, page.items, extra)
}

/// Content items as `data` with their `source`.
fn respond_content<T: Serialize>(list: ContentList<T>) -> axum::response::Response {
    let mut extra: Map<String, Value> = Map::new();
    extra.insert(String::from("source"), Value::from(list.source.as_str()));
    respond_with(StatusCode::OK, list.items, extra)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

/// Handler for GET `/api/health`.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> HttpResult {
    let mut persistence = app_state.persistence.lock().await;
    let database_ok: bool = match persistence.count_accounts() {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "Health check database probe failed");
            false
        }
    };
    drop(persistence);

    let (status, label) = if database_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    Ok(respond(
        status,
        HealthResponse {
            status: label,
            database: if database_ok { "ok" } else { "unavailable" },
            version: env!("CARGO_PKG_VERSION"),
        },
    ))
}

/// Handler for GET `/uploads/{file_name}`.
async fn handle_get_upload(
    AxumState(app_state): AxumState<AppState>,
    Path(file_name): Path<String>,
) -> HttpResult {
    let bytes: Vec<u8> = app_state
        .uploads
        .read(&file_name)
        .await
        .map_err(|e| {
            error!(error = %e, file_name, "Failed to read upload");
            HttpError::internal("Failed to read upload")
        })?
        .ok_or_else(|| ApiError::not_found("Upload", &file_name))?;

    Ok(([(CONTENT_TYPE, content_type_for(&file_name))], bytes).into_response())
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/live", get(live_events_handler))
        .route("/uploads/{file_name}", get(handle_get_upload))
        // Authentication
        .route(
            "/api/auth/bootstrap",
            get(auth::handle_bootstrap_status).post(auth::handle_bootstrap),
        )
        .route("/api/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/auth/session", get(auth::handle_session))
        // Kids check-in
        .route(
            "/api/check-ins",
            get(check_ins::handle_list_check_ins)
                .post(check_ins::handle_create_check_in)
                .put(check_ins::handle_check_out),
        )
        .route("/api/check-ins/{id}", get(check_ins::handle_get_check_in))
        .route(
            "/api/children",
            get(children::handle_list_children).post(children::handle_create_child),
        )
        .route(
            "/api/children/{id}",
            get(children::handle_get_child)
                .put(children::handle_update_child)
                .delete(children::handle_delete_child),
        )
        .route(
            "/api/visitor-children",
            get(children::handle_list_visitor_children)
                .post(children::handle_create_visitor_child),
        )
        .route(
            "/api/visitor-children/{id}",
            get(children::handle_get_visitor_child),
        )
        // Member self-service
        .route(
            "/api/member-profile",
            get(profile::handle_get_profile)
                .post(profile::handle_create_profile)
                .put(profile::handle_replace_profile)
                .patch(profile::handle_update_profile_section),
        )
        .route(
            "/api/member-profile/spouse",
            put(profile::handle_link_spouse).delete(profile::handle_unlink_spouse),
        )
        .route("/api/members", get(profile::handle_list_members))
        .route(
            "/api/members/{account_id}/role",
            put(profile::handle_set_member_role),
        )
        // Public content
        .route(
            "/api/sermons",
            get(content::handle_list_sermons).post(content::handle_create_sermon),
        )
        .route(
            "/api/sermons/{id}",
            get(content::handle_get_sermon)
                .put(content::handle_update_sermon)
                .delete(content::handle_delete_sermon),
        )
        .route(
            "/api/schedule-events",
            get(content::handle_list_schedule_events).post(content::handle_create_schedule_event),
        )
        .route(
            "/api/schedule-events/{id}",
            get(content::handle_get_schedule_event)
                .put(content::handle_update_schedule_event)
                .delete(content::handle_delete_schedule_event),
        )
        .route(
            "/api/vine-kids-gallery",
            get(gallery::handle_list_images).post(gallery::handle_create_image),
        )
        .route(
            "/api/vine-kids-gallery/upload",
            post(gallery::handle_upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/vine-kids-gallery/{id}",
            get(gallery::handle_get_image)
                .put(gallery::handle_update_image)
                .delete(gallery::handle_delete_image),
        )
        // Visitor and volunteer forms
        .route(
            "/api/visitors",
            get(reports::handle_list_visitors).post(reports::handle_register_visitor),
        )
        .route(
            "/api/visitors/{id}",
            get(reports::handle_get_visitor)
                .put(reports::handle_update_visitor)
                .delete(reports::handle_delete_visitor),
        )
        .route(
            "/api/volunteers",
            get(reports::handle_list_volunteers).post(reports::handle_register_volunteer),
        )
        .route(
            "/api/volunteers/{id}",
            get(reports::handle_get_volunteer)
                .put(reports::handle_update_volunteer)
                .delete(reports::handle_delete_volunteer),
        )
        .with_state(app_state)
}
