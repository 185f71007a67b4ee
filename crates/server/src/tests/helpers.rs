// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router fixtures for end-to-end route tests.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use clap::Parser;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;
use vine_persistence::{MemberChildData, MemberChildFields, Persistence};

use crate::AppState;
use crate::config::Args;
use crate::routes::build_router;

pub const TEST_PASSWORD: &str = "password123";
pub const ANON_KEY: &str = "public-anon-key";

fn scratch_upload_dir() -> String {
    std::env::temp_dir()
        .join(format!("vine-route-uploads-{}", Uuid::new_v4()))
        .display()
        .to_string()
}

/// App state over an in-memory database with a scratch upload directory.
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with(&[])
}

/// Like [`create_test_app_state`], with extra command line flags.
pub fn create_test_app_state_with(extra: &[&str]) -> AppState {
    let upload_dir: String = scratch_upload_dir();
    let mut argv: Vec<&str> = vec!["vine-server", "--upload-dir", upload_dir.as_str()];
    argv.extend_from_slice(extra);
    let args: Args = Args::parse_from(argv);

    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, &args)
}

/// Creates an account and returns a bearer token for it.
pub async fn token_for(
    app_state: &AppState,
    email: &str,
    role: &str,
    display_name: Option<&str>,
) -> String {
    let mut persistence = app_state.persistence.lock().await;
    let account = persistence
        .create_account(email, TEST_PASSWORD, display_name, role)
        .expect("Failed to create account");
    app_state
        .auth
        .start_session(&mut persistence, &account)
        .expect("Failed to start session")
        .session_token
}

/// Registers a member child with no parents linked.
pub async fn seed_child(app_state: &AppState, name: &str) -> MemberChildData {
    let mut persistence = app_state.persistence.lock().await;
    persistence
        .create_member_child(&MemberChildFields {
            name: name.to_string(),
            date_of_birth: Some(String::from("2019-05-02")),
            allergies: Some(String::from("peanuts")),
            ..MemberChildFields::default()
        })
        .expect("Failed to create child")
}

pub fn router(app_state: &AppState) -> Router {
    build_router(app_state.clone())
}

/// Sends one request through a fresh router.
pub async fn send(
    app_state: &AppState,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router(app_state).oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Asserts the status and returns the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
