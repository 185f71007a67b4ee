// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::helpers::{
    ANON_KEY, create_test_app_state, create_test_app_state_with, expect_json, router, send,
    token_for,
};

#[tokio::test]
async fn test_health_reports_database_ok() {
    let app_state = create_test_app_state();

    let body: Value = expect_json(
        send(&app_state, "GET", "/api/health", None, None).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
}

#[tokio::test]
async fn test_bootstrap_creates_first_admin_once() {
    let app_state = create_test_app_state();

    let status: Value = expect_json(
        send(&app_state, "GET", "/api/auth/bootstrap", None, None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(status["data"]["is_bootstrap_mode"], true);

    let request: Value = json!({
        "email": "pastor@vine.church",
        "password": "vineyard2026",
        "password_confirmation": "vineyard2026",
        "display_name": "Pastor Lucas"
    });
    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/auth/bootstrap",
            None,
            Some(request.clone()),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(created["data"]["account"]["role"], "admin");
    assert_eq!(created["data"]["permissions"]["can_manage_members"], true);
    assert!(created["data"]["session_token"].as_str().is_some());

    let again: Value = expect_json(
        send(&app_state, "POST", "/api/auth/bootstrap", None, Some(request)).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(again["error"]["code"], "forbidden");

    let status: Value = expect_json(
        send(&app_state, "GET", "/api/auth/bootstrap", None, None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(status["data"]["is_bootstrap_mode"], false);
}

#[tokio::test]
async fn test_sign_up_sign_in_and_sign_out() {
    let app_state = create_test_app_state();

    let signed_up: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/auth/sign-up",
            None,
            Some(json!({
                "email": "ana@vine.church",
                "password": "grapevine9",
                "password_confirmation": "grapevine9"
            })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(signed_up["data"]["account"]["role"], "member");
    assert_eq!(signed_up["data"]["permissions"]["can_access_admin"], false);

    let wrong: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/auth/sign-in",
            None,
            Some(json!({ "email": "ana@vine.church", "password": "grapevine8" })),
        )
        .await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(wrong["error"]["code"], "unauthorized");

    let signed_in: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/auth/sign-in",
            None,
            Some(json!({ "email": "ana@vine.church", "password": "grapevine9" })),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let token: String = signed_in["data"]["session_token"]
        .as_str()
        .unwrap()
        .to_string();

    let session: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", Some(&token), None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(session["data"]["account"]["email"], "ana@vine.church");
    assert_eq!(session["data"]["is_service"], false);

    expect_json(
        send(&app_state, "POST", "/api/auth/sign-out", Some(&token), None).await,
        StatusCode::OK,
    )
    .await;

    let after: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", Some(&token), None).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(after["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_weak_password_is_rejected_with_field() {
    let app_state = create_test_app_state();

    let body: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/auth/sign-up",
            None,
            Some(json!({ "email": "ana@vine.church", "password": "short" })),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["field"], "password");
}

#[tokio::test]
async fn test_missing_and_malformed_authorization() {
    let app_state = create_test_app_state();

    let missing: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", None, None).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(missing["error"]["code"], "unauthorized");

    let response = router(&app_state)
        .oneshot(
            Request::builder()
                .uri("/api/auth/session")
                .header("authorization", "Basic YWRtaW46YWRtaW4=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    expect_json(
        send(&app_state, "GET", "/api/auth/session", Some("not-a-session"), None).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[tokio::test]
async fn test_service_role_key_authenticates_as_service() {
    let app_state = create_test_app_state_with(&["--service-role-key", "svc-secret"]);

    let session: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", Some("svc-secret"), None).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(session["data"]["is_service"], true);
    assert_eq!(session["data"]["permissions"]["can_access_admin"], true);
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app_state = create_test_app_state();

    let response = router(&app_state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/sign-in")
                .header("content-type", "application/json")
                .body(Body::from("{\"email\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    let body: Value = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["message"].as_str().is_some());
}

#[tokio::test]
async fn test_public_forms_require_apikey_when_configured() {
    let app_state = create_test_app_state_with(&["--anon-key", ANON_KEY]);
    let visitor: Value = json!({
        "full_name": "Carla Mendes",
        "email": "carla@example.com",
        "visit_date": "2026-03-01"
    });

    let refused: Value = expect_json(
        send(&app_state, "POST", "/api/visitors", None, Some(visitor.clone())).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(refused["error"]["code"], "unauthorized");

    let response = router(&app_state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/visitors")
                .header("content-type", "application/json")
                .header("apikey", ANON_KEY)
                .body(Body::from(serde_json::to_string(&visitor).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let created: Value = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(created["data"]["full_name"], "Carla Mendes");
    assert_eq!(created["data"]["followed_up"], false);
}

#[tokio::test]
async fn test_member_role_change_applies_on_next_request() {
    let app_state = create_test_app_state();
    let admin: String = token_for(&app_state, "admin@vine.church", "admin", None).await;
    let member: String = token_for(&app_state, "rui@vine.church", "member", None).await;

    let session: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", Some(&member), None).await,
        StatusCode::OK,
    )
    .await;
    let account_id: String = session["data"]["account"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(session["data"]["permissions"]["can_access_kids_checkin"], false);

    let forbidden: Value = expect_json(
        send(&app_state, "GET", "/api/members", Some(&member), None).await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(forbidden["error"]["code"], "forbidden");

    let changed: Value = expect_json(
        send(
            &app_state,
            "PUT",
            &format!("/api/members/{account_id}/role"),
            Some(&admin),
            Some(json!({ "role": "teacher" })),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(changed["data"]["role"], "teacher");

    let session: Value = expect_json(
        send(&app_state, "GET", "/api/auth/session", Some(&member), None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(session["data"]["permissions"]["can_access_kids_checkin"], true);

    let bad_role: Value = expect_json(
        send(
            &app_state,
            "PUT",
            &format!("/api/members/{account_id}/role"),
            Some(&admin),
            Some(json!({ "role": "bishop" })),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(bad_role["error"]["field"], "role");

    let listed: Value = expect_json(
        send(&app_state, "GET", "/api/members?per_page=1", Some(&admin), None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["total"], 2);
    assert_eq!(listed["per_page"], 1);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}
