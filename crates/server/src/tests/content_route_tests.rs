// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::helpers::{create_test_app_state, expect_json, router, send, token_for};
use crate::AppState;

fn sunday_service() -> Value {
    json!({
        "title": "Culto de Domingo",
        "day_of_week": 0,
        "start_time": "10:00",
        "end_time": "11:30",
        "location": "Main hall",
        "language": "pt"
    })
}

async fn upload(
    app_state: &AppState,
    token: &str,
    content_type: &str,
    bytes: &'static [u8],
) -> Response<Body> {
    router(app_state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/vine-kids-gallery/upload")
                .header("authorization", format!("Bearer {token}"))
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(bytes))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_schedule_update_without_session_writes_nothing() {
    let app_state = create_test_app_state();
    let admin: String = token_for(&app_state, "admin@vine.church", "admin", None).await;

    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/schedule-events",
            Some(&admin),
            Some(sunday_service()),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let event_id: String = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["is_recurring"], true);

    let mut changed: Value = sunday_service();
    changed["title"] = json!("Hijacked");
    expect_json(
        send(
            &app_state,
            "PUT",
            &format!("/api/schedule-events/{event_id}"),
            None,
            Some(changed),
        )
        .await,
        StatusCode::UNAUTHORIZED,
    )
    .await;

    let fetched: Value = expect_json(
        send(
            &app_state,
            "GET",
            &format!("/api/schedule-events/{event_id}"),
            None,
            None,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["data"]["title"], "Culto de Domingo");
    assert_eq!(fetched["data"]["version"], 1);
}

#[tokio::test]
async fn test_trainee_edits_schedule_and_member_cannot() {
    let app_state = create_test_app_state();
    let trainee: String = token_for(&app_state, "tiago@vine.church", "trainee", None).await;
    let member: String = token_for(&app_state, "rui@vine.church", "member", None).await;

    expect_json(
        send(
            &app_state,
            "POST",
            "/api/schedule-events",
            Some(&member),
            Some(sunday_service()),
        )
        .await,
        StatusCode::FORBIDDEN,
    )
    .await;

    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/schedule-events",
            Some(&trainee),
            Some(sunday_service()),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let event_id: &str = created["data"]["id"].as_str().unwrap();

    let mut bad: Value = sunday_service();
    bad["end_time"] = json!("09:00");
    let rejected: Value = expect_json(
        send(
            &app_state,
            "PUT",
            &format!("/api/schedule-events/{event_id}"),
            Some(&trainee),
            Some(bad),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(rejected["error"]["field"], "end_time");

    let listed: Value = expect_json(
        send(&app_state, "GET", "/api/schedule-events?language=pt", None, None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["source"], "database");
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let deleted: Value = expect_json(
        send(
            &app_state,
            "DELETE",
            &format!("/api/schedule-events/{event_id}"),
            Some(&trainee),
            None,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(deleted["data"]["deleted"], true);
    assert_eq!(deleted["data"]["id"], event_id);
}

#[tokio::test]
async fn test_sermons_are_public_to_read_and_admin_to_write() {
    let app_state = create_test_app_state();
    let admin: String = token_for(&app_state, "admin@vine.church", "admin", None).await;
    let leader: String = token_for(&app_state, "lia@vine.church", "leader", None).await;
    let sermon: Value = json!({
        "title": "The True Vine",
        "speaker": "Pastor Lucas",
        "sermon_date": "2026-09-06",
        "language": "en"
    });

    expect_json(
        send(&app_state, "POST", "/api/sermons", Some(&leader), Some(sermon.clone())).await,
        StatusCode::FORBIDDEN,
    )
    .await;

    expect_json(
        send(&app_state, "POST", "/api/sermons", Some(&admin), Some(sermon)).await,
        StatusCode::CREATED,
    )
    .await;

    let listed: Value = expect_json(
        send(&app_state, "GET", "/api/sermons", None, None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["source"], "database");
    assert_eq!(listed["data"][0]["title"], "The True Vine");

    let bad_language: Value = expect_json(
        send(&app_state, "GET", "/api/sermons?language=fr", None, None).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(bad_language["error"]["field"], "language");
}

#[tokio::test]
async fn test_gallery_upload_serve_and_delete() {
    let app_state = create_test_app_state();
    let admin: String = token_for(&app_state, "admin@vine.church", "admin", None).await;

    let stored: Value = expect_json(
        upload(&app_state, &admin, "image/png", b"\x89PNG fake image").await,
        StatusCode::CREATED,
    )
    .await;
    let file_name: String = stored["data"]["file_name"].as_str().unwrap().to_string();
    let image_url: String = stored["data"]["image_url"].as_str().unwrap().to_string();
    assert!(file_name.ends_with(".png"));
    assert_eq!(image_url, format!("/uploads/{file_name}"));

    let served = send(&app_state, "GET", &image_url, None, None).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.headers()[CONTENT_TYPE], "image/png");

    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/vine-kids-gallery",
            Some(&admin),
            Some(json!({ "title": "Easter crafts", "image_url": image_url })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let image_id: &str = created["data"]["id"].as_str().unwrap();

    let listed: Value = expect_json(
        send(&app_state, "GET", "/api/vine-kids-gallery", None, None).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    expect_json(
        send(
            &app_state,
            "DELETE",
            &format!("/api/vine-kids-gallery/{image_id}"),
            Some(&admin),
            None,
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let gone: Value = expect_json(
        send(&app_state, "GET", &image_url, None, None).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(gone["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_gallery_upload_rejections() {
    let app_state = create_test_app_state();
    let admin: String = token_for(&app_state, "admin@vine.church", "admin", None).await;
    let teacher: String = token_for(&app_state, "ana@vine.church", "teacher", None).await;

    let forbidden: Value = expect_json(
        upload(&app_state, &teacher, "image/png", b"png bytes").await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(forbidden["error"]["code"], "forbidden");

    let wrong_type: Value = expect_json(
        upload(&app_state, &admin, "application/pdf", b"%PDF-1.7").await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(wrong_type["error"]["code"], "validation_error");
}
