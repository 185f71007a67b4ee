// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{create_test_app_state, expect_json, seed_child, send, token_for};
use crate::live::LiveEvent;

#[tokio::test]
async fn test_teacher_checks_child_in_and_out() {
    let app_state = create_test_app_state();
    let teacher: String =
        token_for(&app_state, "ana@vine.church", "teacher", Some("Teacher Ana")).await;
    let child = seed_child(&app_state, "Pedro Lima").await;
    let mut board = app_state.live_events.subscribe();

    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({
                "member_child_id": child.child_id,
                "checkin_notes": "  brought a jacket  "
            })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let record: &Value = &created["data"];
    assert_eq!(record["status"], "checked_in");
    assert_eq!(record["checked_in_by_name"], "Teacher Ana");
    assert_eq!(record["child_type"], "member");
    assert_eq!(record["child_name"], "Pedro Lima");
    assert_eq!(record["allergies"], "peanuts");
    assert_eq!(record["checkin_notes"], "brought a jacket");
    assert!(record["checked_out_at"].is_null());
    let check_in_id: String = record["id"].as_str().unwrap().to_string();
    assert!(record.get("check_in_id").is_none());

    match board.try_recv().unwrap() {
        LiveEvent::ChildCheckedIn {
            check_in_id: event_id,
            child_name,
            checked_in_by_name,
            ..
        } => {
            assert_eq!(event_id, check_in_id);
            assert_eq!(child_name.as_deref(), Some("Pedro Lima"));
            assert_eq!(checked_in_by_name, "Teacher Ana");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let checked_out: Value = expect_json(
        send(
            &app_state,
            "PUT",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({ "id": check_in_id, "checkout_notes": "picked up by mom" })),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(checked_out["data"]["id"], check_in_id.as_str());
    assert_eq!(checked_out["data"]["status"], "checked_out");
    assert_eq!(checked_out["data"]["checked_out_by_name"], "Teacher Ana");
    assert!(checked_out["data"]["checked_out_at"].as_str().is_some());
    assert!(matches!(
        board.try_recv().unwrap(),
        LiveEvent::ChildCheckedOut { .. }
    ));

    let again: Value = expect_json(
        send(
            &app_state,
            "PUT",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({ "check_in_id": check_in_id })),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(again["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_member_cannot_check_in() {
    let app_state = create_test_app_state();
    let member: String = token_for(&app_state, "rui@vine.church", "member", None).await;
    let teacher: String = token_for(&app_state, "ana@vine.church", "teacher", None).await;
    let child = seed_child(&app_state, "Pedro Lima").await;

    let body: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&member),
            Some(json!({ "member_child_id": child.child_id })),
        )
        .await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(body["error"]["code"], "forbidden");

    let listed: Value = expect_json(
        send(&app_state, "GET", "/api/check-ins", Some(&teacher), None).await,
        StatusCode::OK,
    )
    .await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_check_in_requires_exactly_one_child() {
    let app_state = create_test_app_state();
    let teacher: String = token_for(&app_state, "ana@vine.church", "teacher", None).await;
    let child = seed_child(&app_state, "Pedro Lima").await;

    let neither: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({})),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(neither["error"]["field"], "member_child_id");

    let both: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({
                "member_child_id": child.child_id,
                "visitor_child_id": "does-not-matter"
            })),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(both["error"]["code"], "validation_error");

    let unknown: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&teacher),
            Some(json!({ "member_child_id": "missing-child" })),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(unknown["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_visitor_child_check_in_carries_parent_contact() {
    let app_state = create_test_app_state();
    let leader: String =
        token_for(&app_state, "lia@vine.church", "leader", Some("Lia Costa")).await;

    let visitor_child: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/visitor-children",
            Some(&leader),
            Some(json!({
                "name": "Sofia Alves",
                "parent_name": "Joana Alves",
                "parent_phone": "(519) 555-0101"
            })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let visitor_child_id: &str = visitor_child["data"]["id"].as_str().unwrap();

    let created: Value = expect_json(
        send(
            &app_state,
            "POST",
            "/api/check-ins",
            Some(&leader),
            Some(json!({ "visitor_child_id": visitor_child_id })),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(created["data"]["child_type"], "visitor");
    assert_eq!(created["data"]["child_name"], "Sofia Alves");
    assert_eq!(created["data"]["parent_name"], "Joana Alves");
    assert!(created["data"]["member_child_id"].is_null());

    let active: Value = expect_json(
        send(
            &app_state,
            "GET",
            "/api/check-ins?status=checked_in",
            Some(&leader),
            None,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(active["data"].as_array().unwrap().len(), 1);

    let finished: Value = expect_json(
        send(
            &app_state,
            "GET",
            "/api/check-ins?status=checked_out",
            Some(&leader),
            None,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert!(finished["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_live_board_requires_kids_staff() {
    let app_state = create_test_app_state();
    let member: String = token_for(&app_state, "rui@vine.church", "member", None).await;

    let anonymous: Value = expect_json(
        send(&app_state, "GET", "/api/live", None, None).await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(anonymous["error"]["code"], "unauthorized");

    let as_member: Value = expect_json(
        send(
            &app_state,
            "GET",
            &format!("/api/live?access_token={member}"),
            None,
            None,
        )
        .await,
        StatusCode::FORBIDDEN,
    )
    .await;
    assert_eq!(as_member["error"]["code"], "forbidden");
}
