// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use time::{Date, OffsetDateTime};
use vine_domain::ChildRef;

use super::{
    create_test_child_fields, create_test_persistence, create_test_profile,
    create_test_visitor_child_fields,
};
use crate::diesel_schema::check_ins;
use crate::{CheckInFilter, CheckOut, NewCheckIn, Persistence, PersistenceError};

fn check_in_as_teacher(persistence: &mut Persistence, child: ChildRef) -> crate::CheckInRecord {
    persistence
        .create_check_in(&NewCheckIn {
            child,
            checked_in_by: String::from("teacher-account"),
            checked_in_by_name: String::from("Tia Rosa"),
            checkin_notes: Some(String::from("brought a jacket")),
        })
        .unwrap()
}

fn check_out_request(check_in_id: &str, expected_version: Option<i32>) -> CheckOut {
    CheckOut {
        check_in_id: check_in_id.to_string(),
        checked_out_by: String::from("leader-account"),
        checked_out_by_name: String::from("Pastor Davi"),
        checkout_notes: Some(String::from("picked up by mother")),
        expected_version,
    }
}

#[test]
fn test_member_check_in_joins_parent_contact() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let child = persistence
        .create_member_child(&create_test_child_fields("Lia", &ana.profile_id))
        .unwrap();

    let record = check_in_as_teacher(&mut persistence, ChildRef::Member(child.child_id.clone()));

    assert_eq!(record.check_in.status, "checked_in");
    assert_eq!(record.check_in.checked_in_by_name, "Tia Rosa");
    assert_eq!(record.check_in.member_child_id.as_deref(), Some(child.child_id.as_str()));
    assert!(record.check_in.visitor_child_id.is_none());
    assert!(record.check_in.checked_out_at.is_none());
    assert_eq!(record.child_type, "member");
    assert_eq!(record.child_name.as_deref(), Some("Lia"));
    assert_eq!(record.allergies.as_deref(), Some("peanuts"));
    assert_eq!(record.parent_name.as_deref(), Some("Ana Souza"));
    assert_eq!(record.parent_phone.as_deref(), Some("519-123-4567"));
}

#[test]
fn test_member_child_falls_back_to_second_parent() {
    let mut persistence = create_test_persistence();
    let joao = create_test_profile(&mut persistence, "joao@example.com", "Joao", "Souza");
    let mut fields = create_test_child_fields("Lia", &joao.profile_id);
    fields.parent1_id = None;
    fields.parent2_id = Some(joao.profile_id.clone());
    let child = persistence.create_member_child(&fields).unwrap();

    let record = check_in_as_teacher(&mut persistence, ChildRef::Member(child.child_id));

    assert_eq!(record.parent_name.as_deref(), Some("Joao Souza"));
}

#[test]
fn test_visitor_check_in_uses_visitor_parent() {
    let mut persistence = create_test_persistence();
    let visitor = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();

    let record = check_in_as_teacher(
        &mut persistence,
        ChildRef::Visitor(visitor.visitor_child_id.clone()),
    );

    assert_eq!(record.child_type, "visitor");
    assert_eq!(record.parent_name.as_deref(), Some("Joana Lima"));
    assert_eq!(record.parent_phone.as_deref(), Some("(519) 555-0101"));
}

#[test]
fn test_check_in_for_missing_child_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_check_in(&NewCheckIn {
        child: ChildRef::Member(String::from("missing")),
        checked_in_by: String::from("teacher-account"),
        checked_in_by_name: String::from("Tia Rosa"),
        checkin_notes: None,
    });

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert!(
        persistence
            .list_check_ins(&CheckInFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_schema_rejects_rows_with_both_or_no_child() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let child = persistence
        .create_member_child(&create_test_child_fields("Lia", &ana.profile_id))
        .unwrap();
    let visitor = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();

    let both = diesel::insert_into(check_ins::table)
        .values((
            check_ins::check_in_id.eq("both"),
            check_ins::member_child_id.eq(Some(child.child_id.as_str())),
            check_ins::visitor_child_id.eq(Some(visitor.visitor_child_id.as_str())),
            check_ins::checked_in_by.eq("x"),
            check_ins::checked_in_by_name.eq("x"),
            check_ins::checked_in_at.eq("2026-10-18T09:00:00Z"),
        ))
        .execute(&mut persistence.conn)
        .map_err(PersistenceError::from);
    assert!(matches!(both, Err(PersistenceError::CheckViolation(_))));

    let neither = diesel::insert_into(check_ins::table)
        .values((
            check_ins::check_in_id.eq("neither"),
            check_ins::checked_in_by.eq("x"),
            check_ins::checked_in_by_name.eq("x"),
            check_ins::checked_in_at.eq("2026-10-18T09:00:00Z"),
        ))
        .execute(&mut persistence.conn)
        .map_err(PersistenceError::from);
    assert!(matches!(neither, Err(PersistenceError::CheckViolation(_))));
}

#[test]
fn test_check_out_sets_checkout_fields() {
    let mut persistence = create_test_persistence();
    let visitor = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();
    let record = check_in_as_teacher(&mut persistence, ChildRef::Visitor(visitor.visitor_child_id));

    let checked_out = persistence
        .check_out(&check_out_request(&record.check_in.check_in_id, None))
        .unwrap();

    assert_eq!(checked_out.check_in.status, "checked_out");
    assert!(checked_out.check_in.checked_out_at.is_some());
    assert_eq!(
        checked_out.check_in.checked_out_by_name.as_deref(),
        Some("Pastor Davi")
    );
    assert_eq!(
        checked_out.check_in.checkout_notes.as_deref(),
        Some("picked up by mother")
    );
    assert_eq!(checked_out.check_in.version, 2);
    assert_eq!(checked_out.check_in.checked_in_by_name, "Tia Rosa");
}

#[test]
fn test_second_check_out_conflicts_and_keeps_first() {
    let mut persistence = create_test_persistence();
    let visitor = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();
    let record = check_in_as_teacher(&mut persistence, ChildRef::Visitor(visitor.visitor_child_id));
    let id = record.check_in.check_in_id;

    let first = persistence.check_out(&check_out_request(&id, None)).unwrap();

    let mut second_request = check_out_request(&id, None);
    second_request.checked_out_by_name = String::from("Someone Else");
    let second = persistence.check_out(&second_request);

    assert!(matches!(second, Err(PersistenceError::Conflict(_))));
    let stored = persistence.get_check_in(&id).unwrap().unwrap();
    assert_eq!(stored.check_in.checked_out_by_name, first.check_in.checked_out_by_name);
    assert_eq!(stored.check_in.checked_out_at, first.check_in.checked_out_at);
}

#[test]
fn test_check_out_with_stale_version_conflicts() {
    let mut persistence = create_test_persistence();
    let visitor = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();
    let record = check_in_as_teacher(&mut persistence, ChildRef::Visitor(visitor.visitor_child_id));

    let result = persistence.check_out(&check_out_request(&record.check_in.check_in_id, Some(7)));

    assert_eq!(
        result,
        Err(PersistenceError::VersionConflict {
            expected: 7,
            actual: 1
        })
    );
}

#[test]
fn test_check_out_missing_row_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = persistence.check_out(&check_out_request("missing", None));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_list_filters_by_status_and_dates() {
    let mut persistence = create_test_persistence();
    let theo = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), None)
        .unwrap();
    let bia = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Bia"), None)
        .unwrap();
    let first = check_in_as_teacher(&mut persistence, ChildRef::Visitor(theo.visitor_child_id));
    check_in_as_teacher(&mut persistence, ChildRef::Visitor(bia.visitor_child_id));
    persistence
        .check_out(&check_out_request(&first.check_in.check_in_id, None))
        .unwrap();

    let today: Date = OffsetDateTime::now_utc().date();

    let checked_in = persistence
        .list_check_ins(&CheckInFilter {
            status: Some(String::from("checked_in")),
            ..CheckInFilter::default()
        })
        .unwrap();
    assert_eq!(checked_in.len(), 1);
    assert_eq!(checked_in[0].child_name.as_deref(), Some("Bia"));

    let today_only = persistence
        .list_check_ins(&CheckInFilter {
            status: None,
            from_date: Some(today),
            to_date: Some(today),
        })
        .unwrap();
    assert_eq!(today_only.len(), 2);

    let before_today = persistence
        .list_check_ins(&CheckInFilter {
            status: None,
            from_date: None,
            to_date: today.previous_day(),
        })
        .unwrap();
    assert!(before_today.is_empty());

    let after_today = persistence
        .list_check_ins(&CheckInFilter {
            status: None,
            from_date: today.next_day(),
            to_date: None,
        })
        .unwrap();
    assert!(after_today.is_empty());
}
