// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_child_fields, create_test_persistence, create_test_profile,
    create_test_visitor_child_fields,
};
use crate::{NewCheckIn, PersistenceError};
use vine_domain::ChildRef;

#[test]
fn test_children_are_listed_for_either_parent() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let joao = create_test_profile(&mut persistence, "joao@example.com", "Joao", "Souza");

    let mut fields = create_test_child_fields("Lia", &ana.profile_id);
    fields.parent2_id = Some(joao.profile_id.clone());
    let child = persistence.create_member_child(&fields).unwrap();

    assert!(child.has_parent(&ana.profile_id));
    assert!(child.has_parent(&joao.profile_id));
    assert!(child.photo_permission);

    let for_joao = persistence.list_children_for_parent(&joao.profile_id).unwrap();
    assert_eq!(for_joao.len(), 1);
    assert_eq!(for_joao[0].name, "Lia");
}

#[test]
fn test_child_with_unknown_parent_is_rejected() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_member_child(&create_test_child_fields("Lia", "missing"));

    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_update_child_bumps_version_and_checks_expected() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let child = persistence
        .create_member_child(&create_test_child_fields("Lia", &ana.profile_id))
        .unwrap();

    let mut fields = create_test_child_fields("Lia Souza", &ana.profile_id);
    fields.allergies = None;
    let updated = persistence
        .update_member_child(&child.child_id, &fields, Some(1))
        .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.name, "Lia Souza");
    assert!(updated.allergies.is_none());

    let stale = persistence.update_member_child(&child.child_id, &fields, Some(1));
    assert!(matches!(
        stale,
        Err(PersistenceError::VersionConflict { .. })
    ));
}

#[test]
fn test_search_all_children() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    persistence
        .create_member_child(&create_test_child_fields("Lia", &ana.profile_id))
        .unwrap();
    persistence
        .create_member_child(&create_test_child_fields("Pedro", &ana.profile_id))
        .unwrap();

    assert_eq!(persistence.list_all_children(None).unwrap().len(), 2);
    let found = persistence.list_all_children(Some("ped")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Pedro");
}

#[test]
fn test_delete_child_blocked_by_check_in_history() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let child = persistence
        .create_member_child(&create_test_child_fields("Lia", &ana.profile_id))
        .unwrap();
    let other = persistence
        .create_member_child(&create_test_child_fields("Pedro", &ana.profile_id))
        .unwrap();

    persistence
        .create_check_in(&NewCheckIn {
            child: ChildRef::Member(child.child_id.clone()),
            checked_in_by: ana.account_id.clone(),
            checked_in_by_name: String::from("Ana Souza"),
            checkin_notes: None,
        })
        .unwrap();

    assert!(matches!(
        persistence.delete_member_child(&child.child_id),
        Err(PersistenceError::Conflict(_))
    ));
    persistence.delete_member_child(&other.child_id).unwrap();
    assert!(
        persistence
            .get_member_child(&other.child_id)
            .unwrap()
            .is_none()
    );
    assert!(matches!(
        persistence.delete_member_child(&other.child_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_visitor_children_search_by_parent_name() {
    let mut persistence = create_test_persistence();
    let created = persistence
        .create_visitor_child(&create_test_visitor_child_fields("Theo"), Some("staff-1"))
        .unwrap();

    assert_eq!(created.created_by.as_deref(), Some("staff-1"));
    assert_eq!(
        persistence.list_visitor_children(Some("joana")).unwrap().len(),
        1
    );
    assert!(
        persistence
            .list_visitor_children(Some("nobody"))
            .unwrap()
            .is_empty()
    );
}
