// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, create_test_profile, create_test_profile_fields};
use crate::{
    FamilySection, PersistenceError, ProfileChanges, SpiritualSection, VolunteerSection,
};

#[test]
fn test_create_and_get_profile() {
    let mut persistence = create_test_persistence();
    let profile = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");

    assert_eq!(profile.version, 1);
    assert_eq!(profile.full_name(), "Ana Souza");
    assert!(profile.volunteer_areas.is_empty());
    assert!(profile.spouse_id.is_none());

    let fetched = persistence
        .get_member_profile_by_account(&profile.account_id)
        .unwrap()
        .unwrap();
    assert_eq!(fetched, profile);
}

#[test]
fn test_second_profile_for_account_conflicts() {
    let mut persistence = create_test_persistence();
    let profile = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");

    let result = persistence.create_member_profile(
        &profile.account_id,
        &create_test_profile_fields("Ana", "Again"),
    );

    assert!(matches!(result, Err(PersistenceError::Conflict(_))));
}

#[test]
fn test_section_update_only_touches_its_columns() {
    let mut persistence = create_test_persistence();
    let profile = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");

    let updated = persistence
        .update_member_profile(
            &profile.profile_id,
            &ProfileChanges::Volunteer(VolunteerSection {
                volunteer_areas: vec![String::from("kids"), String::from("media")],
                volunteer_availability: Some(String::from("Sundays")),
            }),
            None,
        )
        .unwrap();

    assert_eq!(updated.version, 2);
    assert_eq!(updated.volunteer_areas, vec!["kids", "media"]);
    assert_eq!(updated.first_name, "Ana");
    assert_eq!(updated.phone, profile.phone);
    assert_eq!(updated.date_of_birth, profile.date_of_birth);
}

#[test]
fn test_stale_expected_version_is_rejected_without_writing() {
    let mut persistence = create_test_persistence();
    let profile = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");

    persistence
        .update_member_profile(
            &profile.profile_id,
            &ProfileChanges::Family(FamilySection {
                marital_status: Some(String::from("single")),
            }),
            Some(1),
        )
        .unwrap();

    let stale = persistence.update_member_profile(
        &profile.profile_id,
        &ProfileChanges::Spiritual(SpiritualSection {
            baptized: true,
            ..SpiritualSection::default()
        }),
        Some(1),
    );

    assert_eq!(
        stale,
        Err(PersistenceError::VersionConflict {
            expected: 1,
            actual: 2
        })
    );

    let current = persistence
        .get_member_profile(&profile.profile_id)
        .unwrap()
        .unwrap();
    assert!(!current.baptized);
    assert_eq!(current.version, 2);
}

#[test]
fn test_update_missing_profile_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = persistence.update_member_profile(
        "missing",
        &ProfileChanges::Family(FamilySection::default()),
        None,
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_spouse_link_is_symmetric() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let joao = create_test_profile(&mut persistence, "joao@example.com", "Joao", "Souza");

    persistence
        .link_spouse(&ana.profile_id, &joao.profile_id)
        .unwrap();

    let ana_now = persistence
        .get_member_profile(&ana.profile_id)
        .unwrap()
        .unwrap();
    let joao_now = persistence
        .get_member_profile(&joao.profile_id)
        .unwrap()
        .unwrap();

    assert_eq!(ana_now.spouse_id.as_deref(), Some(joao.profile_id.as_str()));
    assert_eq!(ana_now.spouse_name.as_deref(), Some("Joao Souza"));
    assert_eq!(joao_now.spouse_id.as_deref(), Some(ana.profile_id.as_str()));

    // Linking again in either direction is a no-op.
    persistence
        .link_spouse(&joao.profile_id, &ana.profile_id)
        .unwrap();

    assert!(persistence.unlink_spouse(&joao.profile_id).unwrap());
    let ana_after = persistence
        .get_member_profile(&ana.profile_id)
        .unwrap()
        .unwrap();
    assert!(ana_after.spouse_id.is_none());
    assert!(!persistence.unlink_spouse(&ana.profile_id).unwrap());
}

#[test]
fn test_spouse_link_rejects_already_linked_profiles() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");
    let joao = create_test_profile(&mut persistence, "joao@example.com", "Joao", "Souza");
    let carla = create_test_profile(&mut persistence, "carla@example.com", "Carla", "Dias");

    persistence
        .link_spouse(&ana.profile_id, &joao.profile_id)
        .unwrap();

    let result = persistence.link_spouse(&carla.profile_id, &joao.profile_id);
    assert!(matches!(result, Err(PersistenceError::Conflict(_))));

    let carla_now = persistence
        .get_member_profile(&carla.profile_id)
        .unwrap()
        .unwrap();
    assert!(carla_now.spouse_id.is_none());
}

#[test]
fn test_spouse_link_rejects_self_and_missing() {
    let mut persistence = create_test_persistence();
    let ana = create_test_profile(&mut persistence, "ana@example.com", "Ana", "Souza");

    assert!(matches!(
        persistence.link_spouse(&ana.profile_id, &ana.profile_id),
        Err(PersistenceError::Conflict(_))
    ));
    assert!(matches!(
        persistence.link_spouse(&ana.profile_id, "missing"),
        Err(PersistenceError::NotFound(_))
    ));
}
