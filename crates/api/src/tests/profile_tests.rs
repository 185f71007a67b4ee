// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member profile self-service tests.

use vine_persistence::Persistence;

use crate::handlers::children::create_child;
use crate::handlers::member_profile::{
    create_my_profile, get_my_profile, link_my_spouse, replace_my_profile, unlink_my_spouse,
    update_my_profile_section,
};
use crate::{
    ApiError, AuthenticatedActor, MemberChildRequest, MemberProfileRequest,
    ProfileSectionRequest, SpouseLinkRequest,
};

use super::helpers::{create_actor, setup_test_persistence, valid_profile_request};

fn member_with_profile(
    persistence: &mut Persistence,
    email: &str,
    first: &str,
) -> (AuthenticatedActor, String) {
    let actor = create_actor(persistence, email, "member", None);
    let response =
        create_my_profile(persistence, &actor, &valid_profile_request(first, "Souza")).unwrap();
    (actor, response.profile.profile_id)
}

fn section(name: &str, fields: MemberProfileRequest) -> ProfileSectionRequest {
    ProfileSectionRequest {
        section: name.to_string(),
        fields,
        expected_version: None,
    }
}

fn link(spouse_profile_id: &str) -> SpouseLinkRequest {
    SpouseLinkRequest {
        spouse_profile_id: Some(spouse_profile_id.to_string()),
    }
}

#[test]
fn test_create_profile_without_gender_writes_nothing() {
    let mut persistence = setup_test_persistence();
    let member = create_actor(&mut persistence, "ana@vine.org", "member", None);

    let err = create_my_profile(
        &mut persistence,
        &member,
        &MemberProfileRequest {
            gender: None,
            ..valid_profile_request("Ana", "Souza")
        },
    )
    .unwrap_err();

    assert_eq!(err.field(), Some("gender"));
    assert!(
        persistence
            .get_member_profile_by_account(&member.account_id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_create_profile_reports_first_missing_field() {
    let mut persistence = setup_test_persistence();
    let member = create_actor(&mut persistence, "ana@vine.org", "member", None);

    let err = create_my_profile(&mut persistence, &member, &MemberProfileRequest::default())
        .unwrap_err();

    assert_eq!(err.field(), Some("first_name"));
}

#[test]
fn test_create_profile_validates_phone_and_birth_date() {
    let mut persistence = setup_test_persistence();
    let member = create_actor(&mut persistence, "ana@vine.org", "member", None);

    let bad_phone = create_my_profile(
        &mut persistence,
        &member,
        &MemberProfileRequest {
            phone: Some(String::from("call me")),
            ..valid_profile_request("Ana", "Souza")
        },
    );
    assert_eq!(bad_phone.unwrap_err().field(), Some("phone"));

    let future_birth = create_my_profile(
        &mut persistence,
        &member,
        &MemberProfileRequest {
            date_of_birth: Some(String::from("2999-12-31")),
            ..valid_profile_request("Ana", "Souza")
        },
    );
    assert_eq!(future_birth.unwrap_err().field(), Some("date_of_birth"));
}

#[test]
fn test_second_profile_for_same_account_conflicts() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");

    let result = create_my_profile(
        &mut persistence,
        &member,
        &valid_profile_request("Ana", "Souza"),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_get_profile_without_one_is_not_found() {
    let mut persistence = setup_test_persistence();
    let member = create_actor(&mut persistence, "ana@vine.org", "member", None);

    assert!(matches!(
        get_my_profile(&mut persistence, &member),
        Err(ApiError::NotFound { .. })
    ));
}

#[test]
fn test_service_actor_has_no_profile() {
    let mut persistence = setup_test_persistence();

    let result = get_my_profile(&mut persistence, &AuthenticatedActor::service());

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_profile_response_includes_children() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");
    create_child(
        &mut persistence,
        &member,
        &MemberChildRequest {
            name: Some(String::from("Lucas")),
            ..MemberChildRequest::default()
        },
    )
    .unwrap();

    let response = get_my_profile(&mut persistence, &member).unwrap();

    assert_eq!(response.children.len(), 1);
    assert_eq!(response.profile.first_name, "Ana");
}

#[test]
fn test_section_save_leaves_other_sections_untouched() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");

    let saved = update_my_profile_section(
        &mut persistence,
        &member,
        &section(
            "spiritual",
            MemberProfileRequest {
                baptized: Some(true),
                baptism_date: Some(String::from("2010-05-02")),
                cell_group: Some(String::from("Célula Centro")),
                ..MemberProfileRequest::default()
            },
        ),
    )
    .unwrap();

    assert!(saved.profile.baptized);
    assert_eq!(saved.profile.cell_group.as_deref(), Some("Célula Centro"));
    assert_eq!(saved.profile.first_name, "Ana");
    assert_eq!(saved.profile.phone, "(519) 123-4567");
    assert_eq!(saved.profile.gender, "female");
    assert_eq!(saved.profile.version, 2);

    let volunteer = update_my_profile_section(
        &mut persistence,
        &member,
        &section(
            "volunteer",
            MemberProfileRequest {
                volunteer_areas: Some(vec![String::from("kids"), String::from("kids")]),
                ..MemberProfileRequest::default()
            },
        ),
    )
    .unwrap();
    assert_eq!(volunteer.profile.volunteer_areas, vec!["kids"]);
    assert!(volunteer.profile.baptized);
}

#[test]
fn test_personal_section_still_requires_gender() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");

    let err = update_my_profile_section(
        &mut persistence,
        &member,
        &section(
            "personal",
            MemberProfileRequest {
                gender: Some(String::from(" ")),
                ..valid_profile_request("Ana", "Lima")
            },
        ),
    )
    .unwrap_err();

    assert_eq!(err.field(), Some("gender"));
    let stored = get_my_profile(&mut persistence, &member).unwrap();
    assert_eq!(stored.profile.last_name, "Souza");
    assert_eq!(stored.profile.version, 1);
}

#[test]
fn test_unknown_section_is_rejected() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");

    let err = update_my_profile_section(
        &mut persistence,
        &member,
        &section("medical", MemberProfileRequest::default()),
    )
    .unwrap_err();

    assert_eq!(err.field(), Some("section"));
}

#[test]
fn test_stale_version_conflicts() {
    let mut persistence = setup_test_persistence();
    let (member, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");
    replace_my_profile(
        &mut persistence,
        &member,
        &MemberProfileRequest {
            expected_version: Some(1),
            ..valid_profile_request("Ana", "Lima")
        },
    )
    .unwrap();

    let stale = replace_my_profile(
        &mut persistence,
        &member,
        &MemberProfileRequest {
            expected_version: Some(1),
            ..valid_profile_request("Ana", "Costa")
        },
    );

    assert!(matches!(stale, Err(ApiError::Conflict { .. })));
    let stored = get_my_profile(&mut persistence, &member).unwrap();
    assert_eq!(stored.profile.last_name, "Lima");
}

#[test]
fn test_spouse_link_is_symmetric_and_idempotent() {
    let mut persistence = setup_test_persistence();
    let (ana, ana_id) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");
    let (joao, joao_id) = member_with_profile(&mut persistence, "joao@vine.org", "Joao");

    let linked = link_my_spouse(&mut persistence, &ana, &link(&joao_id)).unwrap();
    assert_eq!(linked.spouse_id.as_deref(), Some(joao_id.as_str()));
    assert_eq!(linked.spouse_name.as_deref(), Some("Joao Souza"));

    let other_side = get_my_profile(&mut persistence, &joao).unwrap();
    assert_eq!(other_side.profile.spouse_id.as_deref(), Some(ana_id.as_str()));

    assert!(link_my_spouse(&mut persistence, &joao, &link(&ana_id)).is_ok());
}

#[test]
fn test_spouse_link_rejects_self_and_taken_partner() {
    let mut persistence = setup_test_persistence();
    let (ana, ana_id) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");
    let (_, joao_id) = member_with_profile(&mut persistence, "joao@vine.org", "Joao");
    let (maria, _) = member_with_profile(&mut persistence, "maria@vine.org", "Maria");

    let own = link_my_spouse(&mut persistence, &ana, &link(&ana_id)).unwrap_err();
    assert_eq!(own.field(), Some("spouse_profile_id"));

    link_my_spouse(&mut persistence, &ana, &link(&joao_id)).unwrap();
    let taken = link_my_spouse(&mut persistence, &maria, &link(&joao_id));
    assert!(matches!(taken, Err(ApiError::Conflict { .. })));

    let unknown = link_my_spouse(&mut persistence, &maria, &link("no-such-profile"));
    assert!(matches!(unknown, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_unlink_clears_both_sides() {
    let mut persistence = setup_test_persistence();
    let (ana, _) = member_with_profile(&mut persistence, "ana@vine.org", "Ana");
    let (joao, joao_id) = member_with_profile(&mut persistence, "joao@vine.org", "Joao");
    link_my_spouse(&mut persistence, &ana, &link(&joao_id)).unwrap();

    let unlinked = unlink_my_spouse(&mut persistence, &ana).unwrap();

    assert!(unlinked.spouse_id.is_none());
    let other_side = get_my_profile(&mut persistence, &joao).unwrap();
    assert!(other_side.profile.spouse_id.is_none());
    assert!(unlink_my_spouse(&mut persistence, &ana).is_ok());
}
