// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod check_in_tests;
mod children_tests;
mod profile_tests;

use crate::{
    AccountData, MemberChildFields, MemberProfileData, MemberProfileFields, Persistence,
    PersonalSection, VisitorChildFields,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_account(persistence: &mut Persistence, email: &str, role: &str) -> AccountData {
    persistence
        .create_account(email, "password123", None, role)
        .expect("account")
}

pub fn create_test_profile_fields(first_name: &str, last_name: &str) -> MemberProfileFields {
    MemberProfileFields {
        personal: PersonalSection {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: String::from("519-123-4567"),
            date_of_birth: Some(String::from("1990-05-04")),
            gender: String::from("female"),
            address: None,
            city: Some(String::from("London")),
            postal_code: None,
            preferred_language: String::from("pt"),
        },
        ..MemberProfileFields::default()
    }
}

pub fn create_test_profile(
    persistence: &mut Persistence,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> MemberProfileData {
    let account: AccountData = create_test_account(persistence, email, "member");
    persistence
        .create_member_profile(
            &account.account_id,
            &create_test_profile_fields(first_name, last_name),
        )
        .expect("profile")
}

pub fn create_test_child_fields(name: &str, parent_id: &str) -> MemberChildFields {
    MemberChildFields {
        name: name.to_string(),
        date_of_birth: Some(String::from("2019-03-02")),
        parent1_id: Some(parent_id.to_string()),
        parent2_id: None,
        allergies: Some(String::from("peanuts")),
        special_needs: None,
        photo_permission: true,
    }
}

pub fn create_test_visitor_child_fields(name: &str) -> VisitorChildFields {
    VisitorChildFields {
        name: name.to_string(),
        date_of_birth: None,
        parent_name: String::from("Joana Lima"),
        parent_phone: String::from("(519) 555-0101"),
        parent_email: None,
        allergies: None,
        special_needs: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        photo_permission: false,
    }
}
