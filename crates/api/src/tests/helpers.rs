// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use vine_persistence::Persistence;

use crate::{AuthenticatedActor, MemberProfileRequest};

pub const TEST_PASSWORD: &str = "password123";

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates an account with the given role and returns its actor.
pub fn create_actor(
    persistence: &mut Persistence,
    email: &str,
    role: &str,
    display_name: Option<&str>,
) -> AuthenticatedActor {
    let account = persistence
        .create_account(email, TEST_PASSWORD, display_name, role)
        .expect("Failed to create account");
    AuthenticatedActor::from_account(&account)
}

pub fn valid_profile_request(first_name: &str, last_name: &str) -> MemberProfileRequest {
    MemberProfileRequest {
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        phone: Some(String::from("(519) 123-4567")),
        gender: Some(String::from("female")),
        date_of_birth: Some(String::from("1988-03-14")),
        preferred_language: Some(String::from("pt")),
        ..MemberProfileRequest::default()
    }
}
