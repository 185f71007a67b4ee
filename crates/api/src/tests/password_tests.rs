// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, PasswordPolicy, PasswordPolicyError};

#[test]
fn test_valid_password_passes() {
    let policy = PasswordPolicy::default();

    assert!(
        policy
            .validate("vinha2026", Some("vinha2026"), "ana@vine.org")
            .is_ok()
    );
    assert!(policy.validate("vinha2026", None, "ana@vine.org").is_ok());
}

#[test]
fn test_short_password_is_rejected() {
    let policy = PasswordPolicy::default();

    let result = policy.validate("abc123", None, "ana@vine.org");

    assert_eq!(result, Err(PasswordPolicyError::TooShort { min_length: 8 }));
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let policy = PasswordPolicy::default();

    assert_eq!(
        policy.validate("ção1ção", None, "ana@vine.org"),
        Err(PasswordPolicyError::TooShort { min_length: 8 })
    );
    assert!(policy.validate("ção1çãoé", None, "ana@vine.org").is_ok());
}

#[test]
fn test_password_needs_letter_and_digit() {
    let policy = PasswordPolicy::default();

    assert_eq!(
        policy.validate("onlyletters", None, "ana@vine.org"),
        Err(PasswordPolicyError::MissingCharacterClass)
    );
    assert_eq!(
        policy.validate("1234567890", None, "ana@vine.org"),
        Err(PasswordPolicyError::MissingCharacterClass)
    );
}

#[test]
fn test_password_matching_email_is_rejected() {
    let policy = PasswordPolicy::default();

    let result = policy.validate("Ana1@Vine.org", None, "ana1@vine.org");

    assert_eq!(result, Err(PasswordPolicyError::MatchesEmail));
}

#[test]
fn test_confirmation_mismatch_is_checked_first() {
    let policy = PasswordPolicy::default();

    let result = policy.validate("short", Some("other"), "ana@vine.org");

    assert_eq!(result, Err(PasswordPolicyError::ConfirmationMismatch));
}

#[test]
fn test_policy_errors_map_to_field_errors() {
    let mismatch: ApiError = PasswordPolicyError::ConfirmationMismatch.into();
    let short: ApiError = PasswordPolicyError::TooShort { min_length: 8 }.into();

    assert_eq!(mismatch.field(), Some("password_confirmation"));
    assert_eq!(short.field(), Some("password"));
    assert_eq!(short.code(), "validation_error");
}

#[test]
fn test_custom_minimum_length() {
    let policy = PasswordPolicy { min_length: 12 };

    assert!(policy.validate("vinha2026", None, "ana@vine.org").is_err());
    assert!(policy.validate("vinha2026abcd", None, "ana@vine.org").is_ok());
}
