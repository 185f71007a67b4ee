// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_STAFF_NAME, DomainError, MAX_UPLOAD_BYTES, age_on, parse_date, parse_optional_date,
    resolve_display_name, validate_date_of_birth, validate_day_of_week, validate_email,
    validate_image_upload, validate_phone, validate_required,
};
use time::Date;
use time::macros::date;

const TODAY: Date = date!(2026 - 10 - 18);

#[test]
fn test_validate_phone_accepts_common_formats() {
    for phone in [
        "(519) 123-4567",
        "519-123-4567",
        "5191234567",
        "+1-519-123-4567",
        "519.123.4567",
    ] {
        assert!(validate_phone(phone).is_ok(), "{phone} should be accepted");
    }
}

#[test]
fn test_validate_phone_rejects_too_few_digits() {
    assert!(matches!(
        validate_phone("519-123-456"),
        Err(DomainError::InvalidPhone { .. })
    ));
    assert!(validate_phone("").is_err());
}

#[test]
fn test_validate_phone_rejects_too_many_digits() {
    assert!(validate_phone("+55-519-123-45678").is_err());
    assert!(validate_phone("123456789012").is_err());
}

#[test]
fn test_validate_phone_rejects_letters() {
    assert!(validate_phone("519-CALL-NOW").is_err());
}

#[test]
fn test_date_of_birth_empty_is_unset() {
    assert_eq!(validate_date_of_birth("", TODAY).unwrap(), None);
    assert_eq!(validate_date_of_birth("   ", TODAY).unwrap(), None);
}

#[test]
fn test_date_of_birth_accepts_valid_date() {
    assert_eq!(
        validate_date_of_birth("2018-03-09", TODAY).unwrap(),
        Some(date!(2018 - 03 - 09))
    );
}

#[test]
fn test_date_of_birth_accepts_today() {
    assert_eq!(
        validate_date_of_birth("2026-10-18", TODAY).unwrap(),
        Some(TODAY)
    );
}

#[test]
fn test_date_of_birth_rejects_future() {
    assert!(matches!(
        validate_date_of_birth("2026-10-19", TODAY),
        Err(DomainError::InvalidDateOfBirth { .. })
    ));
}

#[test]
fn test_date_of_birth_rejects_age_over_120() {
    assert!(validate_date_of_birth("1905-10-18", TODAY).is_err());
    assert!(validate_date_of_birth("1906-10-18", TODAY).is_ok());
    assert!(validate_date_of_birth("1906-10-19", TODAY).is_ok());
}

#[test]
fn test_date_of_birth_rejects_garbage() {
    assert!(validate_date_of_birth("18/10/2020", TODAY).is_err());
    assert!(validate_date_of_birth("2020-02-30", TODAY).is_err());
}

#[test]
fn test_age_on_respects_birthday() {
    assert_eq!(age_on(date!(2000 - 10 - 19), TODAY), 25);
    assert_eq!(age_on(date!(2000 - 10 - 18), TODAY), 26);
}

#[test]
fn test_parse_dates() {
    assert_eq!(parse_date("2026-01-04").unwrap(), date!(2026 - 01 - 04));
    assert_eq!(parse_optional_date(Some("")).unwrap(), None);
    assert_eq!(parse_optional_date(None).unwrap(), None);
    assert!(parse_optional_date(Some("not a date")).is_err());
}

#[test]
fn test_validate_required() {
    assert_eq!(validate_required("name", Some(" Ana ")).unwrap(), "Ana");
    assert_eq!(
        validate_required("gender", Some("  ")),
        Err(DomainError::MissingField { field: "gender" })
    );
    assert!(validate_required("gender", None).is_err());
}

#[test]
fn test_validate_email() {
    assert!(validate_email("ana@vine.church").is_ok());
    assert!(validate_email("ana@vine").is_err());
    assert!(validate_email("@vine.church").is_err());
    assert!(validate_email("ana vine@church.org").is_err());
}

#[test]
fn test_validate_day_of_week() {
    assert!(validate_day_of_week(0).is_ok());
    assert!(validate_day_of_week(6).is_ok());
    assert!(validate_day_of_week(7).is_err());
    assert!(validate_day_of_week(-1).is_err());
}

#[test]
fn test_display_name_resolution_order() {
    assert_eq!(
        resolve_display_name(Some("Maria Souza"), Some("Maria"), Some("m@vine.church")),
        "Maria Souza"
    );
    assert_eq!(
        resolve_display_name(None, Some("Maria"), Some("m@vine.church")),
        "Maria"
    );
    assert_eq!(
        resolve_display_name(Some(" "), None, Some("m@vine.church")),
        "m@vine.church"
    );
    assert_eq!(resolve_display_name(None, None, None), DEFAULT_STAFF_NAME);
}

#[test]
fn test_image_upload_rules() {
    assert_eq!(validate_image_upload("image/png", 1024).unwrap(), "png");
    assert_eq!(
        validate_image_upload("image/jpeg; charset=binary", 10).unwrap(),
        "jpg"
    );
    assert!(matches!(
        validate_image_upload("application/pdf", 10),
        Err(DomainError::UnsupportedMediaType { .. })
    ));
    assert!(validate_image_upload("image/png", MAX_UPLOAD_BYTES).is_ok());
    assert!(matches!(
        validate_image_upload("image/png", MAX_UPLOAD_BYTES + 1),
        Err(DomainError::UploadTooLarge { .. })
    ));
}
