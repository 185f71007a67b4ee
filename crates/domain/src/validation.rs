// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Largest accepted image upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Oldest accepted age for a date of birth.
pub const MAX_AGE_YEARS: i32 = 120;

/// Fallback display name when nothing better is known about a staff member.
pub const DEFAULT_STAFF_NAME: &str = "Teacher";

/// Returns the trimmed value of a required field.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is absent or blank.
pub fn validate_required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::MissingField { field }),
    }
}

/// Validates a phone number.
///
/// Accepted characters are digits, spaces, parentheses, dashes, dots and a
/// plus sign. The number must contain 10 or 11 digits, which covers local
/// numbers with area code and the same with a leading country code.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the rules are not met.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let trimmed: &str = phone.trim();

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-' | '+' | '.')))
    {
        return Err(DomainError::InvalidPhone {
            value: phone.to_string(),
            reason: format!("unexpected character '{bad}'"),
        });
    }

    let digits: usize = trimmed.chars().filter(char::is_ascii_digit).count();
    if !(10..=11).contains(&digits) {
        return Err(DomainError::InvalidPhone {
            value: phone.to_string(),
            reason: format!("expected 10 or 11 digits, found {digits}"),
        });
    }

    Ok(())
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an optional date where an empty string means "unset".
///
/// # Errors
///
/// Returns `DomainError::DateParseError` for non-empty invalid dates.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v).map(Some),
    }
}

/// Whole years between `date_of_birth` and `today`.
#[must_use]
pub fn age_on(date_of_birth: Date, today: Date) -> i32 {
    let mut age: i32 = today.year() - date_of_birth.year();
    let birthday_passed: bool = (u8::from(today.month()), today.day())
        >= (u8::from(date_of_birth.month()), date_of_birth.day());
    if !birthday_passed {
        age -= 1;
    }
    age
}

/// Validates a date of birth against `today`.
///
/// An empty string is accepted and means the date is unset.
///
/// # Returns
///
/// The parsed date, or `None` for an empty input.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateOfBirth` if the date cannot be parsed,
/// lies in the future, or gives an age outside 0 to 120.
pub fn validate_date_of_birth(value: &str, today: Date) -> Result<Option<Date>, DomainError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    let date: Date = parse_date(value).map_err(|e| DomainError::InvalidDateOfBirth {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if date > today {
        return Err(DomainError::InvalidDateOfBirth {
            value: value.to_string(),
            reason: String::from("date is in the future"),
        });
    }

    let age: i32 = age_on(date, today);
    if !(0..=MAX_AGE_YEARS).contains(&age) {
        return Err(DomainError::InvalidDateOfBirth {
            value: value.to_string(),
            reason: format!("age {age} is outside 0 to {MAX_AGE_YEARS}"),
        });
    }

    Ok(Some(date))
}

/// Rejects obviously malformed email addresses.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if there is not exactly one `@` with
/// a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();
    let valid: bool = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail(email.to_string()))
    }
}

/// Validates a weekday index where 0 is Sunday.
///
/// # Errors
///
/// Returns `DomainError::InvalidDayOfWeek` outside 0..=6.
pub fn validate_day_of_week(day: i32) -> Result<(), DomainError> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(DomainError::InvalidDayOfWeek(day))
    }
}

/// Resolves the name shown for a staff member on check-in records.
///
/// Order: profile full name, account display name, email, then
/// [`DEFAULT_STAFF_NAME`]. Blank values are skipped.
#[must_use]
pub fn resolve_display_name(
    profile_name: Option<&str>,
    metadata_name: Option<&str>,
    email: Option<&str>,
) -> String {
    [profile_name, metadata_name, email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STAFF_NAME)
        .to_string()
}

/// Validates an image upload and returns the file extension to store it
/// under.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedMediaType` for anything that is not a
/// known image type and `DomainError::UploadTooLarge` above
/// [`MAX_UPLOAD_BYTES`].
pub fn validate_image_upload(content_type: &str, size: usize) -> Result<&'static str, DomainError> {
    let mime: String = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    let extension: &'static str = match mime.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/avif" => "avif",
        _ => {
            return Err(DomainError::UnsupportedMediaType {
                content_type: content_type.to_string(),
            });
        }
    };

    if size > MAX_UPLOAD_BYTES {
        return Err(DomainError::UploadTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(extension)
}
