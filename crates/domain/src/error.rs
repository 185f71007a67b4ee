// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or blank.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// A phone number did not satisfy the formatting rules.
    InvalidPhone {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A date of birth was malformed, in the future, or out of range.
    InvalidDateOfBirth {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A date string could not be parsed.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// An email address is obviously malformed.
    InvalidEmail(String),
    /// A check-in referenced no child, or both child kinds at once.
    InvalidChildReference {
        /// Description of the violation.
        reason: &'static str,
    },
    /// An unknown check-in status string.
    InvalidCheckInStatus {
        /// The rejected status.
        status: String,
    },
    /// A check-in status transition that is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// An unknown role string where a concrete role is required.
    InvalidRole(String),
    /// An unknown language code.
    InvalidLanguage(String),
    /// An unknown member profile section.
    InvalidProfileSection(String),
    /// A day of week outside 0..=6.
    InvalidDayOfWeek(i32),
    /// An upload that is not an accepted image type.
    UnsupportedMediaType {
        /// The declared content type.
        content_type: String,
    },
    /// An upload that exceeds the size limit.
    UploadTooLarge {
        /// The size of the rejected upload in bytes.
        size: usize,
        /// The limit in bytes.
        limit: usize,
    },
    /// A member tried to link themselves as their own spouse.
    SelfSpouseLink,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Field '{field}' is required"),
            Self::InvalidPhone { value, reason } => {
                write!(f, "Invalid phone number '{value}': {reason}")
            }
            Self::InvalidDateOfBirth { value, reason } => {
                write!(f, "Invalid date of birth '{value}': {reason}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidEmail(value) => write!(f, "Invalid email address '{value}'"),
            Self::InvalidChildReference { reason } => {
                write!(f, "Invalid child reference: {reason}")
            }
            Self::InvalidCheckInStatus { status } => {
                write!(
                    f,
                    "Invalid check-in status '{status}'. Must be 'checked_in' or 'checked_out'"
                )
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot transition check-in from '{from}' to '{to}'")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role '{role}'"),
            Self::InvalidLanguage(lang) => {
                write!(f, "Invalid language '{lang}'. Must be 'pt' or 'en'")
            }
            Self::InvalidProfileSection(section) => {
                write!(f, "Invalid profile section '{section}'")
            }
            Self::InvalidDayOfWeek(day) => {
                write!(f, "Invalid day of week {day}. Must be between 0 and 6")
            }
            Self::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type '{content_type}': only images are accepted")
            }
            Self::UploadTooLarge { size, limit } => {
                write!(f, "Upload of {size} bytes exceeds the {limit} byte limit")
            }
            Self::SelfSpouseLink => write!(f, "A member cannot be linked as their own spouse"),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns the request field this error is about, when there is one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } => Some(field),
            Self::InvalidPhone { .. } => Some("phone"),
            Self::InvalidDateOfBirth { .. } => Some("date_of_birth"),
            Self::InvalidEmail(_) => Some("email"),
            Self::InvalidChildReference { .. } => Some("member_child_id"),
            Self::InvalidCheckInStatus { .. } => Some("status"),
            Self::InvalidRole(_) => Some("role"),
            Self::InvalidLanguage(_) => Some("language"),
            Self::InvalidProfileSection(_) => Some("section"),
            Self::InvalidDayOfWeek(_) => Some("day_of_week"),
            Self::SelfSpouseLink => Some("spouse_profile_id"),
            Self::DateParseError { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::UnsupportedMediaType { .. }
            | Self::UploadTooLarge { .. } => None,
        }
    }
}
