// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one module per resource.
//!
//! Handlers are synchronous functions over [`vine_persistence::Persistence`].
//! Each one performs its own authorization check, validates the request and
//! translates lower-layer errors into [`crate::ApiError`].

pub mod auth;
pub mod check_ins;
pub mod children;
pub mod gallery;
pub mod member_profile;
pub mod members;
pub mod schedule_events;
pub mod sermons;
pub mod visitor_children;
pub mod visitors;
pub mod volunteers;

use std::str::FromStr;
use time::{Date, OffsetDateTime};
use vine_domain::{
    Language, parse_date, parse_optional_date, validate_email, validate_phone, validate_required,
};
use vine_persistence::PageRequest;

use crate::error::ApiError;
use crate::request_response::PageQuery;

/// Largest page a report listing returns.
const MAX_PER_PAGE: i64 = 100;

/// Highest page number accepted.
const MAX_PAGE: i64 = 1_000_000;

/// Today's date on the server clock (UTC).
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Trims a free-text field. Blank values become `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Returns the trimmed value of a required field.
pub(crate) fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ApiError> {
    Ok(validate_required(field, value)?.to_string())
}

/// Validates a language code, defaulting to Portuguese.
pub(crate) fn language_or_default(value: Option<&str>) -> Result<String, ApiError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(String::from(Language::default().as_str())),
        Some(v) => Ok(String::from(Language::from_str(v)?.as_str())),
    }
}

/// Validates an optional language filter.
pub(crate) fn language_filter(value: Option<&str>) -> Result<Option<String>, ApiError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|v| Ok(String::from(Language::from_str(v)?.as_str())))
        .transpose()
}

/// Validates a required `YYYY-MM-DD` date and returns it normalized.
pub(crate) fn required_date(field: &'static str, value: Option<&str>) -> Result<String, ApiError> {
    let raw: String = required_text(field, value)?;
    parse_date(&raw).map_err(|e| ApiError::validation(field, e.to_string()))?;
    Ok(raw)
}

/// Validates an optional `YYYY-MM-DD` date. Blank means unset.
pub(crate) fn optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, ApiError> {
    parse_optional_date(value).map_err(|e| ApiError::validation(field, e.to_string()))?;
    Ok(optional_text(value))
}

/// Validates an optional phone number. Blank means unset.
pub(crate) fn optional_phone(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, ApiError> {
    let phone: Option<String> = optional_text(value);
    if let Some(p) = &phone {
        validate_phone(p).map_err(|e| ApiError::validation(field, e.to_string()))?;
    }
    Ok(phone)
}

/// Validates an optional email address. Blank means unset.
pub(crate) fn optional_email(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, ApiError> {
    let email: Option<String> = optional_text(value);
    if let Some(e) = &email {
        validate_email(e).map_err(|err| ApiError::validation(field, err.to_string()))?;
    }
    Ok(email)
}

/// Trims list entries and drops blanks and duplicates, keeping order.
pub(crate) fn clean_list(values: Option<&[String]>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for value in values.unwrap_or_default() {
        let trimmed: &str = value.trim();
        if !trimmed.is_empty() && !cleaned.iter().any(|v| v == trimmed) {
            cleaned.push(trimmed.to_string());
        }
    }
    cleaned
}

/// Converts query parameters into a bounded page request.
pub(crate) fn page_request(query: &PageQuery) -> PageRequest {
    let defaults: PageRequest = PageRequest::default();
    PageRequest {
        search: optional_text(query.search.as_deref()),
        page: query.page.unwrap_or(defaults.page).clamp(1, MAX_PAGE),
        per_page: query
            .per_page
            .unwrap_or(defaults.per_page)
            .clamp(1, MAX_PER_PAGE),
    }
}
