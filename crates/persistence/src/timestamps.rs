// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp formatting shared by every table.
//!
//! Timestamps are stored as RFC 3339 UTC strings with whole seconds, so
//! lexical order matches chronological order.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::error::PersistenceError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats an instant as a stored timestamp.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(instant
        .to_offset(time::UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)?)
}

/// The current time as a stored timestamp.
///
/// # Errors
///
/// Returns an error if the clock value cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// The stored timestamp `hours` from now.
///
/// # Errors
///
/// Returns an error if the value cannot be formatted.
pub fn timestamp_in_hours(hours: i64) -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc() + Duration::hours(hours))
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(DATE_FORMAT)?)
}
