// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations, one module per resource.
//!
//! Versioned tables follow the same compare-and-swap sequence: read the
//! stored version, compare it with the caller's expected version when one
//! is given, then bump the version with an update filtered on the version
//! just read. The whole sequence runs in one transaction.

pub mod accounts;
pub mod check_ins;
pub mod children;
pub mod gallery;
pub mod member_profiles;
pub mod schedule_events;
pub mod sermons;
pub mod sessions;
pub mod visitor_children;
pub mod visitors;
pub mod volunteers;

use crate::error::PersistenceError;

/// Compares a stored version with the caller's expectation.
///
/// # Errors
///
/// Returns `PersistenceError::VersionConflict` when the versions differ.
pub(crate) const fn check_version(
    expected: Option<i32>,
    actual: i32,
) -> Result<(), PersistenceError> {
    match expected {
        Some(expected) if expected != actual => {
            Err(PersistenceError::VersionConflict { expected, actual })
        }
        _ => Ok(()),
    }
}

/// Generates a new row identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
