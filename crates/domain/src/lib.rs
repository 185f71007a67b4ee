// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod check_in;
mod error;
mod permissions;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use check_in::{CheckInStatus, ChildRef};
pub use error::DomainError;
pub use permissions::{Permissions, role_to_permissions};
pub use types::{Language, ProfileSection, Role};
pub use validation::{
    DEFAULT_STAFF_NAME, MAX_AGE_YEARS, MAX_UPLOAD_BYTES, age_on, parse_date, parse_optional_date,
    resolve_display_name, validate_date_of_birth, validate_day_of_week, validate_email,
    validate_image_upload, validate_phone, validate_required,
};
