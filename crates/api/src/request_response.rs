// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request types accept every field as optional so that missing fields are
//! reported as `validation_error` naming the field, rather than as a
//! deserialization failure.

use serde::{Deserialize, Serialize};
use vine_domain::Permissions;
use vine_persistence::{AccountData, MemberChildData, MemberProfileData};

// ============================================================================
// Authentication
// ============================================================================

/// API request to create an account (sign-up or first-admin bootstrap).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Checked against `password` when present.
    pub password_confirmation: Option<String>,
    /// Stored as the account display name.
    pub display_name: Option<String>,
}

/// API request to sign in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public account information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "id")]
    pub account_id: String,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
}

impl From<&AccountData> for AccountInfo {
    fn from(account: &AccountData) -> Self {
        Self {
            account_id: account.account_id.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
            display_name: account.display_name.clone(),
        }
    }
}

/// API response for a successful sign-in, sign-up or bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    /// The bearer token for subsequent requests.
    pub session_token: String,
    /// When the token expires.
    pub expires_at: String,
    pub account: AccountInfo,
    pub permissions: Permissions,
}

/// API response describing the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfoResponse {
    pub account: AccountInfo,
    pub permissions: Permissions,
    /// True when the caller used the service-role key.
    pub is_service: bool,
}

/// API response for the bootstrap status probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapStatusResponse {
    /// True while no account exists.
    pub is_bootstrap_mode: bool,
}

// ============================================================================
// Check-ins
// ============================================================================

/// API request to check a child in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateCheckInRequest {
    pub member_child_id: Option<String>,
    pub visitor_child_id: Option<String>,
    pub checkin_notes: Option<String>,
}

/// API request to check a child out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckOutRequest {
    /// The check-in row id.
    #[serde(alias = "check_in_id")]
    pub id: Option<String>,
    pub checkout_notes: Option<String>,
    pub expected_version: Option<i32>,
}

/// Query parameters for listing check-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListCheckInsQuery {
    /// `checked_in` or `checked_out`.
    pub status: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub from_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub to_date: Option<String>,
}

// ============================================================================
// Member profiles
// ============================================================================

/// Profile fields as sent by the profile form.
///
/// Used for full create/replace and, deserialized from the `fields` object,
/// for single-section updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub preferred_language: Option<String>,
    pub baptized: Option<bool>,
    pub baptism_date: Option<String>,
    pub salvation_date: Option<String>,
    pub membership_date: Option<String>,
    pub cell_group: Option<String>,
    pub spiritual_notes: Option<String>,
    pub volunteer_areas: Option<Vec<String>>,
    pub volunteer_availability: Option<String>,
    pub marital_status: Option<String>,
    /// Compare-and-swap guard for replacements.
    pub expected_version: Option<i32>,
}

/// API request to update one profile section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileSectionRequest {
    /// `personal`, `spiritual`, `volunteer` or `family`.
    pub section: String,
    /// The section's fields.
    #[serde(default)]
    pub fields: MemberProfileRequest,
    pub expected_version: Option<i32>,
}

/// API request to link a spouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpouseLinkRequest {
    pub spouse_profile_id: Option<String>,
}

/// The caller's profile together with their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberProfileResponse {
    #[serde(flatten)]
    pub profile: MemberProfileData,
    pub children: Vec<MemberChildData>,
}

/// API request to change an account's role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SetRoleRequest {
    pub role: Option<String>,
}

// ============================================================================
// Children
// ============================================================================

/// API request to create or update a member child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberChildRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    /// Defaults to the caller's profile on create.
    pub parent1_id: Option<String>,
    pub parent2_id: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub photo_permission: Option<bool>,
    pub expected_version: Option<i32>,
}

/// Query parameters for listing children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListChildrenQuery {
    /// Staff only: list every child instead of the caller's own.
    pub all: Option<bool>,
    pub search: Option<String>,
}

/// API request to register a visitor child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VisitorChildRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub photo_permission: Option<bool>,
}

/// Query parameters with only a search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

// ============================================================================
// Public content
// ============================================================================

/// Query parameters for language-filtered listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

/// Where a content listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Read from the database.
    Database,
    /// The database failed; bundled fallback content was served.
    Static,
}

impl DataSource {
    /// The wire name of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Static => "static",
        }
    }
}

/// A content listing with its data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentList<T> {
    pub items: Vec<T>,
    pub source: DataSource,
}

/// API request to create or update a sermon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SermonRequest {
    pub title: Option<String>,
    pub speaker: Option<String>,
    pub sermon_date: Option<String>,
    pub series: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub language: Option<String>,
    pub expected_version: Option<i32>,
}

/// API request to create or update a schedule event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// 0 is Sunday.
    pub day_of_week: Option<i32>,
    pub event_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub is_recurring: Option<bool>,
    pub expected_version: Option<i32>,
}

/// API request to create or update a gallery image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GalleryImageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
}

/// An image upload as received by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// The declared `Content-Type`.
    pub content_type: String,
    /// Size of the body in bytes.
    pub size: usize,
}

/// API response for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The stored file name.
    pub file_name: String,
    /// The public URL to reference from a gallery image.
    pub image_url: String,
}

// ============================================================================
// Visitors and volunteers
// ============================================================================

/// Query parameters for paginated reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// API request for the visitor registration form and visitor edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VisitorRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub visit_date: Option<String>,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
    pub wants_contact: Option<bool>,
    pub followed_up: Option<bool>,
}

/// API request for the volunteer sign-up form and volunteer edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VolunteerRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub areas: Option<Vec<String>>,
    pub availability: Option<String>,
    pub message: Option<String>,
    pub contacted: Option<bool>,
}
