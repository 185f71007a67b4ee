// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Public representations of stored rows and of write inputs.
//!
//! Row structs used by Diesel stay private to the query and mutation
//! modules. Callers only see the types defined here.

use serde::{Deserialize, Serialize};
use vine_domain::ChildRef;

/// A login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    #[serde(rename = "id")]
    pub account_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: String,
    pub last_sign_in_at: Option<String>,
}

/// A bearer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub account_id: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A member profile with its derived spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberProfileData {
    #[serde(rename = "id")]
    pub profile_id: String,
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub preferred_language: String,
    pub baptized: bool,
    pub baptism_date: Option<String>,
    pub salvation_date: Option<String>,
    pub membership_date: Option<String>,
    pub cell_group: Option<String>,
    pub spiritual_notes: Option<String>,
    pub volunteer_areas: Vec<String>,
    pub volunteer_availability: Option<String>,
    pub marital_status: Option<String>,
    pub spouse_id: Option<String>,
    pub spouse_name: Option<String>,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl MemberProfileData {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Personal section of a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalSection {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub preferred_language: String,
}

/// Spiritual section of a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiritualSection {
    pub baptized: bool,
    pub baptism_date: Option<String>,
    pub salvation_date: Option<String>,
    pub membership_date: Option<String>,
    pub cell_group: Option<String>,
    pub spiritual_notes: Option<String>,
}

/// Volunteer section of a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerSection {
    pub volunteer_areas: Vec<String>,
    pub volunteer_availability: Option<String>,
}

/// Family section of a member profile. The spouse is linked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySection {
    pub marital_status: Option<String>,
}

/// All sections of a member profile, used to create one or replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberProfileFields {
    pub personal: PersonalSection,
    pub spiritual: SpiritualSection,
    pub volunteer: VolunteerSection,
    pub family: FamilySection,
}

/// A profile update. Each variant writes only its own columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChanges {
    Personal(PersonalSection),
    Spiritual(SpiritualSection),
    Volunteer(VolunteerSection),
    Family(FamilySection),
    Full(MemberProfileFields),
}

/// A row of the members directory: every account with its profile, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummaryData {
    #[serde(rename = "id")]
    pub account_id: String,
    pub email: String,
    pub role: String,
    pub display_name: Option<String>,
    pub profile_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
}

/// A child attached to member profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberChildData {
    #[serde(rename = "id")]
    pub child_id: String,
    pub name: String,
    pub date_of_birth: Option<String>,
    pub parent1_id: Option<String>,
    pub parent2_id: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub photo_permission: bool,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl MemberChildData {
    /// Returns true if the profile is one of the child's parents.
    #[must_use]
    pub fn has_parent(&self, profile_id: &str) -> bool {
        self.parent1_id.as_deref() == Some(profile_id)
            || self.parent2_id.as_deref() == Some(profile_id)
    }
}

/// Write input for a member child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChildFields {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub parent1_id: Option<String>,
    pub parent2_id: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub photo_permission: bool,
}

/// A child registered at check-in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorChildData {
    #[serde(rename = "id")]
    pub visitor_child_id: String,
    pub name: String,
    pub date_of_birth: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub photo_permission: bool,
    pub created_by: Option<String>,
    pub created_at: String,
}

/// Write input for a visitor child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorChildFields {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub photo_permission: bool,
}

/// A stored check-in row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInData {
    #[serde(rename = "id")]
    pub check_in_id: String,
    pub member_child_id: Option<String>,
    pub visitor_child_id: Option<String>,
    pub checked_in_by: String,
    pub checked_in_by_name: String,
    pub checked_in_at: String,
    pub status: String,
    pub checked_out_by: Option<String>,
    pub checked_out_by_name: Option<String>,
    pub checked_out_at: Option<String>,
    pub checkin_notes: Option<String>,
    pub checkout_notes: Option<String>,
    pub version: i32,
}

/// A check-in joined with its child and the child's parent contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInRecord {
    #[serde(flatten)]
    pub check_in: CheckInData,
    /// `"member"` or `"visitor"`.
    pub child_type: String,
    pub child_name: Option<String>,
    pub child_date_of_birth: Option<String>,
    pub allergies: Option<String>,
    pub special_needs: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

/// Input for a new check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckIn {
    pub child: ChildRef,
    pub checked_in_by: String,
    pub checked_in_by_name: String,
    pub checkin_notes: Option<String>,
}

/// Input for a check-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOut {
    pub check_in_id: String,
    pub checked_out_by: String,
    pub checked_out_by_name: String,
    pub checkout_notes: Option<String>,
    pub expected_version: Option<i32>,
}

/// Filters for listing check-ins. Dates are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInFilter {
    pub status: Option<String>,
    pub from_date: Option<time::Date>,
    pub to_date: Option<time::Date>,
}

/// A sermon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SermonData {
    #[serde(rename = "id")]
    pub sermon_id: String,
    pub title: String,
    pub speaker: Option<String>,
    pub sermon_date: String,
    pub series: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub language: String,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Write input for a sermon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SermonFields {
    pub title: String,
    pub speaker: Option<String>,
    pub sermon_date: String,
    pub series: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub audio_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub language: String,
}

/// A service schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEventData {
    #[serde(rename = "id")]
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub day_of_week: Option<i32>,
    pub event_date: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub language: String,
    pub is_recurring: bool,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Write input for a schedule event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleEventFields {
    pub title: String,
    pub description: Option<String>,
    pub day_of_week: Option<i32>,
    pub event_date: Option<String>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub language: String,
    pub is_recurring: bool,
}

/// A kids gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryImageData {
    #[serde(rename = "id")]
    pub image_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub display_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Write input for a gallery image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryImageFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub display_order: i32,
}

/// A visitor registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorData {
    #[serde(rename = "id")]
    pub visitor_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub visit_date: Option<String>,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
    pub wants_contact: bool,
    pub followed_up: bool,
    pub created_at: String,
}

/// Write input for a visitor registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorFields {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub visit_date: Option<String>,
    pub how_heard: Option<String>,
    pub prayer_request: Option<String>,
    pub wants_contact: bool,
    pub followed_up: bool,
}

/// A volunteer sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerData {
    #[serde(rename = "id")]
    pub volunteer_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub areas: Vec<String>,
    pub availability: Option<String>,
    pub message: Option<String>,
    pub contacted: bool,
    pub created_at: String,
}

/// Write input for a volunteer sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerFields {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub areas: Vec<String>,
    pub availability: Option<String>,
    pub message: Option<String>,
    pub contacted: bool,
}

/// Search and pagination for report listings. Pages start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub search: Option<String>,
    pub page: i64,
    pub per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            per_page: 50,
        }
    }
}

impl PageRequest {
    /// Rows to skip for this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Page size, at least one.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.per_page.max(1)
    }

    /// `LIKE` pattern for the search term, if any.
    #[must_use]
    pub fn like_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"))
    }
}

/// One page of results with the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
