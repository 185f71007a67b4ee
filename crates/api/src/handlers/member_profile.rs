// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member profile self-service handlers.
//!
//! A caller only ever reads or writes their own profile. Sections can be
//! saved independently, and the spouse relationship is a separate link.

use std::str::FromStr;
use time::Date;
use tracing::info;
use vine_domain::{DomainError, ProfileSection, validate_date_of_birth, validate_phone};
use vine_persistence::{
    FamilySection, MemberChildData, MemberProfileData, MemberProfileFields, Persistence,
    PersonalSection, ProfileChanges, SpiritualSection, VolunteerSection,
};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{
    clean_list, language_or_default, optional_date, optional_email, optional_text, required_text,
    today,
};
use crate::request_response::{
    MemberProfileRequest, MemberProfileResponse, ProfileSectionRequest, SpouseLinkRequest,
};

/// Profiles belong to accounts; the service actor has none.
fn require_member_account(actor: &AuthenticatedActor, action: &str) -> Result<(), ApiError> {
    AuthorizationService::require_profile_access(actor, action)?;
    if actor.is_service {
        return Err(ApiError::forbidden(action, "a member account"));
    }
    Ok(())
}

fn own_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<MemberProfileData, ApiError> {
    persistence
        .get_member_profile_by_account(&actor.account_id)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?
        .ok_or_else(|| ApiError::NotFound {
            resource: String::from("Member profile"),
            message: String::from("No profile exists for this account"),
        })
}

fn with_children(
    persistence: &mut Persistence,
    profile: MemberProfileData,
) -> Result<MemberProfileResponse, ApiError> {
    let children: Vec<MemberChildData> = persistence
        .list_children_for_parent(&profile.profile_id)
        .map_err(|e| translate_persistence_error(e, "Child"))?;
    Ok(MemberProfileResponse { profile, children })
}

/// Validates the personal section.
///
/// `first_name`, `last_name`, `gender` and `phone` are required, in that
/// order. Phone and date of birth are format-checked.
pub(crate) fn build_personal(
    request: &MemberProfileRequest,
    today: Date,
) -> Result<PersonalSection, ApiError> {
    let first_name: String = required_text("first_name", request.first_name.as_deref())?;
    let last_name: String = required_text("last_name", request.last_name.as_deref())?;
    let gender: String = required_text("gender", request.gender.as_deref())?;
    let phone: String = required_text("phone", request.phone.as_deref())?;
    validate_phone(&phone)?;

    let date_of_birth: Option<String> = match request.date_of_birth.as_deref() {
        Some(value) => validate_date_of_birth(value, today)?.map(|_| value.trim().to_string()),
        None => None,
    };

    Ok(PersonalSection {
        first_name,
        last_name,
        email: optional_email("email", request.email.as_deref())?,
        phone,
        date_of_birth,
        gender,
        address: optional_text(request.address.as_deref()),
        city: optional_text(request.city.as_deref()),
        postal_code: optional_text(request.postal_code.as_deref()),
        preferred_language: language_or_default(request.preferred_language.as_deref())?,
    })
}

fn build_spiritual(request: &MemberProfileRequest) -> Result<SpiritualSection, ApiError> {
    Ok(SpiritualSection {
        baptized: request.baptized.unwrap_or(false),
        baptism_date: optional_date("baptism_date", request.baptism_date.as_deref())?,
        salvation_date: optional_date("salvation_date", request.salvation_date.as_deref())?,
        membership_date: optional_date("membership_date", request.membership_date.as_deref())?,
        cell_group: optional_text(request.cell_group.as_deref()),
        spiritual_notes: optional_text(request.spiritual_notes.as_deref()),
    })
}

fn build_volunteer(request: &MemberProfileRequest) -> VolunteerSection {
    VolunteerSection {
        volunteer_areas: clean_list(request.volunteer_areas.as_deref()),
        volunteer_availability: optional_text(request.volunteer_availability.as_deref()),
    }
}

fn build_family(request: &MemberProfileRequest) -> FamilySection {
    FamilySection {
        marital_status: optional_text(request.marital_status.as_deref()),
    }
}

fn build_full(request: &MemberProfileRequest) -> Result<MemberProfileFields, ApiError> {
    Ok(MemberProfileFields {
        personal: build_personal(request, today())?,
        spiritual: build_spiritual(request)?,
        volunteer: build_volunteer(request),
        family: build_family(request),
    })
}

/// Returns the caller's profile with derived spouse and their children.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the caller has no profile.
pub fn get_my_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<MemberProfileResponse, ApiError> {
    require_member_account(actor, "get_member_profile")?;
    let profile: MemberProfileData = own_profile(persistence, actor)?;
    with_children(persistence, profile)
}

/// Creates the caller's profile.
///
/// Validation happens before any write, so a rejected request leaves no row.
///
/// # Errors
///
/// Returns a validation error naming the first bad field and
/// `ApiError::Conflict` if the caller already has a profile.
pub fn create_my_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &MemberProfileRequest,
) -> Result<MemberProfileResponse, ApiError> {
    require_member_account(actor, "create_member_profile")?;
    let fields: MemberProfileFields = build_full(request)?;

    let profile: MemberProfileData = persistence
        .create_member_profile(&actor.account_id, &fields)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?;

    info!(profile_id = %profile.profile_id, account_id = %actor.account_id, "Member profile created");
    with_children(persistence, profile)
}

/// Replaces every section of the caller's profile.
///
/// # Errors
///
/// Returns a validation error for bad fields, `ApiError::NotFound` without a
/// profile and `ApiError::Conflict` on a stale `expected_version`.
pub fn replace_my_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &MemberProfileRequest,
) -> Result<MemberProfileResponse, ApiError> {
    require_member_account(actor, "replace_member_profile")?;
    let fields: MemberProfileFields = build_full(request)?;
    let current: MemberProfileData = own_profile(persistence, actor)?;

    let profile: MemberProfileData = persistence
        .update_member_profile(
            &current.profile_id,
            &ProfileChanges::Full(fields),
            request.expected_version,
        )
        .map_err(|e| translate_persistence_error(e, "Member profile"))?;

    with_children(persistence, profile)
}

/// Saves one section of the caller's profile. Other sections are untouched.
///
/// # Errors
///
/// Returns a validation error for an unknown section or bad fields,
/// `ApiError::NotFound` without a profile and `ApiError::Conflict` on a
/// stale `expected_version`.
pub fn update_my_profile_section(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ProfileSectionRequest,
) -> Result<MemberProfileResponse, ApiError> {
    require_member_account(actor, "update_member_profile_section")?;

    let section: ProfileSection = ProfileSection::from_str(request.section.trim())?;
    let fields: &MemberProfileRequest = &request.fields;
    let changes: ProfileChanges = match section {
        ProfileSection::Personal => ProfileChanges::Personal(build_personal(fields, today())?),
        ProfileSection::Spiritual => ProfileChanges::Spiritual(build_spiritual(fields)?),
        ProfileSection::Volunteer => ProfileChanges::Volunteer(build_volunteer(fields)),
        ProfileSection::Family => ProfileChanges::Family(build_family(fields)),
    };

    let current: MemberProfileData = own_profile(persistence, actor)?;
    let expected_version: Option<i32> = request.expected_version.or(fields.expected_version);

    let profile: MemberProfileData = persistence
        .update_member_profile(&current.profile_id, &changes, expected_version)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?;

    info!(
        profile_id = %profile.profile_id,
        section = section.as_str(),
        version = profile.version,
        "Member profile section saved"
    );
    with_children(persistence, profile)
}

/// Links the caller's profile to a spouse's profile.
///
/// Both sides see the link immediately. Relinking the same pair is a no-op.
///
/// # Errors
///
/// Returns a validation error when linking to oneself,
/// `ApiError::NotFound` for an unknown spouse profile and
/// `ApiError::Conflict` if either profile is linked to someone else.
pub fn link_my_spouse(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &SpouseLinkRequest,
) -> Result<MemberProfileData, ApiError> {
    require_member_account(actor, "link_spouse")?;
    let spouse_profile_id: String =
        required_text("spouse_profile_id", request.spouse_profile_id.as_deref())?;
    let current: MemberProfileData = own_profile(persistence, actor)?;

    if current.profile_id == spouse_profile_id {
        return Err(DomainError::SelfSpouseLink.into());
    }

    persistence
        .link_spouse(&current.profile_id, &spouse_profile_id)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?;

    info!(profile_id = %current.profile_id, spouse_profile_id, "Spouse linked");
    own_profile(persistence, actor)
}

/// Removes the caller's spouse link, if any.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the caller has no profile.
pub fn unlink_my_spouse(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<MemberProfileData, ApiError> {
    require_member_account(actor, "unlink_spouse")?;
    let current: MemberProfileData = own_profile(persistence, actor)?;

    let removed: bool = persistence
        .unlink_spouse(&current.profile_id)
        .map_err(|e| translate_persistence_error(e, "Member profile"))?;
    if removed {
        info!(profile_id = %current.profile_id, "Spouse unlinked");
    }

    own_profile(persistence, actor)
}
