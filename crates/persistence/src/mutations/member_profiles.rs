// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member profile and spouse link mutations.
//!
//! Section updates write only their own columns, so two sections saved
//! from different screens never overwrite each other.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{
    FamilySection, MemberProfileData, MemberProfileFields, PersonalSection, ProfileChanges,
    SpiritualSection, VolunteerSection,
};
use crate::diesel_schema::{member_profiles, spouse_links};
use crate::error::PersistenceError;
use crate::mutations::{check_version, new_id};
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(AsChangeset)]
#[diesel(table_name = member_profiles, treat_none_as_null = true)]
struct PersonalChangeset<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: Option<&'a str>,
    phone: &'a str,
    date_of_birth: Option<&'a str>,
    gender: &'a str,
    address: Option<&'a str>,
    city: Option<&'a str>,
    postal_code: Option<&'a str>,
    preferred_language: &'a str,
}

impl<'a> From<&'a PersonalSection> for PersonalChangeset<'a> {
    fn from(section: &'a PersonalSection) -> Self {
        Self {
            first_name: &section.first_name,
            last_name: &section.last_name,
            email: section.email.as_deref(),
            phone: &section.phone,
            date_of_birth: section.date_of_birth.as_deref(),
            gender: &section.gender,
            address: section.address.as_deref(),
            city: section.city.as_deref(),
            postal_code: section.postal_code.as_deref(),
            preferred_language: &section.preferred_language,
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = member_profiles, treat_none_as_null = true)]
struct SpiritualChangeset<'a> {
    baptized: i32,
    baptism_date: Option<&'a str>,
    salvation_date: Option<&'a str>,
    membership_date: Option<&'a str>,
    cell_group: Option<&'a str>,
    spiritual_notes: Option<&'a str>,
}

impl<'a> From<&'a SpiritualSection> for SpiritualChangeset<'a> {
    fn from(section: &'a SpiritualSection) -> Self {
        Self {
            baptized: i32::from(section.baptized),
            baptism_date: section.baptism_date.as_deref(),
            salvation_date: section.salvation_date.as_deref(),
            membership_date: section.membership_date.as_deref(),
            cell_group: section.cell_group.as_deref(),
            spiritual_notes: section.spiritual_notes.as_deref(),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = member_profiles, treat_none_as_null = true)]
struct VolunteerChangeset<'a> {
    volunteer_areas: String,
    volunteer_availability: Option<&'a str>,
}

impl<'a> VolunteerChangeset<'a> {
    fn try_from_section(section: &'a VolunteerSection) -> Result<Self, PersistenceError> {
        Ok(Self {
            volunteer_areas: serde_json::to_string(&section.volunteer_areas)?,
            volunteer_availability: section.volunteer_availability.as_deref(),
        })
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = member_profiles, treat_none_as_null = true)]
struct FamilyChangeset<'a> {
    marital_status: Option<&'a str>,
}

impl<'a> From<&'a FamilySection> for FamilyChangeset<'a> {
    fn from(section: &'a FamilySection) -> Self {
        Self {
            marital_status: section.marital_status.as_deref(),
        }
    }
}

/// Creates the profile of an account.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the account already has a
/// profile, or another error if the insert fails.
pub fn create_profile(
    conn: &mut SqliteConnection,
    account_id: &str,
    fields: &MemberProfileFields,
) -> Result<MemberProfileData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::member_profiles::get_profile_by_account(conn, account_id)?.is_some() {
            return Err(PersistenceError::Conflict(format!(
                "Account {account_id} already has a member profile"
            )));
        }

        let profile_id: String = new_id();
        let now: String = now_timestamp()?;

        diesel::insert_into(member_profiles::table)
            .values((
                member_profiles::profile_id.eq(&profile_id),
                member_profiles::account_id.eq(account_id),
                member_profiles::first_name.eq(&fields.personal.first_name),
                member_profiles::last_name.eq(&fields.personal.last_name),
                member_profiles::phone.eq(&fields.personal.phone),
                member_profiles::gender.eq(&fields.personal.gender),
                member_profiles::created_at.eq(&now),
                member_profiles::updated_at.eq(&now),
            ))
            .execute(conn)?;

        apply_sections(conn, &profile_id, fields)?;

        info!(profile_id, account_id, "Member profile created");

        queries::member_profiles::get_profile_by_id(conn, &profile_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Member profile {profile_id}")))
    })
}

fn apply_sections(
    conn: &mut SqliteConnection,
    profile_id: &str,
    fields: &MemberProfileFields,
) -> Result<(), PersistenceError> {
    apply_changes(conn, profile_id, &ProfileChanges::Personal(fields.personal.clone()))?;
    apply_changes(conn, profile_id, &ProfileChanges::Spiritual(fields.spiritual.clone()))?;
    apply_changes(conn, profile_id, &ProfileChanges::Volunteer(fields.volunteer.clone()))?;
    apply_changes(conn, profile_id, &ProfileChanges::Family(fields.family.clone()))
}

fn apply_changes(
    conn: &mut SqliteConnection,
    profile_id: &str,
    changes: &ProfileChanges,
) -> Result<(), PersistenceError> {
    let target = member_profiles::table.filter(member_profiles::profile_id.eq(profile_id));

    match changes {
        ProfileChanges::Personal(section) => {
            diesel::update(target)
                .set(PersonalChangeset::from(section))
                .execute(conn)?;
        }
        ProfileChanges::Spiritual(section) => {
            diesel::update(target)
                .set(SpiritualChangeset::from(section))
                .execute(conn)?;
        }
        ProfileChanges::Volunteer(section) => {
            diesel::update(target)
                .set(VolunteerChangeset::try_from_section(section)?)
                .execute(conn)?;
        }
        ProfileChanges::Family(section) => {
            diesel::update(target)
                .set(FamilyChangeset::from(section))
                .execute(conn)?;
        }
        ProfileChanges::Full(fields) => apply_sections(conn, profile_id, fields)?,
    }

    Ok(())
}

/// Updates a profile.
///
/// When `expected_version` is given and differs from the stored version,
/// nothing is written.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the profile does not exist and
/// `PersistenceError::VersionConflict` on a stale version.
pub fn update_profile(
    conn: &mut SqliteConnection,
    profile_id: &str,
    changes: &ProfileChanges,
    expected_version: Option<i32>,
) -> Result<MemberProfileData, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: i32 = queries::member_profiles::get_profile_version(conn, profile_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Member profile {profile_id}")))?;
        check_version(expected_version, current)?;

        let now: String = now_timestamp()?;
        let claimed: usize = diesel::update(member_profiles::table)
            .filter(member_profiles::profile_id.eq(profile_id))
            .filter(member_profiles::version.eq(current))
            .set((
                member_profiles::version.eq(current + 1),
                member_profiles::updated_at.eq(&now),
            ))
            .execute(conn)?;
        if claimed == 0 {
            return Err(PersistenceError::VersionConflict {
                expected: current,
                actual: current + 1,
            });
        }

        apply_changes(conn, profile_id, changes)?;

        info!(profile_id, version = current + 1, "Member profile updated");

        queries::member_profiles::get_profile_by_id(conn, profile_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Member profile {profile_id}")))
    })
}

/// Links two profiles as spouses in one transaction.
///
/// Linking two profiles that are already linked to each other is a no-op.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if either profile is missing and
/// `PersistenceError::Conflict` if either is linked to someone else or the
/// two ids are the same.
pub fn link_spouse(
    conn: &mut SqliteConnection,
    profile_id: &str,
    spouse_profile_id: &str,
) -> Result<(), PersistenceError> {
    if profile_id == spouse_profile_id {
        return Err(PersistenceError::Conflict(String::from(
            "A profile cannot be linked to itself",
        )));
    }

    conn.transaction::<_, PersistenceError, _>(|conn| {
        for id in [profile_id, spouse_profile_id] {
            if queries::member_profiles::get_profile_version(conn, id)?.is_none() {
                return Err(PersistenceError::NotFound(format!("Member profile {id}")));
            }
        }

        let current_spouse: Option<String> =
            queries::member_profiles::get_spouse_id(conn, profile_id)?;
        if current_spouse.as_deref() == Some(spouse_profile_id) {
            return Ok(());
        }
        if current_spouse.is_some() {
            return Err(PersistenceError::Conflict(format!(
                "Member profile {profile_id} is already linked to a spouse"
            )));
        }
        if queries::member_profiles::get_spouse_id(conn, spouse_profile_id)?.is_some() {
            return Err(PersistenceError::Conflict(format!(
                "Member profile {spouse_profile_id} is already linked to a spouse"
            )));
        }

        let (low, high) = if profile_id < spouse_profile_id {
            (profile_id, spouse_profile_id)
        } else {
            (spouse_profile_id, profile_id)
        };

        let now: String = now_timestamp()?;
        diesel::insert_into(spouse_links::table)
            .values((
                spouse_links::profile_a_id.eq(low),
                spouse_links::profile_b_id.eq(high),
                spouse_links::created_at.eq(&now),
            ))
            .execute(conn)?;

        info!(profile_id, spouse_profile_id, "Spouses linked");
        Ok(())
    })
}

/// Removes the spouse link of a profile, from both sides at once.
///
/// # Returns
///
/// True if a link was removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn unlink_spouse(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(spouse_links::table)
        .filter(
            spouse_links::profile_a_id
                .eq(profile_id)
                .or(spouse_links::profile_b_id.eq(profile_id)),
        )
        .execute(conn)?;

    if deleted > 0 {
        info!(profile_id, "Spouse link removed");
    }
    Ok(deleted > 0)
}
