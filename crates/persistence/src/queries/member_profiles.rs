// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member profile and spouse link queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::MemberProfileData;
use crate::diesel_schema::{member_profiles, spouse_links};
use crate::error::PersistenceError;

/// Diesel Queryable struct for member profile rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = member_profiles)]
struct ProfileRow {
    profile_id: String,
    account_id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: String,
    date_of_birth: Option<String>,
    gender: String,
    address: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    preferred_language: String,
    baptized: i32,
    baptism_date: Option<String>,
    salvation_date: Option<String>,
    membership_date: Option<String>,
    cell_group: Option<String>,
    spiritual_notes: Option<String>,
    volunteer_areas: String,
    volunteer_availability: Option<String>,
    marital_status: Option<String>,
    version: i32,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn into_data(
        self,
        spouse: Option<(String, String)>,
    ) -> Result<MemberProfileData, PersistenceError> {
        let volunteer_areas: Vec<String> = serde_json::from_str(&self.volunteer_areas)?;
        let (spouse_id, spouse_name) = spouse.unzip();

        Ok(MemberProfileData {
            profile_id: self.profile_id,
            account_id: self.account_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            preferred_language: self.preferred_language,
            baptized: self.baptized != 0,
            baptism_date: self.baptism_date,
            salvation_date: self.salvation_date,
            membership_date: self.membership_date,
            cell_group: self.cell_group,
            spiritual_notes: self.spiritual_notes,
            volunteer_areas,
            volunteer_availability: self.volunteer_availability,
            marital_status: self.marital_status,
            spouse_id,
            spouse_name,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Returns the profile id linked as spouse of `profile_id`, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_spouse_id(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Option<String>, PersistenceError> {
    let link: Option<(String, String)> = spouse_links::table
        .filter(
            spouse_links::profile_a_id
                .eq(profile_id)
                .or(spouse_links::profile_b_id.eq(profile_id)),
        )
        .select((spouse_links::profile_a_id, spouse_links::profile_b_id))
        .first(conn)
        .optional()?;

    Ok(link.map(|(a, b)| if a == profile_id { b } else { a }))
}

/// Resolves the spouse id and display name for a profile.
fn resolve_spouse(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Option<(String, String)>, PersistenceError> {
    let Some(spouse_id) = get_spouse_id(conn, profile_id)? else {
        return Ok(None);
    };

    let names: Option<(String, String)> = member_profiles::table
        .filter(member_profiles::profile_id.eq(&spouse_id))
        .select((member_profiles::first_name, member_profiles::last_name))
        .first(conn)
        .optional()?;

    Ok(names.map(|(first, last)| {
        let name: String = format!("{first} {last}").trim().to_string();
        (spouse_id, name)
    }))
}

/// Retrieves the profile owned by an account.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account has no profile.
pub fn get_profile_by_account(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<Option<MemberProfileData>, PersistenceError> {
    debug!("Looking up member profile for account: {}", account_id);

    let row: Option<ProfileRow> = member_profiles::table
        .filter(member_profiles::account_id.eq(account_id))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let spouse = resolve_spouse(conn, &row.profile_id)?;
            row.into_data(spouse).map(Some)
        }
        None => Ok(None),
    }
}

/// Retrieves a profile by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the profile is not found.
pub fn get_profile_by_id(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Option<MemberProfileData>, PersistenceError> {
    debug!("Looking up member profile by ID: {}", profile_id);

    let row: Option<ProfileRow> = member_profiles::table
        .filter(member_profiles::profile_id.eq(profile_id))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let spouse = resolve_spouse(conn, &row.profile_id)?;
            row.into_data(spouse).map(Some)
        }
        None => Ok(None),
    }
}

/// Returns the current version of a profile.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_profile_version(
    conn: &mut SqliteConnection,
    profile_id: &str,
) -> Result<Option<i32>, PersistenceError> {
    Ok(member_profiles::table
        .filter(member_profiles::profile_id.eq(profile_id))
        .select(member_profiles::version)
        .first(conn)
        .optional()?)
}

/// Returns `(full name, phone)` for each of the given profiles.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_contacts_for_profiles(
    conn: &mut SqliteConnection,
    profile_ids: &[String],
) -> Result<HashMap<String, (String, String)>, PersistenceError> {
    if profile_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(String, String, String, String)> = member_profiles::table
        .filter(member_profiles::profile_id.eq_any(profile_ids))
        .select((
            member_profiles::profile_id,
            member_profiles::first_name,
            member_profiles::last_name,
            member_profiles::phone,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, first, last, phone)| {
            let name: String = format!("{first} {last}").trim().to_string();
            (id, (name, phone))
        })
        .collect())
}
