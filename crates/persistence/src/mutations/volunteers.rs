// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Volunteer sign-up mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::{VolunteerData, VolunteerFields};
use crate::diesel_schema::volunteers;
use crate::error::PersistenceError;
use crate::mutations::new_id;
use crate::queries;
use crate::timestamps::now_timestamp;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = volunteers, treat_none_as_null = true)]
struct VolunteerChangeset<'a> {
    full_name: &'a str,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    areas: String,
    availability: Option<&'a str>,
    message: Option<&'a str>,
    contacted: i32,
}

impl<'a> VolunteerChangeset<'a> {
    fn try_from_fields(fields: &'a VolunteerFields) -> Result<Self, PersistenceError> {
        Ok(Self {
            full_name: &fields.full_name,
            email: fields.email.as_deref(),
            phone: fields.phone.as_deref(),
            areas: serde_json::to_string(&fields.areas)?,
            availability: fields.availability.as_deref(),
            message: fields.message.as_deref(),
            contacted: i32::from(fields.contacted),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = volunteers)]
struct NewVolunteerRow<'a> {
    volunteer_id: &'a str,
    #[diesel(embed)]
    fields: VolunteerChangeset<'a>,
    created_at: &'a str,
}

/// Stores a volunteer sign-up.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_volunteer(
    conn: &mut SqliteConnection,
    fields: &VolunteerFields,
) -> Result<VolunteerData, PersistenceError> {
    let volunteer_id: String = new_id();
    let now: String = now_timestamp()?;

    diesel::insert_into(volunteers::table)
        .values(NewVolunteerRow {
            volunteer_id: &volunteer_id,
            fields: VolunteerChangeset::try_from_fields(fields)?,
            created_at: &now,
        })
        .execute(conn)?;

    info!(volunteer_id, "Volunteer signed up");

    queries::volunteers::get_volunteer(conn, &volunteer_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Volunteer {volunteer_id}")))
}

/// Replaces a volunteer sign-up.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the volunteer does not exist.
pub fn update_volunteer(
    conn: &mut SqliteConnection,
    volunteer_id: &str,
    fields: &VolunteerFields,
) -> Result<VolunteerData, PersistenceError> {
    let rows_affected: usize = diesel::update(volunteers::table)
        .filter(volunteers::volunteer_id.eq(volunteer_id))
        .set(VolunteerChangeset::try_from_fields(fields)?)
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Volunteer with ID {volunteer_id} not found"
        )));
    }

    queries::volunteers::get_volunteer(conn, volunteer_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Volunteer {volunteer_id}")))
}

/// Deletes a volunteer sign-up.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the volunteer does not exist.
pub fn delete_volunteer(
    conn: &mut SqliteConnection,
    volunteer_id: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(volunteers::table)
        .filter(volunteers::volunteer_id.eq(volunteer_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Volunteer with ID {volunteer_id} not found"
        )));
    }

    info!("Deleted volunteer: {}", volunteer_id);
    Ok(())
}
