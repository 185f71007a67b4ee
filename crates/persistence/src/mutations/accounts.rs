// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::data_models::AccountData;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;
use crate::mutations::new_id;
use crate::queries;
use crate::timestamps::now_timestamp;

/// Creates a new account.
///
/// The email is normalized to lower case for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The login email (will be normalized)
/// * `password` - The plain-text password (will be hashed)
/// * `display_name` - Optional display name
/// * `role` - The stored role string
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email already exists,
/// or another error if the account cannot be created.
pub fn create_account(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    display_name: Option<&str>,
    role: &str,
) -> Result<AccountData, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    info!(email = %normalized_email, role, "Creating account");

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    let account_id: String = new_id();
    let created_at: String = now_timestamp()?;

    diesel::insert_into(accounts::table)
        .values((
            accounts::account_id.eq(&account_id),
            accounts::email.eq(&normalized_email),
            accounts::password_hash.eq(&password_hash),
            accounts::display_name.eq(display_name),
            accounts::role.eq(role),
            accounts::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    info!(account_id, "Account created successfully");

    queries::accounts::get_account_by_id(conn, &account_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Account {account_id}")))
}

/// Records a successful sign-in.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_sign_in(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<(), PersistenceError> {
    debug!("Updating last_sign_in_at for account: {}", account_id);

    let now: String = now_timestamp()?;
    diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::last_sign_in_at.eq(Some(now)))
        .execute(conn)?;

    Ok(())
}

/// Sets the role of an account.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the account does not exist.
pub fn set_account_role(
    conn: &mut SqliteConnection,
    account_id: &str,
    role: &str,
) -> Result<AccountData, PersistenceError> {
    info!(account_id, role, "Setting account role");

    let rows_affected: usize = diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(accounts::role.eq(role))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Account with ID {account_id} not found"
        )));
    }

    queries::accounts::get_account_by_id(conn, account_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Account {account_id}")))
}

/// Verifies a password against a stored hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
