// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{AccountData, MemberSummaryData, Page, PageRequest};
use crate::diesel_schema::{accounts, member_profiles};
use crate::error::PersistenceError;

/// Diesel Queryable struct for account rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountRow {
    account_id: String,
    email: String,
    password_hash: String,
    display_name: Option<String>,
    role: String,
    created_at: String,
    last_sign_in_at: Option<String>,
}

impl From<AccountRow> for AccountData {
    fn from(row: AccountRow) -> Self {
        Self {
            account_id: row.account_id,
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            role: row.role,
            created_at: row.created_at,
            last_sign_in_at: row.last_sign_in_at,
        }
    }
}

/// Retrieves an account by email. The email is matched lower-cased.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_account_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<AccountData>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();
    debug!("Looking up account by email: {}", normalized_email);

    let row: Option<AccountRow> = accounts::table
        .filter(accounts::email.eq(&normalized_email))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(AccountData::from))
}

/// Retrieves an account by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_account_by_id(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<Option<AccountData>, PersistenceError> {
    debug!("Looking up account by ID: {}", account_id);

    let row: Option<AccountRow> = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(AccountData::from))
}

/// Counts all accounts.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_accounts(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(accounts::table.count().get_result(conn)?)
}

/// Lists accounts joined with their member profile, newest first.
///
/// The search term matches email, display name and profile names,
/// case-insensitively.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_member_summaries(
    conn: &mut SqliteConnection,
    request: &PageRequest,
) -> Result<Page<MemberSummaryData>, PersistenceError> {
    let account_rows: Vec<AccountRow> = accounts::table
        .order(accounts::created_at.desc())
        .select(AccountRow::as_select())
        .load(conn)?;

    let profile_rows: Vec<(String, String, String, String, String)> = member_profiles::table
        .select((
            member_profiles::account_id,
            member_profiles::profile_id,
            member_profiles::first_name,
            member_profiles::last_name,
            member_profiles::phone,
        ))
        .load(conn)?;

    let mut profiles: HashMap<String, (String, String, String, String)> = profile_rows
        .into_iter()
        .map(|(account_id, profile_id, first, last, phone)| {
            (account_id, (profile_id, first, last, phone))
        })
        .collect();

    let needle: Option<String> = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let matching: Vec<MemberSummaryData> = account_rows
        .into_iter()
        .map(|row| {
            let profile = profiles.remove(&row.account_id);
            let (profile_id, first_name, last_name, phone) = match profile {
                Some((id, first, last, phone)) => (Some(id), Some(first), Some(last), Some(phone)),
                None => (None, None, None, None),
            };
            MemberSummaryData {
                account_id: row.account_id,
                email: row.email,
                role: row.role,
                display_name: row.display_name,
                profile_id,
                first_name,
                last_name,
                phone,
                created_at: row.created_at,
            }
        })
        .filter(|summary| {
            needle.as_deref().is_none_or(|needle| {
                [
                    Some(summary.email.as_str()),
                    summary.display_name.as_deref(),
                    summary.first_name.as_deref(),
                    summary.last_name.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(needle))
            })
        })
        .collect();

    let total: i64 = i64::try_from(matching.len()).unwrap_or(i64::MAX);
    let offset: usize = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit: usize = usize::try_from(request.limit()).unwrap_or(usize::MAX);

    Ok(Page {
        items: matching.into_iter().skip(offset).take(limit).collect(),
        total,
        page: request.page.max(1),
        per_page: request.limit(),
    })
}
