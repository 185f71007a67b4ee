// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static role to capability mapping.
//!
//! Capabilities tell the portal which areas to show. They are advisory:
//! every mutating route still performs its own role check.

use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The capability record for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Permissions {
    /// May open the admin dashboard.
    pub can_access_admin: bool,
    /// May list members and change their roles.
    pub can_manage_members: bool,
    /// May read visitor and volunteer reports.
    pub can_manage_visitors: bool,
    /// May run the kids check-in workflow.
    pub can_access_kids_checkin: bool,
    /// May edit their own member profile.
    pub can_access_profile: bool,
}

impl Permissions {
    /// No capabilities at all.
    pub const NONE: Self = Self {
        can_access_admin: false,
        can_manage_members: false,
        can_manage_visitors: false,
        can_access_kids_checkin: false,
        can_access_profile: false,
    };

    /// Every capability.
    pub const ALL: Self = Self {
        can_access_admin: true,
        can_manage_members: true,
        can_manage_visitors: true,
        can_access_kids_checkin: true,
        can_access_profile: true,
    };

    /// The capability set for a known role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::ALL,
            Role::Leader => Self {
                can_access_admin: true,
                can_manage_members: false,
                can_manage_visitors: true,
                can_access_kids_checkin: true,
                can_access_profile: true,
            },
            Role::Teacher => Self {
                can_access_kids_checkin: true,
                can_access_profile: true,
                ..Self::NONE
            },
            Role::Member | Role::Trainee => Self {
                can_access_profile: true,
                ..Self::NONE
            },
        }
    }
}

/// Maps a stored role string to its capability record.
///
/// Unknown or empty roles get [`Permissions::NONE`].
#[must_use]
pub fn role_to_permissions(role: &str) -> Permissions {
    Role::from_str(role).map_or(Permissions::NONE, Permissions::for_role)
}
