// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account roles.
///
/// A role is stored as a lower-case string on the account row and decides
/// which capabilities and routes the account may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A registered church member. Profile self-service only.
    Member,
    /// A kids ministry teacher. May run check-in and check-out.
    Teacher,
    /// A ministry leader. Kids check-in plus visitor reporting.
    Leader,
    /// Full administrative access.
    Admin,
    /// A media trainee. Member capabilities plus schedule editing.
    Trainee,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Teacher => "teacher",
            Self::Leader => "leader",
            Self::Admin => "admin",
            Self::Trainee => "trainee",
        }
    }

    /// Returns true for roles allowed to run the kids check-in workflow.
    #[must_use]
    pub const fn is_kids_staff(&self) -> bool {
        matches!(self, Self::Teacher | Self::Leader | Self::Admin)
    }

    /// Returns true for roles allowed to edit the service schedule.
    #[must_use]
    pub const fn can_edit_schedule(&self) -> bool {
        matches!(self, Self::Admin | Self::Trainee)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "teacher" => Ok(Self::Teacher),
            "leader" => Ok(Self::Leader),
            "admin" => Ok(Self::Admin),
            "trainee" => Ok(Self::Trainee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Site languages. Content is published in Portuguese and English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Ok(Self::Pt),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            _ => Err(DomainError::InvalidLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The independently saved sections of a member profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    /// Name, contact details, birth date, gender, address.
    Personal,
    /// Baptism, salvation and membership dates, cell group.
    Spiritual,
    /// Volunteer areas and availability.
    Volunteer,
    /// Marital status. The spouse link is managed separately.
    Family,
}

impl ProfileSection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Spiritual => "spiritual",
            Self::Volunteer => "volunteer",
            Self::Family => "family",
        }
    }
}

impl FromStr for ProfileSection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Self::Personal),
            "spiritual" => Ok(Self::Spiritual),
            "volunteer" => Ok(Self::Volunteer),
            "family" => Ok(Self::Family),
            _ => Err(DomainError::InvalidProfileSection(s.to_string())),
        }
    }
}
