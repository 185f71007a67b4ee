// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Kids check-in status and child references.
//!
//! A check-in row starts as `checked_in` and moves once to `checked_out`.
//! A child attending again gets a new row; a row never goes back.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The attendance status of a check-in row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    /// The child is in the classroom.
    CheckedIn,
    /// The child was collected. Terminal.
    CheckedOut,
}

impl CheckInStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
        }
    }

    /// Returns true if no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The only valid transition is `checked_in` → `checked_out`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::CheckedIn, Self::CheckedOut))
    }

    /// Validates a transition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` unless the transition
    /// is `checked_in` → `checked_out`.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for CheckInStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked_in" => Ok(Self::CheckedIn),
            "checked_out" => Ok(Self::CheckedOut),
            _ => Err(DomainError::InvalidCheckInStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The child a check-in row refers to. Exactly one kind, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildRef {
    /// A child attached to member profiles.
    Member(String),
    /// A child registered ad hoc at check-in.
    Visitor(String),
}

impl ChildRef {
    /// Builds a reference from the two optional ids of a request.
    ///
    /// Blank strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChildReference` when neither or both ids
    /// are supplied.
    pub fn from_ids(
        member_child_id: Option<&str>,
        visitor_child_id: Option<&str>,
    ) -> Result<Self, DomainError> {
        let member = member_child_id.map(str::trim).filter(|s| !s.is_empty());
        let visitor = visitor_child_id.map(str::trim).filter(|s| !s.is_empty());

        match (member, visitor) {
            (Some(id), None) => Ok(Self::Member(id.to_string())),
            (None, Some(id)) => Ok(Self::Visitor(id.to_string())),
            (None, None) => Err(DomainError::InvalidChildReference {
                reason: "one of member_child_id or visitor_child_id is required",
            }),
            (Some(_), Some(_)) => Err(DomainError::InvalidChildReference {
                reason: "member_child_id and visitor_child_id are mutually exclusive",
            }),
        }
    }

    /// The referenced child id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Member(id) | Self::Visitor(id) => id,
        }
    }

    /// The member child id, if this is a member reference.
    #[must_use]
    pub fn member_child_id(&self) -> Option<&str> {
        match self {
            Self::Member(id) => Some(id),
            Self::Visitor(_) => None,
        }
    }

    /// The visitor child id, if this is a visitor reference.
    #[must_use]
    pub fn visitor_child_id(&self) -> Option<&str> {
        match self {
            Self::Member(_) => None,
            Self::Visitor(id) => Some(id),
        }
    }
}
