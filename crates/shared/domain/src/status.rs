//! User lifecycle status and its transition rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_ACTIVE, STATUS_DELETED, STATUS_FROZEN};
use crate::error::{DomainError, DomainResult};

/// Lifecycle state of a user.
///
/// ```text
/// Active <-> Frozen
///    \        /
///     Deleted        (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Frozen,
    Deleted,
}

impl UserStatus {
    /// Persisted status code
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Frozen => STATUS_FROZEN,
            UserStatus::Deleted => STATUS_DELETED,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self, UserStatus::Frozen)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, UserStatus::Deleted)
    }

    /// Validate a transition from `self` to `target`.
    ///
    /// Self-transitions are rejected and `Deleted` has no outgoing edges.
    pub fn transition(self, target: UserStatus) -> DomainResult<UserStatus> {
        if self == target {
            return Err(DomainError::validation_with(
                "status is not changed",
                [("status", target.as_str())],
            ));
        }

        if self.is_deleted() {
            return Err(DomainError::validation_with(
                "deleted user status cannot transition",
                [("current", self.as_str()), ("target", target.as_str())],
            ));
        }

        Ok(target)
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    /// Parse a status code, ignoring ASCII case.
    fn from_str(raw: &str) -> DomainResult<Self> {
        match raw.to_ascii_uppercase().as_str() {
            STATUS_ACTIVE => Ok(UserStatus::Active),
            STATUS_FROZEN => Ok(UserStatus::Frozen),
            STATUS_DELETED => Ok(UserStatus::Deleted),
            _ => Err(DomainError::validation_with(
                "invalid user status",
                [("status", raw)],
            )),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        status.as_str().to_string()
    }
}
