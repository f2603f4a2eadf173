//! Password value object.
//!
//! A `Password` holds a raw credential that has passed the length policy.
//! It only lives for the duration of a signup or login and is never stored;
//! persistence sees the output of a [`CredentialHasher`](crate::CredentialHasher).

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Validated raw password.
///
/// Once constructed it is guaranteed to satisfy the length policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

// Don't expose the raw value in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl Password {
    /// Validate a raw password.
    ///
    /// Length is counted in Unicode scalar values, not bytes.
    ///
    /// # Errors
    /// Returns a validation error if `raw` is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters. There is no upper bound and no
    /// character-class requirement.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(Self(raw))
    }

    /// Borrow the raw value, e.g. to feed it to a hasher.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Password {
    type Error = DomainError;

    fn try_from(raw: &str) -> DomainResult<Self> {
        Password::new(raw)
    }
}
