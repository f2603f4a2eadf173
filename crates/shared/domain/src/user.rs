//! User aggregate.
//!
//! A `User` is immutable once built. Status changes return a new value and
//! leave persisting it to the caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::hasher::CredentialHasher;
use crate::password::Password;
use crate::status::UserStatus;

/// User aggregate root
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    email: String,
    password_hash: Vec<u8>,
    name: String,
    status: UserStatus,
    created_at: DateTime<Utc>,
}

// Don't expose the hash in debug output (security)
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// Register a brand-new user.
    ///
    /// Validates the name and password, hashes the password and assigns a
    /// random id. The user starts out `Active` with `created_at = now`.
    ///
    /// # Errors
    /// - validation error if `name` is blank or the password is too short
    /// - internal error if hashing fails
    pub fn create(
        email: impl Into<String>,
        raw_password: &str,
        name: impl Into<String>,
        now: DateTime<Utc>,
        hasher: &dyn CredentialHasher,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        let password = Password::new(raw_password)?;
        let password_hash = hasher.hash(&password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash,
            name,
            status: UserStatus::Active,
            created_at: now,
        })
    }

    /// Rehydrate a user from persisted fields. Performs no validation.
    pub fn reconstruct(
        id: Uuid,
        email: String,
        password_hash: Vec<u8>,
        name: String,
        status: UserStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &[u8] {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check a raw password against the stored hash.
    ///
    /// The input goes through the same length policy as signup first, so a
    /// short input fails with a validation error even if it would match.
    /// A mismatch is `Ok(false)`.
    pub fn compare_password(
        &self,
        raw: &str,
        hasher: &dyn CredentialHasher,
    ) -> DomainResult<bool> {
        let password = Password::new(raw)?;
        hasher.verify(&self.password_hash, &password)
    }

    /// Return a copy of this user moved to `target`.
    pub fn update_status(&self, target: UserStatus) -> DomainResult<Self> {
        let status = self.status.transition(target)?;

        Ok(Self {
            status,
            ..self.clone()
        })
    }

    /// Same as [`User::update_status`] but takes a raw status code.
    pub fn update_status_from(&self, raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::validation("status is required"));
        }

        self.update_status(raw.parse()?)
    }
}
