//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Status
// =============================================================================

/// Status code of a user that can sign in
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// Status code of a suspended user
pub const STATUS_FROZEN: &str = "FROZEN";

/// Status code of a deleted user (terminal)
pub const STATUS_DELETED: &str = "DELETED";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default access token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Upper bound for a configured token lifetime (100 years, in minutes)
pub const MAX_TOKEN_TTL_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIAL_MESSAGE: &str = "invalid credential";
