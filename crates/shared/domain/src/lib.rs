//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` aggregate and its status machine, the `Password` policy, the
//! credential hashing port and the `AccessToken` value object.

pub mod constants;
pub mod error;
pub mod hasher;
pub mod password;
pub mod status;
pub mod token;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorDetails};
pub use hasher::{Argon2Hasher, CredentialHasher};
pub use password::Password;
pub use status::UserStatus;
pub use token::AccessToken;
pub use user::User;
