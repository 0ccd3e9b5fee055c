//! Plain-text passwords and their Argon2 PHC hashes.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};

use super::validation::FieldError;

/// Password as submitted by a client. Never logged or serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Accept any non-empty password, reporting emptiness against `field`.
    pub fn new(field: &'static str, raw: String) -> Result<Self, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::missing(field));
        }
        Ok(Self(raw))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Hashing or parsing a password hash failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Argon2 rejected the input.
    #[error("failed to hash password: {message}")]
    Hashing {
        /// Underlying failure.
        message: String,
    },
    /// A stored hash could not be parsed.
    #[error("stored password hash is not a valid PHC string")]
    Malformed,
}

/// Argon2id hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn generate(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError::Hashing {
                message: err.to_string(),
            })
    }

    /// Accept a hash loaded from storage.
    pub fn from_phc(raw: String) -> Result<Self, PasswordHashError> {
        PhcString::new(&raw).map_err(|_| PasswordHashError::Malformed)?;
        Ok(Self(raw))
    }

    /// Whether `password` matches. Malformed hashes never match.
    pub fn verify(&self, password: &Password) -> bool {
        PhcString::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }

    /// PHC string for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
