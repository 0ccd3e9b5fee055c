//! Counter keys, sequence kinds, and formatted sequential identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::user::Role;

use super::SequenceError;

/// Largest counter value any store can hold (`BIGINT` in PostgreSQL).
pub const MAX_SEQUENCE_VALUE: u64 = i64::MAX as u64;

/// Name of an independent numbering domain, e.g. `user` or `complaint`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterKey(String);

/// Errors raised when building a [`CounterKey`] from untrusted text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounterKeyValidationError {
    /// The key was blank.
    #[error("counter key must not be empty")]
    Empty,
}

impl CounterKey {
    /// Validate a key; blank keys are rejected.
    pub fn new(key: impl Into<String>) -> Result<Self, CounterKeyValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CounterKeyValidationError::Empty);
        }
        Ok(Self(key))
    }

    /// Key as stored by counter backends.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What is being numbered. User roles number independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Users of the given role.
    User(Role),
    /// Complaints.
    Complaint,
}

impl SequenceKind {
    /// Every kind, one per counter key.
    pub const ALL: [Self; 3] = [Self::User(Role::User), Self::User(Role::Admin), Self::Complaint];

    /// Counter key name for this kind.
    pub const fn key_name(self) -> &'static str {
        match self {
            Self::User(Role::User) => "user",
            Self::User(Role::Admin) => "admin",
            Self::Complaint => "complaint",
        }
    }

    /// Counter key for this kind.
    pub fn counter_key(self) -> CounterKey {
        CounterKey(self.key_name().to_owned())
    }

    /// Rendering format for this kind.
    pub const fn format(self) -> SequenceFormat {
        match self {
            Self::User(Role::User) => SequenceFormat::new("USR", 3),
            Self::User(Role::Admin) => SequenceFormat::new("ADM", 3),
            Self::Complaint => SequenceFormat::new("CMP", 4),
        }
    }

    /// Kind whose prefix starts `raw`, if any.
    pub fn for_identifier(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| raw.starts_with(kind.format().prefix()))
    }
}

/// Prefix plus fixed zero-padded width.
///
/// The width is a minimum: numbers that need more digits are rendered in
/// full, so the 1000th user is `USR1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFormat {
    prefix: &'static str,
    width: usize,
}

impl SequenceFormat {
    /// Format with `prefix` and a minimum digit `width`.
    pub const fn new(prefix: &'static str, width: usize) -> Self {
        Self { prefix, width }
    }

    /// Identifier prefix.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Minimum number of digits.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Render `value` as an identifier.
    pub fn render(&self, value: u64) -> SequentialId {
        SequentialId(format!("{}{:0width$}", self.prefix, value, width = self.width))
    }

    /// Parse the numeric suffix of `raw`.
    ///
    /// Returns `Ok(None)` when `raw` carries a different prefix and
    /// [`SequenceError::MalformedSequenceValue`] when the prefix matches but
    /// the rest is not a representable non-negative integer.
    pub fn parse(&self, raw: &str) -> Result<Option<u64>, SequenceError> {
        let Some(suffix) = raw.strip_prefix(self.prefix) else {
            return Ok(None);
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SequenceError::malformed_sequence_value(raw));
        }
        match suffix.parse::<u64>() {
            Ok(value) if value <= MAX_SEQUENCE_VALUE => Ok(Some(value)),
            _ => Err(SequenceError::malformed_sequence_value(raw)),
        }
    }
}

/// Human-facing identifier such as `USR001`, `ADM002`, or `CMP0042`.
///
/// Caller-supplied identifiers are accepted as-is provided they are not
/// blank; they need not match any known prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SequentialId(String);

/// Errors raised when accepting a caller-supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequentialIdValidationError {
    /// The identifier was blank.
    #[error("identifier must not be blank")]
    Blank,
}

impl SequentialId {
    /// Accept a non-blank identifier, trimming surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, SequentialIdValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SequentialIdValidationError::Blank);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Treat absent, empty, and whitespace-only input alike.
    pub fn from_optional(raw: Option<String>) -> Option<Self> {
        raw.and_then(|value| Self::new(value).ok())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SequentialId {
    type Error = SequentialIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SequentialId> for String {
    fn from(value: SequentialId) -> Self {
        value.0
    }
}

impl AsRef<str> for SequentialId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SequentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
