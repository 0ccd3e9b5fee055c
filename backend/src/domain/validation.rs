//! Field-level validation shared by the domain entities.

use std::fmt;

use serde_json::json;

use super::Error;

/// A single field failed validation.
///
/// `field` is the wire name the client sent, so the message and details can
/// be returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is absent or blank.
    #[error("missing required field: {field}")]
    Missing {
        /// Wire name of the field.
        field: &'static str,
    },
    /// Trimmed text is shorter than `min` characters.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Wire name of the field.
        field: &'static str,
        /// Minimum length.
        min: usize,
    },
    /// A number falls outside `min..=max`.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Wire name of the field.
        field: &'static str,
        /// Lowest accepted value.
        min: i64,
        /// Highest accepted value.
        max: i64,
    },
    /// Not a plausible email address.
    #[error("{field} must be a valid email address")]
    InvalidEmail {
        /// Wire name of the field.
        field: &'static str,
    },
    /// The value is not one of the accepted labels.
    #[error("{field} does not accept {value:?}")]
    UnknownValue {
        /// Wire name of the field.
        field: &'static str,
        /// Rejected input.
        value: String,
    },
}

impl FieldError {
    /// Build [`Self::Missing`].
    pub const fn missing(field: &'static str) -> Self {
        Self::Missing { field }
    }

    /// Build [`Self::UnknownValue`].
    pub fn unknown_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field,
            value: value.into(),
        }
    }

    /// Wire name of the offending field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::TooShort { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidEmail { field }
            | Self::UnknownValue { field, .. } => field,
        }
    }

    /// Machine-readable reason reported in error details.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::TooShort { .. } => "too_short",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::UnknownValue { .. } => "unknown_value",
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Trim `value` and reject it when absent or blank.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    non_blank(value).ok_or(FieldError::missing(field))
}

/// Trim `value`, returning `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Require at least `min` characters after trimming.
pub fn min_length(field: &'static str, value: String, min: usize) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(FieldError::TooShort { field, min });
    }
    Ok(trimmed.to_owned())
}

/// Require `value` to fall inside `min..=max`.
pub fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, FieldError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(FieldError::OutOfRange { field, min, max })
    }
}

/// Case-insensitive substring match used by list filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trimmed, lower-cased email address containing a single `@` with text on
/// both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate `raw`, reporting failures against `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldError> {
        let normalised = raw.trim().to_lowercase();
        let valid = match normalised.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !normalised.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if normalised.is_empty() {
            return Err(FieldError::missing(field));
        }
        if !valid {
            return Err(FieldError::InvalidEmail { field });
        }
        Ok(Self(normalised))
    }

    /// Normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
