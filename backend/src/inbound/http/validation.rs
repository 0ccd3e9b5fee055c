//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::validation::{FieldError, non_blank};

/// Message returned when a create request omits mandatory fields.
pub(crate) const REQUIRED_FIELDS_MESSAGE: &str = "Please provide all required fields";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Collects the names of absent mandatory fields for a create request.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Record `field` as missing when `present` is false.
    pub(crate) fn check(&mut self, field: FieldName, present: bool) -> &mut Self {
        if !present {
            self.missing.push(field.as_str());
        }
        self
    }

    /// Fail with the shared "required fields" message when anything is missing.
    pub(crate) fn finish(&self) -> Result<(), Error> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(
            Error::invalid_request(REQUIRED_FIELDS_MESSAGE).with_details(json!({
                "fields": self.missing,
                "code": ErrorCode::MissingField.as_str(),
            })),
        )
    }
}

/// True when `value` holds non-whitespace text.
pub(crate) fn has_text(value: Option<&String>) -> bool {
    value.is_some_and(|raw| !raw.trim().is_empty())
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, &value))
}

/// Parse an optional UUID, treating blank input as absent.
pub(crate) fn parse_optional_uuid(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    non_blank(value)
        .map(|raw| parse_uuid(raw, field))
        .transpose()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date"),
    )
    .with_value(ErrorCode::InvalidTimestamp, value)
}

/// Accept a full RFC 3339 timestamp or a bare calendar date (midnight UTC).
pub(crate) fn parse_timestamp(value: String, field: FieldName) -> Result<DateTime<Utc>, Error> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid_timestamp_error(field, &value))
}

/// Parse a labelled enum from an optional value; blank input means "not set".
pub(crate) fn parse_optional_label<T>(value: Option<String>) -> Result<Option<T>, Error>
where
    T: FromStr<Err = FieldError>,
{
    non_blank(value)
        .map(|raw| raw.parse::<T>().map_err(Error::from))
        .transpose()
}
