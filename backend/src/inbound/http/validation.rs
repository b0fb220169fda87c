//! Field-level validation helpers shared by handlers.
//!
//! Every failure becomes `400 invalid_request` with
//! `details: {field, code, value?}` so clients can highlight the offending
//! input.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::{Error, ShipmentId};

/// Machine-readable validation failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidValue,
    TooLong,
    TooShort,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
            Self::InvalidValue => "invalid_value",
            Self::TooLong => "too_long",
            Self::TooShort => "too_short",
        }
    }
}

/// JSON name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Build the `400` for `field`.
pub(crate) fn field_error(
    field: FieldName,
    code: FieldErrorCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_error_with_value(
    field: FieldName,
    code: FieldErrorCode,
    message: impl Into<String>,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "value": value,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        FieldErrorCode::MissingField,
        format!("{} is required", field.as_str()),
    )
}

/// Unwrap a required field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a shipment id from a path segment. Malformed ids cannot exist, so
/// they read as "not found" rather than "bad request".
pub(crate) fn parse_shipment_id(raw: &str, not_found_message: &str) -> Result<ShipmentId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(not_found_message).with_details(json!({ "id": raw })))
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_date(raw: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            field_error_with_value(
                field,
                FieldErrorCode::InvalidDate,
                format!(
                    "{} must be an RFC 3339 timestamp or a YYYY-MM-DD date",
                    field.as_str()
                ),
                raw,
            )
        })
}

/// [`parse_date`] for optional fields.
pub(crate) fn parse_optional_date(
    raw: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    raw.map(|value| parse_date(value, field)).transpose()
}
