//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies and query strings arrive as raw strings so a missing or
//! malformed field produces an `invalid_request` payload naming the field,
//! instead of the framework's plain-text rejection.

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ProductType, Role};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidValue,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidPage => "invalid_page",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

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

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required field, rejecting absent or blank values.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_role(value: &str, field: FieldName) -> Result<Role, Error> {
    value.parse::<Role>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be employee or moderator"))
            .with_value(ErrorCode::InvalidValue, value)
    })
}

pub(crate) fn parse_product_type(value: &str, field: FieldName) -> Result<ProductType, Error> {
    value.parse::<ProductType>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, "unsupported product type")
            .with_value(ErrorCode::InvalidValue, value)
    })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    let name = field.as_str();
                    ValidationError::new(name, format!("{name} must be an RFC 3339 timestamp"))
                        .with_value(ErrorCode::InvalidTimestamp, raw.as_str())
                })
        })
        .transpose()
}

/// Parse the 1-based page number; absent means the first page.
pub(crate) fn parse_page(
    value: Option<String>,
    limit: u32,
    field: FieldName,
) -> Result<PageRequest, Error> {
    let invalid = |raw: &str| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a positive integer"))
            .with_value(ErrorCode::InvalidPage, raw)
    };
    let page = match value.filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse::<u32>().map_err(|_| invalid(&raw))?,
        None => 1,
    };
    PageRequest::new(page, limit).map_err(|_| invalid(&page.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    const FIELD: FieldName = FieldName::new("pvzId");

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a Value> {
        err.details().and_then(|details| details.get(key))
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    fn blank_required_fields_are_missing(#[case] value: Option<String>) {
        let err = require(value, FIELD).expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "code"), Some(&json!("missing_field")));
        assert_eq!(detail(&err, "field"), Some(&json!("pvzId")));
    }

    #[rstest]
    fn malformed_uuid_reports_value() {
        let err = parse_uuid("nope", FIELD).expect_err("invalid uuid");
        assert_eq!(err.message(), "pvzId must be a valid UUID");
        assert_eq!(detail(&err, "value"), Some(&json!("nope")));
    }

    #[rstest]
    #[case("employee", Role::Employee)]
    #[case("moderator", Role::Moderator)]
    fn roles_parse(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(parse_role(raw, FieldName::new("role")), Ok(expected));
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let err = parse_role("admin", FieldName::new("role")).expect_err("unknown role");
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_value")));
    }

    #[rstest]
    fn timestamps_normalise_to_utc() {
        let parsed = parse_optional_rfc3339_timestamp(
            Some("2025-04-01T12:00:00+03:00".to_owned()),
            FieldName::new("startDate"),
        )
        .expect("valid timestamp")
        .expect("present");
        assert_eq!(parsed.to_rfc3339(), "2025-04-01T09:00:00+00:00");
        assert_eq!(
            parse_optional_rfc3339_timestamp(None, FieldName::new("startDate")),
            Ok(None)
        );
    }

    #[rstest]
    fn bad_timestamp_is_rejected() {
        let err = parse_optional_rfc3339_timestamp(
            Some("yesterday".to_owned()),
            FieldName::new("endDate"),
        )
        .expect_err("invalid timestamp");
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_timestamp")));
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3".to_owned()), 3)]
    fn pages_default_to_first(#[case] raw: Option<String>, #[case] expected: u32) {
        let page = parse_page(raw, 10, FieldName::new("page")).expect("valid page");
        assert_eq!(page.page(), expected);
        assert_eq!(page.limit(), 10);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("two")]
    fn invalid_pages_are_rejected(#[case] raw: &str) {
        let err =
            parse_page(Some(raw.to_owned()), 10, FieldName::new("page")).expect_err("bad page");
        assert_eq!(detail(&err, "code"), Some(&json!("invalid_page")));
    }
}
