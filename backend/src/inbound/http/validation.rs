//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CustomerRef, Email, Error, FoodItemId, OrderId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidEmail,
    InvalidCustomer,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidCustomer => "invalid_customer",
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

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
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

/// Unwrap an optional body field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId, value)
}

fn parse_raw_id(value: &str, field: FieldName) -> Result<i32, Error> {
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_id_error(field, value))
}

pub(crate) fn parse_food_item_id(value: &str, field: FieldName) -> Result<FoodItemId, Error> {
    parse_raw_id(value, field).map(FoodItemId::new)
}

pub(crate) fn parse_order_id(value: &str, field: FieldName) -> Result<OrderId, Error> {
    parse_raw_id(value, field).map(OrderId::new)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_raw_id(value, field).map(UserId::new)
}

/// Convert client-supplied numeric ids, naming the first bad entry.
pub(crate) fn food_item_ids(values: &[i64], field: FieldName) -> Result<Vec<FoodItemId>, Error> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            i32::try_from(*value)
                .ok()
                .filter(|id| *id > 0)
                .map(FoodItemId::new)
                .ok_or_else(|| {
                    let name = field.as_str();
                    ValidationError::new(name, format!("{name} must contain positive integers"))
                        .with_index(ErrorCode::InvalidId, index, value.to_string())
                })
        })
        .collect()
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid e-mail address"))
            .with_value(ErrorCode::InvalidEmail, value)
    })
}

/// Accepts either an e-mail address or a numeric user id.
pub(crate) fn parse_customer_ref(value: &str, field: FieldName) -> Result<CustomerRef, Error> {
    value.parse::<CustomerRef>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be an e-mail address or user id"))
            .with_value(ErrorCode::InvalidCustomer, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    fn missing_field_names_the_field() {
        let err = require::<String>(None, FieldName::new("price")).expect_err("missing");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: price");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "price", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case(" 12 ", Some(12))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("abc", None)]
    #[case("99999999999", None)]
    fn path_ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<i32>) {
        let parsed = parse_food_item_id(raw, ID).ok().map(FoodItemId::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn bad_path_id_reports_the_value() {
        let err = parse_order_id("abc", ID).expect_err("not numeric");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "id", "value": "abc", "code": "invalid_id"}))
        );
    }

    #[rstest]
    fn id_list_reports_first_bad_index() {
        let err = food_item_ids(&[1, 2, -5, 0], FieldName::new("foodItemIds"))
            .expect_err("negative id");
        let details = err.details().expect("details");
        assert_eq!(details["index"], json!(2));
        assert_eq!(details["value"], json!("-5"));
    }

    #[rstest]
    fn customer_ref_accepts_email_or_id() {
        let field = FieldName::new("customer");
        assert!(matches!(
            parse_customer_ref("ada@example.com", field),
            Ok(CustomerRef::Email(_))
        ));
        assert_eq!(
            parse_customer_ref("42", field).expect("id"),
            CustomerRef::Id(UserId::new(42))
        );
        let err = parse_customer_ref("ada", field).expect_err("neither");
        assert_eq!(err.details().expect("details")["code"], json!("invalid_customer"));
    }

    #[rstest]
    fn invalid_email_is_rejected() {
        let err = parse_email("not-an-email", FieldName::new("email")).expect_err("invalid");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
    }
}
