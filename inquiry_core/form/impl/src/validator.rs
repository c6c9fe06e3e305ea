//! Validation of the individual form fields.
//!
//! Every function is total and pure. An absent value is the empty string.

use std::sync::LazyLock;

use inquiry_models::form::{FieldName, ValidationError};
use regex::Regex;

pub const NAME_MIN_LENGTH: usize = 3;
pub const MESSAGE_MIN_LENGTH: usize = 10;
pub const MESSAGE_MAX_LENGTH: usize = 500;
pub const PHONE_MIN_DIGITS: usize = 9;
pub const PHONE_MAX_DIGITS: usize = 12;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,4}$").unwrap());

pub fn validate_field(field: FieldName, value: &str) -> Result<(), ValidationError> {
    match field {
        FieldName::Name => validate_name(value),
        FieldName::Email => validate_email(value),
        FieldName::Phone => validate_phone(value),
        FieldName::Message => validate_message(value),
    }
}

pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    const FIELD: FieldName = FieldName::Name;

    let value = required(FIELD, value)?;
    if value.chars().count() < NAME_MIN_LENGTH {
        return Err(ValidationError::MinLength {
            field: FIELD,
            min: NAME_MIN_LENGTH,
        });
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::Charset(FIELD));
    }
    Ok(())
}

/// The pattern is matched against the untrimmed value, so surrounding
/// whitespace makes an address invalid.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    required(FieldName::Email, value)?;
    if !EMAIL_REGEX.is_match(value) {
        return Err(ValidationError::Format);
    }
    Ok(())
}

/// Separators like spaces, dashes or parentheses are ignored, only the digits
/// are counted.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    required(FieldName::Phone, value)?;
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return Err(ValidationError::Length {
            min: PHONE_MIN_DIGITS,
            max: PHONE_MAX_DIGITS,
        });
    }
    Ok(())
}

pub fn validate_message(value: &str) -> Result<(), ValidationError> {
    const FIELD: FieldName = FieldName::Message;

    let length = required(FIELD, value)?.chars().count();
    if length < MESSAGE_MIN_LENGTH {
        return Err(ValidationError::MinLength {
            field: FIELD,
            min: MESSAGE_MIN_LENGTH,
        });
    }
    if length > MESSAGE_MAX_LENGTH {
        return Err(ValidationError::MaxLength {
            field: FIELD,
            max: MESSAGE_MAX_LENGTH,
        });
    }
    Ok(())
}

fn required(field: FieldName, value: &str) -> Result<&str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value)
}
