//! Course enum values and field validation.
//!
//! The enumerated columns on `courses` carry CHECK constraints in the
//! migrations; these helpers reject bad values at the API boundary so the
//! client gets a 400 with a readable message instead of a constraint error.

use crate::error::CoreError;

pub const PRICE_TYPE_ONE_OFF: &str = "one-off";
pub const PRICE_TYPE_SUBSCRIPTION: &str = "subscription";

pub const MODE_GROUP: &str = "group";
pub const MODE_ONE_ON_ONE: &str = "one-on-one";

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

const VALID_PRICE_TYPES: &[&str] = &[PRICE_TYPE_ONE_OFF, PRICE_TYPE_SUBSCRIPTION];
const VALID_MODES: &[&str] = &[MODE_GROUP, MODE_ONE_ON_ONE];
const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

pub fn validate_price_type(value: &str) -> Result<(), CoreError> {
    validate_one_of(value, VALID_PRICE_TYPES, "price_type")
}

pub fn validate_mode(value: &str) -> Result<(), CoreError> {
    validate_one_of(value, VALID_MODES, "mode")
}

pub fn validate_status(value: &str) -> Result<(), CoreError> {
    validate_one_of(value, VALID_STATUSES, "status")
}

/// Required text fields must be present and non-blank.
pub fn require_non_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(())
}

fn validate_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}
