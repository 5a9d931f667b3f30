//! Request Validator
//!
//! Checks that a `/log` body is a JSON object and that the verified
//! claims name a subject.

use serde_json::{Map, Value};

use crate::auth::Claims;
use crate::error::ValidationError;

/// A request that passed validation and is ready to record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub subject: String,
    pub payload: Map<String, Value>,
}

/// Validate the raw body against the verified claims.
///
/// The body is checked first, so a bad body is reported even when the
/// token also lacks a subject.
pub fn validate(raw_body: &[u8], claims: &Claims) -> Result<ValidatedRequest, ValidationError> {
    let body: Value =
        serde_json::from_slice(raw_body).map_err(|_| ValidationError::InvalidJson)?;

    let payload = match body {
        Value::Object(map) => map,
        _ => return Err(ValidationError::NotAnObject),
    };

    // A non-string subject cannot be recorded, so it counts as absent.
    let subject = claims
        .get("sub")
        .and_then(Value::as_str)
        .ok_or(ValidationError::MissingSubjectClaim)?
        .to_string();

    Ok(ValidatedRequest { subject, payload })
}
