//! Token Verifier
//!
//! Checks the HS256 signature of a bearer credential and hands back its
//! claims untouched.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use crate::auth::{Claims, SigningSecret};
use crate::error::AuthError;

/// Verifies credentials against the process-wide secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional, but enforced with no grace period when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a credential and return its claims.
    ///
    /// An expired token yields [`AuthError::ExpiredCredential`]; every other
    /// decoding or signature problem collapses into
    /// [`AuthError::InvalidCredential`] so nothing about the failure leaks
    /// to the caller.
    pub fn verify(&self, credential: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(credential, &self.key, &self.validation).map_err(|e| {
            debug!("Credential rejected: {:?}", e.kind());
            AuthError::from(e)
        })?;

        check_expiry(&data.claims)?;
        Ok(data.claims)
    }
}

/// jsonwebtoken only enforces an `exp` it can read as `u64`; anything else
/// is treated as absent. Negative values are in the past, non-numeric ones
/// are malformed.
fn check_expiry(claims: &Claims) -> Result<(), AuthError> {
    match claims.get("exp") {
        None => Ok(()),
        Some(Value::Number(exp)) => match exp.as_f64() {
            Some(exp) if exp < Utc::now().timestamp() as f64 => {
                Err(AuthError::ExpiredCredential)
            }
            Some(_) => Ok(()),
            None => Err(AuthError::InvalidCredential),
        },
        Some(_) => Err(AuthError::InvalidCredential),
    }
}
