//! Bearer Token Authentication
//!
//! HS256 credentials signed with a single shared secret. The secret is
//! loaded once at startup and handed to the verifier and issuer by value.

pub mod bearer;
pub mod issuer;
pub mod verifier;

use std::fmt;

use crate::error::ConfigError;

pub use bearer::extract_bearer;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;

/// Decoded token payload, kept exactly as it was signed.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Shared HS256 signing key
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            SigningSecret::new(""),
            Err(ConfigError::EmptySecret)
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret = SigningSecret::new("s3cr3t").unwrap();
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("s3cr3t"));
    }
}
