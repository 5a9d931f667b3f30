//! Token Issuer
//!
//! Mints HS256 credentials the verifier accepts. Used by the `issue-token`
//! tool and by tests.

use chrono::Utc;
use jsonwebtoken::{encode, errors::Error as JwtError, Algorithm, EncodingKey, Header};
use serde_json::Value;

use crate::auth::{Claims, SigningSecret};
use crate::error::IssueError;

pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `subject`.
    ///
    /// `iat` is always set; `exp` only when a TTL is given. `sub`, `iat` and
    /// `exp` override anything of the same name in `extra`. A TTL that
    /// pushes `exp` past `i64::MAX` is rejected.
    pub fn issue(
        &self,
        subject: &str,
        ttl_secs: Option<u64>,
        mut extra: Claims,
    ) -> Result<String, IssueError> {
        let now = Utc::now().timestamp();

        extra.insert("sub".to_string(), Value::from(subject));
        extra.insert("iat".to_string(), Value::from(now));
        if let Some(ttl) = ttl_secs {
            let exp = i64::try_from(ttl)
                .ok()
                .and_then(|ttl| now.checked_add(ttl))
                .ok_or(IssueError::TtlOutOfRange(ttl))?;
            extra.insert("exp".to_string(), Value::from(exp));
        }

        Ok(self.sign(&extra)?)
    }

    /// Sign an arbitrary claims map as-is.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key)
    }
}

/// Parse a `key=value` claim argument. The value is read as JSON when it
/// parses, otherwise kept as a plain string.
pub fn parse_claim(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;

    if key.is_empty() {
        return Err(format!("claim name is empty in '{}'", arg));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenVerifier;
    use serde_json::json;

    #[test]
    fn test_parse_claim() {
        assert_eq!(parse_claim("team=ops").unwrap(), ("team".to_string(), json!("ops")));
        assert_eq!(parse_claim("level=3").unwrap(), ("level".to_string(), json!(3)));
        assert_eq!(
            parse_claim("tags=[\"a\",\"b\"]").unwrap(),
            ("tags".to_string(), json!(["a", "b"]))
        );
        assert_eq!(parse_claim("note=a=b").unwrap(), ("note".to_string(), json!("a=b")));
        assert!(parse_claim("novalue").is_err());
        assert!(parse_claim("=x").is_err());
    }

    #[test]
    fn test_issue_sets_registered_claims() {
        let secret = SigningSecret::new("s3cr3t").unwrap();
        let mut extra = Claims::new();
        extra.insert("sub".to_string(), json!("mallory"));
        extra.insert("team".to_string(), json!("ops"));

        let token = TokenIssuer::new(&secret)
            .issue("alice", Some(60), extra)
            .unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = TokenVerifier::new(&secret).verify(&token).unwrap();
        assert_eq!(claims["sub"], json!("alice"));
        assert_eq!(claims["team"], json!("ops"));
        let iat = claims["iat"].as_i64().unwrap();
        assert_eq!(claims["exp"].as_i64().unwrap(), iat + 60);
    }

    #[test]
    fn test_issue_rejects_overflowing_ttl() {
        let secret = SigningSecret::new("s3cr3t").unwrap();
        let issuer = TokenIssuer::new(&secret);

        for ttl in [i64::MAX as u64, u64::MAX] {
            assert!(matches!(
                issuer.issue("alice", Some(ttl), Claims::new()),
                Err(IssueError::TtlOutOfRange(t)) if t == ttl
            ));
        }
    }

    #[test]
    fn test_issue_without_ttl_has_no_exp() {
        let secret = SigningSecret::new("s3cr3t").unwrap();
        let token = TokenIssuer::new(&secret)
            .issue("alice", None, Claims::new())
            .unwrap();

        let claims = TokenVerifier::new(&secret).verify(&token).unwrap();
        assert!(!claims.contains_key("exp"));
    }
}
