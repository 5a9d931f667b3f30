use axum::http::{header, HeaderMap};

use crate::error::AuthError;

/// Pull the credential out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header and a header
/// in any other shape are reported separately.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let (scheme, credential) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;

    let credential = credential.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || credential.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn test_malformed_headers() {
        for value in ["Bearer", "Bearer ", "Basic dXNlcjpwYXNz", "abc.def.ghi"] {
            assert_eq!(
                extract_bearer(&headers(value)),
                Err(AuthError::MalformedHeader),
                "header {:?} should be rejected",
                value
            );
        }
    }
}
