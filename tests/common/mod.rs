//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};

use event_sink::auth::{Claims, SigningSecret, TokenIssuer};

pub const SECRET: &str = "s3cr3t";

/// Sign an arbitrary claims object with `secret`
pub fn token_with(secret: &str, claims: Value) -> String {
    let secret = SigningSecret::new(secret).expect("test secret is non-empty");
    let claims: Claims = claims.as_object().cloned().expect("claims must be an object");
    TokenIssuer::new(&secret)
        .sign(&claims)
        .expect("Failed to sign test token")
}

/// A token for `sub` valid for the next hour
pub fn token(sub: &str) -> String {
    token_with(
        SECRET,
        json!({"sub": sub, "exp": Utc::now().timestamp() + 3600}),
    )
}

/// Lines of a log file; a missing file reads as empty
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
