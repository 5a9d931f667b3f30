//! Tests for the `issue-token` binary

use std::process::Command;

use serde_json::json;

use event_sink::auth::{SigningSecret, TokenVerifier};

mod common;

use common::SECRET;

fn issue_token() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_issue-token"));
    cmd.env_remove("JWT_SECRET").env_remove("JWT_SECRET_FILE");
    cmd
}

#[test]
fn test_issued_token_is_accepted_by_verifier() {
    let output = issue_token()
        .args(["--jwt-secret", SECRET, "issue", "--sub", "alice", "--ttl-secs", "600"])
        .args(["--claim", "team=ops", "--claim", "level=3"])
        .output()
        .expect("Failed to run issue-token");
    assert!(output.status.success());

    let token = String::from_utf8(output.stdout).unwrap();
    let verifier = TokenVerifier::new(&SigningSecret::new(SECRET).unwrap());
    let claims = verifier.verify(token.trim()).unwrap();

    assert_eq!(claims["sub"], json!("alice"));
    assert_eq!(claims["team"], json!("ops"));
    assert_eq!(claims["level"], json!(3));
    assert!(claims.contains_key("exp"));
}

#[test]
fn test_secret_read_from_environment() {
    let output = issue_token()
        .env("JWT_SECRET", SECRET)
        .args(["issue", "--sub", "bob"])
        .output()
        .expect("Failed to run issue-token");
    assert!(output.status.success());

    let token = String::from_utf8(output.stdout).unwrap();
    let verifier = TokenVerifier::new(&SigningSecret::new(SECRET).unwrap());
    assert_eq!(verifier.verify(token.trim()).unwrap()["sub"], json!("bob"));
}

#[test]
fn test_verify_rejects_foreign_token() {
    let foreign = common::token_with("other-secret", json!({"sub": "alice"}));

    let output = issue_token()
        .args(["--jwt-secret", SECRET, "verify", foreign.as_str()])
        .output()
        .expect("Failed to run issue-token");
    assert!(!output.status.success());
}

#[test]
fn test_missing_secret_fails() {
    let output = issue_token()
        .args(["issue", "--sub", "alice"])
        .output()
        .expect("Failed to run issue-token");
    assert!(!output.status.success());
}

#[test]
fn test_out_of_range_ttl_is_an_error() {
    let output = issue_token()
        .args(["--jwt-secret", SECRET, "issue", "--sub", "alice"])
        .args(["--ttl-secs", "9223372036854775807"])
        .output()
        .expect("Failed to run issue-token");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_negative_ttl_is_rejected() {
    let output = issue_token()
        .args(["--jwt-secret", SECRET, "issue", "--sub", "alice", "--ttl-secs=-60"])
        .output()
        .expect("Failed to run issue-token");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
