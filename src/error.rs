use std::path::PathBuf;
use thiserror::Error;

/// Credential failures. Always caused by the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Malformed Authorization header")]
    MalformedHeader,

    #[error("Credential has expired")]
    ExpiredCredential,

    #[error("Credential is invalid")]
    InvalidCredential,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
            _ => AuthError::InvalidCredential,
        }
    }
}

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("TTL of {0} seconds puts the expiry out of range")]
    TtlOutOfRange(u64),

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Request body and claim problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Token must contain 'sub' claim")]
    MissingSubjectClaim,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to append to {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT secret must be provided via --jwt-secret/JWT_SECRET or --jwt-secret-file/JWT_SECRET_FILE")]
    MissingSecret,

    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("Only one of --jwt-secret and --jwt-secret-file may be set")]
    ConflictingSecretSources,

    #[error("Failed to read secret file {path:?}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Log file {path:?} is not writable: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every failure the `/log` path can produce.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
