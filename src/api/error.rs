//! Maps sink failures to HTTP responses.
//!
//! Bodies are always `{"detail": "..."}`. Messages are fixed strings; the
//! underlying decoder or I/O error is logged, never returned.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::{AuthError, SinkError, StorageError, ValidationError};

#[derive(Debug)]
pub struct ApiError(pub SinkError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SinkError::Auth(_) => StatusCode::UNAUTHORIZED,
            SinkError::Validation(_) => StatusCode::BAD_REQUEST,
            SinkError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &'static str {
        match &self.0 {
            SinkError::Auth(AuthError::MissingCredential) => "Not authenticated",
            SinkError::Auth(AuthError::MalformedHeader) => "Invalid authentication credentials",
            SinkError::Auth(AuthError::ExpiredCredential) => "Token has expired",
            SinkError::Auth(AuthError::InvalidCredential) => "Invalid token",
            SinkError::Validation(ValidationError::InvalidJson) => "Invalid JSON body",
            SinkError::Validation(ValidationError::NotAnObject) => {
                "Request body must be a JSON object"
            }
            SinkError::Validation(ValidationError::MissingSubjectClaim) => {
                "Token must contain 'sub' claim"
            }
            SinkError::Storage(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SinkError::Auth(e) => warn!("Rejected credential: {}", e),
            SinkError::Validation(e) => warn!("Rejected request: {}", e),
            SinkError::Storage(StorageError::WriteFailure { path, source }) => {
                error!("Failed to record event in {:?}: {}", path, source)
            }
        }

        let status = self.status();
        let mut response = (status, Json(json!({ "detail": self.detail() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
