use axum::{body::Bytes, extract::State, http::HeaderMap, response::Json};
use serde_json::{json, Value};

use crate::api::{error::ApiError, AppState};
use crate::auth::extract_bearer;
use crate::validation::validate;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /log`: verify, validate, record. Stops at the first failure.
pub async fn log_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let credential = extract_bearer(&headers)?;
    let claims = state.verifier.verify(credential)?;
    let request = validate(&body, &claims)?;

    state
        .recorder
        .record(request.subject, request.payload)
        .await?;

    Ok(Json(json!({ "status": "logged" })))
}
