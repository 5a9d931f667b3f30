//! HTTP surface: `GET /`, `GET /health` and `POST /log`.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::TokenVerifier;
use crate::recorder::EventRecorder;

/// Shared handler state. Cheap to clone; nothing in it is mutable except
/// the log file behind the recorder's lock.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub recorder: EventRecorder,
}

impl AppState {
    pub fn new(verifier: TokenVerifier, recorder: EventRecorder) -> Self {
        Self {
            verifier: Arc::new(verifier),
            recorder,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/log", post(handlers::log_event))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .into_inner(),
        )
        .with_state(state)
}
