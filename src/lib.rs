//! Authenticated JSONL event sink.
//!
//! `POST /log` requests carry an HS256 bearer token and a JSON object body.
//! The token is verified, the body validated, and a timestamped record is
//! appended to a single log file.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod recorder;
pub mod server;
pub mod validation;

pub use error::SinkError;
