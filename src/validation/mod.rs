//! Request validation for `/log`.

pub mod request;

pub use request::{validate, ValidatedRequest};
