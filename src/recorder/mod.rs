//! Event Recorder
//!
//! Stamps accepted events with the current time and appends them to the
//! log store.

pub mod record;
pub mod store;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StorageError;

pub use record::LogRecord;
pub use store::LogStore;

/// Returned once a record is durably on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAck {
    pub ts: i64,
}

#[derive(Clone, Debug)]
pub struct EventRecorder {
    store: LogStore,
}

impl EventRecorder {
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }

    /// Build a record for `subject` and append it.
    ///
    /// Nothing is buffered between calls: on `Ok` the line has been synced,
    /// on `Err` no line was produced by this call.
    pub async fn record(
        &self,
        subject: String,
        payload: Map<String, Value>,
    ) -> Result<RecordAck, StorageError> {
        let ts = Utc::now().timestamp_millis();
        let record = LogRecord::new(ts, subject, payload);

        let line = record
            .to_line()
            .map_err(|e| StorageError::WriteFailure {
                path: self.store.path().to_path_buf(),
                source: e.into(),
            })?;

        self.store.append(&line).await?;

        debug!(sub = %record.sub, ts, "Recorded event");
        Ok(RecordAck { ts })
    }
}
