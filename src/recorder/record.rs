//! Log Record
//!
//! One accepted event, serialized as a single JSONL line.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};

/// Canonical log line: `{"ts": <ms>, "sub": "<subject>", "payload": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    pub sub: String,
    pub payload: Map<String, Value>,
}

impl LogRecord {
    pub fn new(ts: i64, sub: String, payload: Map<String, Value>) -> Self {
        Self { ts, sub, payload }
    }

    /// Serialize to one newline-terminated line.
    pub fn to_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = Vec::with_capacity(128);
        self.serialize(&mut Serializer::with_formatter(&mut line, SpacedFormatter))?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Single-line output with `", "` between items and `": "` after keys.
/// Non-ASCII text is written as raw UTF-8.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
