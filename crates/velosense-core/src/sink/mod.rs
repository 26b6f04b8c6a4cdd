//! Sinks receive decoded measurements and diagnostics.
//!
//! The capability set mirrors what the sensor host expects: a header once,
//! measurements as they arrive, free-form messages, and a final shutdown.

mod csv;
mod jsonl;
mod memory;

pub use csv::CsvSink;
pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Measurement;

pub trait Sink {
    fn write_header(&mut self, fields: &[&str]) -> Result<(), SinkError>;
    fn write_measurement(&mut self, measurement: &Measurement) -> Result<(), SinkError>;
    fn send_msg(&mut self, msg: &SinkMessage) -> Result<(), SinkError>;
    fn shutdown(&mut self) -> Result<(), SinkError>;
}

impl<K: Sink + ?Sized> Sink for &mut K {
    fn write_header(&mut self, fields: &[&str]) -> Result<(), SinkError> {
        (**self).write_header(fields)
    }

    fn write_measurement(&mut self, measurement: &Measurement) -> Result<(), SinkError> {
        (**self).write_measurement(measurement)
    }

    fn send_msg(&mut self, msg: &SinkMessage) -> Result<(), SinkError> {
        (**self).send_msg(msg)
    }

    fn shutdown(&mut self) -> Result<(), SinkError> {
        (**self).shutdown()
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sink already shut down")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl From<MessageLevel> for log::Level {
    fn from(value: MessageLevel) -> Self {
        match value {
            MessageLevel::Info => log::Level::Info,
            MessageLevel::Warning => log::Level::Warn,
            MessageLevel::Error => log::Level::Error,
        }
    }
}

/// Diagnostic forwarded to the sensor host.
///
/// # Examples
/// ```
/// use velosense_core::sink::{MessageLevel, SinkMessage};
///
/// let msg = SinkMessage::warning("radar frame too short");
/// let json = serde_json::to_string(&msg).unwrap();
/// assert_eq!(json, r#"{"type":"log","level":"warning","msg":"radar frame too short"}"#);
/// assert_eq!(msg.level, MessageLevel::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub level: MessageLevel,
    pub msg: String,
}

impl SinkMessage {
    pub fn log(level: MessageLevel, msg: impl Into<String>) -> Self {
        Self {
            kind: "log".to_string(),
            level,
            msg: msg.into(),
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self::log(MessageLevel::Info, msg)
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::log(MessageLevel::Warning, msg)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::log(MessageLevel::Error, msg)
    }
}
