// src/sink/mod.rs - Event delivery seam
pub mod channel;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::events::TelemetryEvent;

pub use channel::{ChannelSink, Delivered};

#[derive(Debug, Error)]
pub enum SinkError {
    /// A single delivery failed. Non-fatal: the driver logs it and
    /// keeps going, mirroring a transport error callback.
    #[error("delivery to '{topic}' failed: {reason}")]
    Delivery { topic: String, reason: String },

    /// The sink can accept no further events. Ends the run.
    #[error("sink closed")]
    Closed,
}

impl SinkError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SinkError::Closed)
    }
}

/// Destination for finished telemetry events.
///
/// Best-effort, one event at a time, addressed by topic and partition
/// key. Implementations own any buffering or retry policy; the engine
/// never retries.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(
        &self,
        topic: &str,
        key: &str,
        event: &TelemetryEvent,
    ) -> Result<(), SinkError>;
}

/// Writes each event as one line of JSON on stdout.
///
/// This is the journey's print-for-verification path; the topic only
/// shows up in trace logs.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for StdoutSink {
    async fn deliver(
        &self,
        topic: &str,
        key: &str,
        event: &TelemetryEvent,
    ) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(event).map_err(|e| SinkError::Delivery {
            topic: topic.to_string(),
            reason: e.to_string(),
        })?;
        line.push('\n');

        tracing::trace!(topic, key, kind = ?event.kind(), "emitting event");

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| SinkError::Delivery {
                topic: topic.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
