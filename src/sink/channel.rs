// src/sink/channel.rs - In-process channel sink
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::TelemetryEvent;
use crate::sink::{EventSink, SinkError};

/// One delivered event together with its addressing.
#[derive(Debug, Clone)]
pub struct Delivered {
    pub topic: String,
    pub key: String,
    pub event: TelemetryEvent,
}

/// Hands events to another task over a tokio channel.
///
/// Useful for piping the stream into an in-process consumer and for
/// driver tests. A dropped receiver surfaces as [`SinkError::Closed`],
/// which the driver treats as unrecoverable.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Delivered>,
}

impl ChannelSink {
    pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<Delivered>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn deliver(
        &self,
        topic: &str,
        key: &str,
        event: &TelemetryEvent,
    ) -> Result<(), SinkError> {
        self.tx
            .send(Delivered {
                topic: topic.to_string(),
                key: key.to_string(),
                event: event.clone(),
            })
            .map_err(|_| SinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventSynthesizer, TelemetryEvent};
    use crate::sim::Coordinate;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_event() -> TelemetryEvent {
        let mut rng = StdRng::seed_from_u64(5);
        let bundle = EventSynthesizer::default().synthesize(
            "V-1",
            Utc::now(),
            Coordinate::new(51.5074, -0.1278),
            &mut rng,
        );
        TelemetryEvent::GpsPing(bundle.gps_ping)
    }

    #[tokio::test]
    async fn delivers_with_topic_and_key() {
        let (sink, mut rx) = ChannelSink::unbounded();
        sink.deliver("gps_data", "V-1", &sample_event())
            .await
            .unwrap();

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.topic, "gps_data");
        assert_eq!(delivered.key, "V-1");
        assert_eq!(delivered.event.device_id(), "V-1");
    }

    #[tokio::test]
    async fn dropped_receiver_reports_closed() {
        let (sink, rx) = ChannelSink::unbounded();
        drop(rx);

        let err = sink
            .deliver("gps_data", "V-1", &sample_event())
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
