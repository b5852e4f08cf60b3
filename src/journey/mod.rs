// src/journey/mod.rs - The journey control loop
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::{Config, TopicsConfig};
use crate::events::EventSynthesizer;
use crate::sim::{Route, SimulationClock, SimulationPosition, SimulationState};
use crate::sink::{EventSink, SinkError};

#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// When the journey loop should stop on its own. External cancellation
/// is separate and always available. With several caps set, whichever
/// is hit first wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopPolicy {
    max_rounds: Option<u64>,
    max_duration: Option<Duration>,
}

impl StopPolicy {
    /// Stop after `n` synthesis rounds. `iterations(1)` reproduces the
    /// reference single-shot behavior.
    pub fn iterations(n: u64) -> Self {
        Self {
            max_rounds: Some(n),
            max_duration: None,
        }
    }

    /// Stop once this much wall-clock time has elapsed.
    pub fn duration(d: Duration) -> Self {
        Self {
            max_rounds: None,
            max_duration: Some(d),
        }
    }

    /// Run until externally cancelled.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_rounds: config.simulation.max_iterations,
            max_duration: config
                .simulation
                .max_duration_secs
                .map(Duration::from_secs),
        }
    }

    fn satisfied(&self, rounds_done: u64, elapsed: Duration) -> bool {
        if let Some(max) = self.max_rounds
            && rounds_done >= max
        {
            return true;
        }
        if let Some(max) = self.max_duration
            && elapsed >= max
        {
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyState {
    Running,
    Stopped,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct JourneyReport {
    pub rounds: u64,
    pub events_delivered: u64,
    pub delivery_failures: u64,
    pub cancelled: bool,
}

/// Requests a clean stop of a running journey. Observed at iteration
/// boundaries only, so in-flight state is never corrupted.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn signal(&self) {
        let _ = self.tx.send(());
    }
}

/// Drives one simulated vehicle journey.
///
/// Owns the simulation state, the synthesizer, a single run-wide
/// random source, and the sink handle. Each iteration advances the
/// clock, advances the position, synthesizes the five-event bundle,
/// and delivers every event before pacing and re-checking the stop
/// conditions.
pub struct JourneyDriver {
    device_id: String,
    topics: TopicsConfig,
    state: SimulationState,
    synthesizer: EventSynthesizer,
    sink: Arc<dyn EventSink>,
    policy: StopPolicy,
    pace: Duration,
    rng: StdRng,
    run_state: JourneyState,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl JourneyDriver {
    pub fn new(config: &Config, sink: Arc<dyn EventSink>) -> Self {
        let route = Route::new(
            config.route.origin,
            config.route.destination,
            config.route.step_count,
        );
        let state = SimulationState::new(
            SimulationClock::starting_now(),
            SimulationPosition::new(route, config.route.jitter_degrees),
        );
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            device_id: config.simulation.device_id.clone(),
            topics: config.topics.clone(),
            state,
            synthesizer: EventSynthesizer::default(),
            sink,
            policy: StopPolicy::from_config(config),
            pace: Duration::from_millis(config.simulation.pace_ms),
            rng,
            run_state: JourneyState::Running,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Replace the stop policy derived from configuration.
    pub fn with_policy(mut self, policy: StopPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    pub fn state(&self) -> JourneyState {
        self.run_state
    }

    /// Run the journey to completion.
    ///
    /// Returns the report on stop-policy satisfaction or cancellation;
    /// returns an error only when the sink becomes unusable. Individual
    /// delivery failures are logged and counted, never fatal.
    pub async fn run(&mut self) -> Result<JourneyReport, JourneyError> {
        self.run_state = JourneyState::Running;
        let started = Instant::now();
        let mut report = JourneyReport::default();

        tracing::info!(device_id = %self.device_id, "journey started");

        loop {
            if self.policy.satisfied(report.rounds, started.elapsed()) {
                break;
            }
            if self.shutdown_rx.try_recv().is_ok() {
                report.cancelled = true;
                break;
            }

            let timestamp = self.state.clock.advance(&mut self.rng);
            let position = self.state.position.advance(&mut self.rng);
            let bundle =
                self.synthesizer
                    .synthesize(&self.device_id, timestamp, position, &mut self.rng);

            for event in bundle.into_events() {
                let topic = self.topics.for_kind(event.kind());
                match self.sink.deliver(topic, &self.device_id, &event).await {
                    Ok(()) => report.events_delivered += 1,
                    Err(err) if err.is_fatal() => {
                        tracing::error!(topic, %err, "sink unusable, ending journey");
                        self.run_state = JourneyState::Stopped;
                        return Err(err.into());
                    }
                    Err(err) => {
                        tracing::warn!(topic, %err, "event delivery failed");
                        report.delivery_failures += 1;
                    }
                }
            }
            report.rounds += 1;

            if self.policy.satisfied(report.rounds, started.elapsed()) {
                break;
            }
            if !self.pace.is_zero() {
                tokio::select! {
                    _ = self.shutdown_rx.recv() => {
                        report.cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.pace) => {}
                }
            }
        }

        self.run_state = JourneyState::Stopped;
        if report.cancelled {
            tracing::info!(rounds = report.rounds, "journey cancelled");
        } else {
            tracing::info!(
                rounds = report.rounds,
                events = report.events_delivered,
                failures = report.delivery_failures,
                "journey finished"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ChannelSink;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.simulation.device_id = "V-1".to_string();
        config.simulation.pace_ms = 0;
        config.simulation.seed = Some(21);
        config
    }

    #[tokio::test]
    async fn single_iteration_delivers_exactly_five_events() {
        let (sink, mut rx) = ChannelSink::unbounded();
        let mut driver = JourneyDriver::new(&test_config(), Arc::new(sink))
            .with_policy(StopPolicy::iterations(1));

        let report = driver.run().await.unwrap();
        assert_eq!(report.rounds, 1);
        assert_eq!(report.events_delivered, 5);
        assert_eq!(driver.state(), JourneyState::Stopped);

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn closed_sink_ends_the_run_with_an_error() {
        let (sink, rx) = ChannelSink::unbounded();
        drop(rx);
        let mut driver = JourneyDriver::new(&test_config(), Arc::new(sink))
            .with_policy(StopPolicy::iterations(3));

        let err = driver.run().await.unwrap_err();
        assert!(matches!(err, JourneyError::Sink(SinkError::Closed)));
        assert_eq!(driver.state(), JourneyState::Stopped);
    }

    #[tokio::test]
    async fn cancellation_stops_at_an_iteration_boundary() {
        let (sink, mut rx) = ChannelSink::unbounded();
        let mut config = test_config();
        config.simulation.pace_ms = 5;
        let mut driver = JourneyDriver::new(&config, Arc::new(sink));
        let handle = driver.shutdown_handle();

        let runner = tokio::spawn(async move { driver.run().await });
        // Let at least one round complete before cancelling.
        let first = rx.recv().await.unwrap();
        assert_eq!(first.key, "V-1");
        handle.signal();

        let report = runner.await.unwrap().unwrap();
        assert!(report.cancelled);
        assert!(report.rounds >= 1);
        // Full bundles only: cancellation never splits a round.
        assert_eq!(report.events_delivered % 5, 0);
    }

    #[test]
    fn stop_policy_prefers_whichever_cap_hits_first() {
        let policy = StopPolicy {
            max_rounds: Some(10),
            max_duration: Some(Duration::from_secs(60)),
        };
        assert!(policy.satisfied(10, Duration::from_secs(1)));
        assert!(policy.satisfied(2, Duration::from_secs(61)));
        assert!(!policy.satisfied(2, Duration::from_secs(1)));
        assert!(!StopPolicy::unbounded().satisfied(1_000_000, Duration::from_secs(3600)));
    }
}
