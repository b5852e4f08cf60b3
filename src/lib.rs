// src/lib.rs - Correlated vehicle telemetry simulator
//
// Synthesizes a correlated multi-sensor stream for one simulated
// vehicle journey: vehicle state, GPS pings, traffic-camera snapshots,
// weather readings and emergency incidents, all derived from a shared
// simulation clock and position and handed to a pluggable sink.

pub mod config;
pub mod events;
pub mod journey;
pub mod sim;
pub mod sink;

pub use config::Config;
pub use events::{EventBundle, EventSynthesizer, TelemetryEvent};
pub use journey::{JourneyDriver, JourneyReport, StopPolicy};
pub use sim::{Coordinate, SimulationClock, SimulationPosition, SimulationState};
pub use sink::{ChannelSink, EventSink, SinkError, StdoutSink};
