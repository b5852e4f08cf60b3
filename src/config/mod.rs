// src/config/mod.rs - Layered simulator configuration
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::events::EventKind;
use crate::sim::Coordinate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Full simulator configuration. Read once at startup, immutable for
/// the life of the run. File values are overridden by environment
/// variables, which are overridden by CLI flags.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub route: RouteConfig,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub topics: TopicsConfig,
}

/// Journey behavior: identity, pacing, stop policy inputs, RNG seed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_device_id")]
    pub device_id: String,

    /// Delay between synthesis rounds, in milliseconds.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,

    /// Stop after this many rounds. Unset means unbounded.
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// Stop after this much wall-clock time, in seconds. Unset means
    /// unbounded. When both caps are set, whichever hits first wins.
    #[serde(default)]
    pub max_duration_secs: Option<u64>,

    /// Seed for the single run-wide random source. Unset seeds from
    /// the OS; set makes the whole run reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The fixed straight-line route the position interpolates along.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    #[serde(default = "default_origin")]
    pub origin: Coordinate,

    #[serde(default = "default_destination")]
    pub destination: Coordinate,

    #[serde(default = "default_step_count")]
    pub step_count: u32,

    /// Symmetric per-axis jitter bound in degrees.
    #[serde(default = "default_jitter")]
    pub jitter_degrees: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransportConfig {
    #[serde(default = "default_bootstrap_servers")]
    pub bootstrap_servers: String,
}

/// Destination topic per sensor feed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopicsConfig {
    #[serde(default = "default_vehicle_topic")]
    pub vehicle: String,
    #[serde(default = "default_gps_topic")]
    pub gps: String,
    #[serde(default = "default_traffic_topic")]
    pub traffic: String,
    #[serde(default = "default_weather_topic")]
    pub weather: String,
    #[serde(default = "default_emergency_topic")]
    pub emergency: String,
}

impl TopicsConfig {
    pub fn for_kind(&self, kind: EventKind) -> &str {
        match kind {
            EventKind::VehicleState => &self.vehicle,
            EventKind::GpsPing => &self.gps,
            EventKind::CameraSnapshot => &self.traffic,
            EventKind::WeatherReading => &self.weather,
            EventKind::IncidentReport => &self.emergency,
        }
    }
}

// Default value functions
fn default_device_id() -> String {
    "Vehicle-Sim-001".to_string()
}
fn default_pace_ms() -> u64 {
    1000
}
fn default_origin() -> Coordinate {
    // London
    Coordinate::new(51.5074, -0.1278)
}
fn default_destination() -> Coordinate {
    // Birmingham
    Coordinate::new(52.4862, -1.8904)
}
fn default_step_count() -> u32 {
    100
}
fn default_jitter() -> f64 {
    0.0005
}
fn default_bootstrap_servers() -> String {
    "localhost:9092".to_string()
}
fn default_vehicle_topic() -> String {
    "vehicle_data".to_string()
}
fn default_gps_topic() -> String {
    "gps_data".to_string()
}
fn default_traffic_topic() -> String {
    "traffic_data".to_string()
}
fn default_weather_topic() -> String {
    "weather_data".to_string()
}
fn default_emergency_topic() -> String {
    "emergency_data".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            pace_ms: default_pace_ms(),
            max_iterations: None,
            max_duration_secs: None,
            seed: None,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            destination: default_destination(),
            step_count: default_step_count(),
            jitter_degrees: default_jitter(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: default_bootstrap_servers(),
        }
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            vehicle: default_vehicle_topic(),
            gps: default_gps_topic(),
            traffic: default_traffic_topic(),
            weather: default_weather_topic(),
            emergency: default_emergency_topic(),
        }
    }
}

impl Config {
    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file falls back to
    /// defaults (still honoring environment overrides).
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// Environment variables take precedence over file values. The
    /// variable names match the original deployment surface.
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 7] = [
            (
                "KAFKA_BOOTSTRAP_SERVERS",
                &mut self.transport.bootstrap_servers,
            ),
            ("DEVICE_ID", &mut self.simulation.device_id),
            ("VEHICLE_TOPIC", &mut self.topics.vehicle),
            ("GPS_TOPIC", &mut self.topics.gps),
            ("TRAFFIC_TOPIC", &mut self.topics.traffic),
            ("WEATHER_TOPIC", &mut self.topics.weather),
            ("EMERGENCY_TOPIC", &mut self.topics.emergency),
        ];
        for (name, slot) in overrides {
            if let Ok(value) = std::env::var(name) {
                *slot = value;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.device_id.is_empty() {
            return Err(ConfigError::Invalid("device_id cannot be empty".into()));
        }
        if self.route.step_count == 0 {
            return Err(ConfigError::Invalid("step_count must be positive".into()));
        }
        if self.route.jitter_degrees < 0.0 {
            return Err(ConfigError::Invalid(
                "jitter_degrees cannot be negative".into(),
            ));
        }
        if let Some(0) = self.simulation.max_iterations {
            return Err(ConfigError::Invalid(
                "max_iterations must be at least 1 when set".into(),
            ));
        }
        for kind in EventKind::ALL {
            if self.topics.for_kind(kind).is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "topic for {kind:?} cannot be empty"
                )));
            }
        }
        Ok(())
    }
}
