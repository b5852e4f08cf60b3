// src/events/mod.rs - Telemetry event model and wire format
pub mod synthesizer;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::sim::Coordinate;

pub use synthesizer::{EventSynthesizer, VehicleProfile};

/// The five sensor feeds one synthesis round produces.
///
/// Field names below are the wire contract: consumers depend on the
/// exact JSON keys, including the historical mix of camelCase and
/// snake_case across feeds. Do not normalize them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    VehicleState,
    GpsPing,
    CameraSnapshot,
    WeatherReading,
    IncidentReport,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::VehicleState,
        EventKind::GpsPing,
        EventKind::CameraSnapshot,
        EventKind::WeatherReading,
        EventKind::IncidentReport,
    ];
}

/// Position, motion and fixed descriptive attributes of the vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleState {
    pub id: Uuid,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub location: Coordinate,
    pub speed: f64,
    pub direction: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(rename = "fuelType")]
    pub fuel_type: String,
}

/// Positioning ping from the on-board GPS device.
#[derive(Debug, Clone, Serialize)]
pub struct GpsPing {
    pub id: Uuid,
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
    pub direction: String,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
}

/// Snapshot notification from a roadside traffic camera. The payload
/// is an opaque placeholder, not a decodable image.
#[derive(Debug, Clone, Serialize)]
pub struct CameraSnapshot {
    pub id: Uuid,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "cameraId")]
    pub camera_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub snapshot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snow,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snow,
    ];
}

/// Ambient weather reading at the vehicle's position.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReading {
    pub id: Uuid,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub location: Coordinate,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    #[serde(rename = "weatherCondition")]
    pub condition: WeatherCondition,
    pub precipitation: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    pub humidity: u8,
    #[serde(rename = "airQualityIndex")]
    pub air_quality_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncidentType {
    Accident,
    Fire,
    Medical,
    Police,
    None,
}

impl IncidentType {
    pub const ALL: [IncidentType; 5] = [
        IncidentType::Accident,
        IncidentType::Fire,
        IncidentType::Medical,
        IncidentType::Police,
        IncidentType::None,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncidentStatus {
    Active,
    Resolved,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 2] = [IncidentStatus::Active, IncidentStatus::Resolved];
}

/// Emergency-incident report near the vehicle's position.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentReport {
    pub id: Uuid,
    pub device_id: String,
    #[serde(rename = "incidentId")]
    pub incident_id: Uuid,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub timestamp: DateTime<Utc>,
    pub location: Coordinate,
    pub status: IncidentStatus,
    pub description: String,
}

/// One telemetry event of any kind. Serializes untagged: the wire
/// carries the flat per-kind object, no envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TelemetryEvent {
    VehicleState(VehicleState),
    GpsPing(GpsPing),
    CameraSnapshot(CameraSnapshot),
    WeatherReading(WeatherReading),
    IncidentReport(IncidentReport),
}

impl TelemetryEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            TelemetryEvent::VehicleState(_) => EventKind::VehicleState,
            TelemetryEvent::GpsPing(_) => EventKind::GpsPing,
            TelemetryEvent::CameraSnapshot(_) => EventKind::CameraSnapshot,
            TelemetryEvent::WeatherReading(_) => EventKind::WeatherReading,
            TelemetryEvent::IncidentReport(_) => EventKind::IncidentReport,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            TelemetryEvent::VehicleState(e) => e.id,
            TelemetryEvent::GpsPing(e) => e.id,
            TelemetryEvent::CameraSnapshot(e) => e.id,
            TelemetryEvent::WeatherReading(e) => e.id,
            TelemetryEvent::IncidentReport(e) => e.id,
        }
    }

    pub fn device_id(&self) -> &str {
        match self {
            TelemetryEvent::VehicleState(e) => &e.device_id,
            TelemetryEvent::GpsPing(e) => &e.device_id,
            TelemetryEvent::CameraSnapshot(e) => &e.device_id,
            TelemetryEvent::WeatherReading(e) => &e.device_id,
            TelemetryEvent::IncidentReport(e) => &e.device_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            TelemetryEvent::VehicleState(e) => e.timestamp,
            TelemetryEvent::GpsPing(e) => e.timestamp,
            TelemetryEvent::CameraSnapshot(e) => e.timestamp,
            TelemetryEvent::WeatherReading(e) => e.timestamp,
            TelemetryEvent::IncidentReport(e) => e.timestamp,
        }
    }
}

/// The correlated five-event output of one synthesis round. All five
/// share the round's timestamp and device identity; constructing the
/// bundle cannot partially fail.
#[derive(Debug, Clone)]
pub struct EventBundle {
    pub vehicle_state: VehicleState,
    pub gps_ping: GpsPing,
    pub camera_snapshot: CameraSnapshot,
    pub weather_reading: WeatherReading,
    pub incident_report: IncidentReport,
}

impl EventBundle {
    /// The bundle as individual events, in feed order.
    pub fn into_events(self) -> [TelemetryEvent; 5] {
        [
            TelemetryEvent::VehicleState(self.vehicle_state),
            TelemetryEvent::GpsPing(self.gps_ping),
            TelemetryEvent::CameraSnapshot(self.camera_snapshot),
            TelemetryEvent::WeatherReading(self.weather_reading),
            TelemetryEvent::IncidentReport(self.incident_report),
        ]
    }
}
