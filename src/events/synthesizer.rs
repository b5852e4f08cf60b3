// src/events/synthesizer.rs - Per-round event bundle synthesis
use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::events::{
    CameraSnapshot, EventBundle, GpsPing, IncidentReport, IncidentStatus, IncidentType,
    VehicleState, WeatherCondition, WeatherReading,
};
use crate::sim::Coordinate;

/// Heading label shared by the vehicle-state and GPS feeds. The route
/// is a fixed straight line, so the heading never changes.
const DIRECTION: &str = "North-East";

/// Stand-in for an encoded camera frame; consumers treat it as opaque.
const SNAPSHOT_PLACEHOLDER: &str = "Base64EncodedString";

const INCIDENT_DESCRIPTION: &str = "Description of the incident";

/// Fixed descriptive attributes of the one simulated vehicle.
#[derive(Debug, Clone)]
pub struct VehicleProfile {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub fuel_type: String,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            make: "BMW".to_string(),
            model: "C500".to_string(),
            year: 2024,
            fuel_type: "Hybrid".to_string(),
        }
    }
}

/// Derives one correlated five-event bundle from a shared timestamp
/// and position.
///
/// Pure with respect to its explicit inputs apart from the injected
/// random source; it never reads or mutates the simulation state
/// directly. Randomized fields are drawn independently per event.
#[derive(Debug, Clone)]
pub struct EventSynthesizer {
    profile: VehicleProfile,
    vehicle_type: String,
}

impl EventSynthesizer {
    pub fn new(profile: VehicleProfile) -> Self {
        Self {
            profile,
            vehicle_type: "private".to_string(),
        }
    }

    /// Produce exactly one event of each kind for this round. Always
    /// succeeds; the bundle is all-or-nothing.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        position: Coordinate,
        rng: &mut R,
    ) -> EventBundle {
        EventBundle {
            vehicle_state: self.vehicle_state(device_id, timestamp, position, rng),
            gps_ping: self.gps_ping(device_id, timestamp, rng),
            camera_snapshot: self.camera_snapshot(device_id, timestamp, rng),
            weather_reading: self.weather_reading(device_id, timestamp, position, rng),
            incident_report: self.incident_report(device_id, timestamp, position, rng),
        }
    }

    fn vehicle_state<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        position: Coordinate,
        rng: &mut R,
    ) -> VehicleState {
        VehicleState {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            timestamp,
            location: position,
            speed: rng.random_range(10.0..=40.0),
            direction: DIRECTION.to_string(),
            make: self.profile.make.clone(),
            model: self.profile.model.clone(),
            year: self.profile.year,
            fuel_type: self.profile.fuel_type.clone(),
        }
    }

    fn gps_ping<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        rng: &mut R,
    ) -> GpsPing {
        GpsPing {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            timestamp,
            speed: rng.random_range(0.0..=40.0),
            direction: DIRECTION.to_string(),
            vehicle_type: self.vehicle_type.clone(),
        }
    }

    fn camera_snapshot<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        _rng: &mut R,
    ) -> CameraSnapshot {
        CameraSnapshot {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            camera_id: Uuid::new_v4(),
            timestamp,
            snapshot: SNAPSHOT_PLACEHOLDER.to_string(),
        }
    }

    fn weather_reading<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        position: Coordinate,
        rng: &mut R,
    ) -> WeatherReading {
        WeatherReading {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            location: position,
            timestamp,
            temperature: rng.random_range(-5.0..=26.0),
            condition: pick(&WeatherCondition::ALL, rng),
            precipitation: rng.random_range(0.0..=100.0),
            wind_speed: rng.random_range(0.0..=100.0),
            humidity: rng.random_range(0..=100),
            air_quality_index: rng.random_range(0.0..=500.0),
        }
    }

    fn incident_report<R: Rng + ?Sized>(
        &self,
        device_id: &str,
        timestamp: DateTime<Utc>,
        position: Coordinate,
        rng: &mut R,
    ) -> IncidentReport {
        IncidentReport {
            id: Uuid::new_v4(),
            device_id: device_id.to_string(),
            incident_id: Uuid::new_v4(),
            incident_type: pick(&IncidentType::ALL, rng),
            timestamp,
            location: position,
            status: pick(&IncidentStatus::ALL, rng),
            description: INCIDENT_DESCRIPTION.to_string(),
        }
    }
}

impl Default for EventSynthesizer {
    fn default() -> Self {
        Self::new(VehicleProfile::default())
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(choices: &[T], rng: &mut R) -> T {
    choices[rng.random_range(0..choices.len())]
}
