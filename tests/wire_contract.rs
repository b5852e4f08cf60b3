// The serialized JSON shape is the contract downstream consumers
// parse; these tests pin the exact field names per feed.

use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use telemetry_sim::events::{EventBundle, EventSynthesizer};
use telemetry_sim::sim::Coordinate;

fn sample_bundle() -> EventBundle {
    let mut rng = StdRng::seed_from_u64(8);
    EventSynthesizer::default().synthesize(
        "V-1",
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        Coordinate::new(51.5074, -0.1278),
        &mut rng,
    )
}

fn keys_of(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

fn sorted(mut names: Vec<&str>) -> Vec<String> {
    names.sort();
    names.into_iter().map(str::to_string).collect()
}

#[test]
fn vehicle_state_field_names() {
    let json = serde_json::to_value(sample_bundle().vehicle_state).unwrap();
    assert_eq!(
        keys_of(&json),
        sorted(vec![
            "id", "deviceId", "timestamp", "location", "speed", "direction", "make", "model",
            "year", "fuelType",
        ])
    );
}

#[test]
fn gps_ping_field_names() {
    let json = serde_json::to_value(sample_bundle().gps_ping).unwrap();
    assert_eq!(
        keys_of(&json),
        sorted(vec![
            "id",
            "device_id",
            "timestamp",
            "speed",
            "direction",
            "vehicleType",
        ])
    );
}

#[test]
fn camera_snapshot_field_names() {
    let json = serde_json::to_value(sample_bundle().camera_snapshot).unwrap();
    assert_eq!(
        keys_of(&json),
        sorted(vec!["id", "deviceId", "cameraId", "timestamp", "snapshot"])
    );
    assert_eq!(json["snapshot"], "Base64EncodedString");
}

#[test]
fn weather_reading_field_names() {
    let json = serde_json::to_value(sample_bundle().weather_reading).unwrap();
    assert_eq!(
        keys_of(&json),
        sorted(vec![
            "id",
            "deviceId",
            "location",
            "timestamp",
            "temperature",
            "weatherCondition",
            "precipitation",
            "windSpeed",
            "humidity",
            "airQualityIndex",
        ])
    );
    assert!(json["humidity"].is_u64());
}

#[test]
fn incident_report_field_names() {
    let json = serde_json::to_value(sample_bundle().incident_report).unwrap();
    assert_eq!(
        keys_of(&json),
        sorted(vec![
            "id",
            "device_id",
            "incidentId",
            "type",
            "timestamp",
            "location",
            "status",
            "description",
        ])
    );
    assert_eq!(json["description"], "Description of the incident");
}

#[test]
fn locations_are_nested_latitude_longitude_maps() {
    let json = serde_json::to_value(sample_bundle().vehicle_state).unwrap();
    assert_eq!(keys_of(&json["location"]), sorted(vec!["latitude", "longitude"]));
    assert_eq!(json["location"]["latitude"], 51.5074);
    assert_eq!(json["location"]["longitude"], -0.1278);
}

#[test]
fn timestamps_serialize_as_iso8601_text() {
    let json = serde_json::to_value(sample_bundle().gps_ping).unwrap();
    let raw = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(raw).is_ok(), "not ISO-8601: {raw}");
}

#[test]
fn categorical_fields_serialize_as_bare_labels() {
    let json = serde_json::to_value(sample_bundle().weather_reading).unwrap();
    let condition = json["weatherCondition"].as_str().unwrap();
    assert!(["Sunny", "Cloudy", "Rainy", "Snow"].contains(&condition));

    let json = serde_json::to_value(sample_bundle().incident_report).unwrap();
    let incident_type = json["type"].as_str().unwrap();
    assert!(["Accident", "Fire", "Medical", "Police", "None"].contains(&incident_type));
    let status = json["status"].as_str().unwrap();
    assert!(["Active", "Resolved"].contains(&status));
}

#[test]
fn untagged_event_enum_adds_no_envelope() {
    let bundle = sample_bundle();
    let direct = serde_json::to_value(&bundle.gps_ping).unwrap();
    let via_enum =
        serde_json::to_value(telemetry_sim::TelemetryEvent::GpsPing(bundle.gps_ping)).unwrap();
    assert_eq!(direct, via_enum);
}
