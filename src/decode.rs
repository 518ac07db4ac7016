use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::errors::*;
use crate::schema::{Origin, Record, Slot};
use crate::snapshot::Snapshot;
use crate::units;

/// Format of the `LastCall` stamp.
pub const LAST_CALL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decodes a skydata payload, stamping `LastCall` with the current local time.
pub fn decode_snapshot(body: &[u8]) -> Result<Snapshot> {
    decode_snapshot_at(body, Local::now())
}

/// Decodes a skydata payload: a JSON array whose first element is the station.
///
/// Any structural problem (not JSON, not an array, empty array, a field of the
/// wrong type) is an error; a zero-valued record is never returned for a bad
/// payload.
pub fn decode_snapshot_at(body: &[u8], now: DateTime<Local>) -> Result<Snapshot> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|e| Error::from(ErrorKind::MalformedPayload(e.to_string())))?;

    let stations = match document {
        Value::Array(stations) => stations,
        other => return Err(ErrorKind::ShapeMismatch(describe(&other).to_string()).into()),
    };
    if stations.len() > 1 {
        warn!("Payload lists {} stations, only the first is used", stations.len());
    }
    let station = match stations.into_iter().next() {
        Some(Value::Object(station)) => station,
        Some(other) => {
            let found = format!("an array of {}", describe(&other));
            return Err(ErrorKind::ShapeMismatch(found).into());
        }
        None => return Err(ErrorKind::ShapeMismatch("an empty array".to_string()).into()),
    };

    let mut snapshot = Snapshot::default();
    fill(&mut snapshot, &station, "")?;
    units::derive(&mut snapshot);

    snapshot.log_dump();
    snapshot.last_call = now.format(LAST_CALL_FORMAT).to_string();

    Ok(snapshot)
}

/// Copies the vendor keys of `object` into `record`. Missing keys and nulls keep
/// the zero value; unknown keys are ignored.
fn fill<R: Record>(record: &mut R, object: &Map<String, Value>, path: &str) -> Result<()> {
    for field in R::fields().iter().filter(|f| f.origin == Origin::Vendor) {
        let value = match object.get(field.key) {
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };
        let key = format!("{}{}", path, field.key);
        let slot = record.slot(field.id);
        let expected = slot.expected();
        let mismatch = || Error::from(ErrorKind::FieldType(key.clone(), expected));

        match slot {
            Slot::Number(target) => *target = value.as_f64().ok_or_else(mismatch)?,
            Slot::Text(target) => *target = value.as_str().ok_or_else(mismatch)?.to_string(),
            Slot::Flag(target) => *target = value.as_bool().ok_or_else(mismatch)?,
            Slot::TextList(target) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                *target = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string).ok_or_else(mismatch))
                    .collect::<Result<_>>()?;
            }
            Slot::Any(target) => *target = value.clone(),
            Slot::Sky(sky) => fill(sky, value.as_object().ok_or_else(mismatch)?, &format!("{}.", key))?,
            Slot::Storm(storm) => {
                fill(storm, value.as_object().ok_or_else(mismatch)?, &format!("{}.", key))?
            }
        }
    }
    Ok(())
}

fn describe(value: &Value) -> &'static str {
    match *value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAYLOAD: &str = r#"[{
        "UTC": 2, "CityName": "Namur", "Searchable": true, "DeviceName": "Garden",
        "RegisterTime": 1486993540, "DST": 1, "BoundedPoint": "", "LON": 4.86,
        "Point": {}, "VideoList": ["http://v/1.mp4"], "VideoList_C": [],
        "DeviceID": "442C05954A59", "NumOfFollowers": 2, "LAT": 50.46, "ALT": 82,
        "FullAddress": "Rue 1, Namur", "StreetName": "Rue 1", "PreviewImageList": [],
        "Data": {"Luminance": 1250, "Temperature": 70.2, "ImageURL": "http://img/1.jpg",
                 "TS": 1476799442, "Rain": false, "Humidity": 64, "Pressure": 29.92,
                 "DeviceType": "SKY2", "Voltage": 2611, "Night": false, "UVIndex": 1,
                 "ImageTS": 1476799400},
        "Storm": {"UVIndex": "1", "WindDirection": "NW", "WindGust": 3.2,
                  "SustainedWindSpeed": 1.5, "RainDaily": 0.12, "RainRate": 0.02,
                  "24hRain": 0.5}
    }]"#;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn decodes_vendor_fields_as_received() {
        let snapshot = decode_snapshot(PAYLOAD.as_bytes()).unwrap();
        assert_eq!(snapshot.device_id(), "442C05954A59");
        assert_eq!(snapshot.device_type(), "SKY2");
        assert_eq!(snapshot.temperature_fahrenheit(), 70.2);
        assert_eq!(snapshot.pressure_inhg(), 29.92);
        assert_eq!(snapshot.luminance(), 1250.0);
        assert_eq!(snapshot.voltage(), 2611.0);
        assert_eq!(snapshot.wind_gust_mph(), 3.2);
        assert_eq!(snapshot.video_list, vec!["http://v/1.mp4".to_string()]);
        assert_eq!(snapshot.point, Value::Object(Map::new()));
        assert!(snapshot.searchable);
    }

    #[test]
    fn derives_metric_fields() {
        let snapshot = decode_snapshot(PAYLOAD.as_bytes()).unwrap();
        assert_eq!(snapshot.temperature_celsius(), 21.22);
        assert_eq!(snapshot.pressure_hpa(), 1013.21);
        assert_eq!(snapshot.wind_gust_ms(), 1.43);
        assert_eq!(snapshot.wind_gust_kmh(), 5.15);
        assert_eq!(snapshot.sustained_wind_speed_ms(), 0.67);
        assert_eq!(snapshot.sustained_wind_speed_kmh(), 2.41);
        assert_eq!(snapshot.rain_daily_mm(), 3.05);
        assert_eq!(snapshot.rain_rate_mm(), 0.51);
        assert_eq!(snapshot.rain_mm(), 12.7);
    }

    #[test]
    fn only_last_call_depends_on_the_clock() {
        let first = decode_snapshot_at(PAYLOAD.as_bytes(), at(1_500_000_000)).unwrap();
        let mut second = decode_snapshot_at(PAYLOAD.as_bytes(), at(1_600_000_000)).unwrap();
        assert_ne!(first.last_call(), second.last_call());

        second.last_call = first.last_call.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn stamps_last_call() {
        let now = at(1_500_000_000);
        let snapshot = decode_snapshot_at(PAYLOAD.as_bytes(), now).unwrap();
        assert_eq!(snapshot.last_call(), now.format("%Y-%m-%d %H:%M:%S").to_string());
    }

    #[test]
    fn derived_keys_in_the_payload_are_ignored() {
        let body = r#"[{"Data": {"Temperature": 50, "TemperatureC": 99}}]"#;
        let snapshot = decode_snapshot(body.as_bytes()).unwrap();
        assert_eq!(snapshot.temperature_celsius(), 10.0);
    }

    #[test]
    fn missing_and_null_fields_stay_zero() {
        let body = r#"[{"DeviceID": null, "Data": {"Humidity": 40}}]"#;
        let snapshot = decode_snapshot(body.as_bytes()).unwrap();
        assert_eq!(snapshot.device_id(), "");
        assert_eq!(snapshot.humidity(), 40.0);
        assert_eq!(snapshot.wind_gust_mph(), 0.0);
        assert_eq!(snapshot.temperature_celsius(), -17.78);
    }

    #[test]
    fn first_of_several_stations_wins() {
        let body = r#"[{"DeviceID": "A"}, {"DeviceID": "B"}]"#;
        assert_eq!(decode_snapshot(body.as_bytes()).unwrap().device_id(), "A");
    }

    #[test]
    fn object_instead_of_array_is_rejected() {
        let body = PAYLOAD.trim().trim_start_matches('[').trim_end_matches(']');
        let err = decode_snapshot(body.as_bytes()).unwrap_err();
        match *err.kind() {
            ErrorKind::ShapeMismatch(ref found) => assert_eq!(found, "an object"),
            ref other => panic!("unexpected error: {}", other),
        }
        assert!(err.is_structural());
    }

    #[test]
    fn empty_array_is_rejected() {
        let err = decode_snapshot(b"[]").unwrap_err();
        assert!(matches!(*err.kind(), ErrorKind::ShapeMismatch(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        for body in &[&b""[..], &b"not json"[..], &b"[{\"DeviceID\": "[..]] {
            let err = decode_snapshot(body).unwrap_err();
            assert!(matches!(*err.kind(), ErrorKind::MalformedPayload(_)));
        }
        let err = decode_snapshot(b"[42]").unwrap_err();
        assert!(matches!(*err.kind(), ErrorKind::ShapeMismatch(_)));
    }

    #[test]
    fn wrong_field_type_names_the_key() {
        let body = r#"[{"Storm": {"WindGust": "fast"}}]"#;
        let err = decode_snapshot(body.as_bytes()).unwrap_err();
        match *err.kind() {
            ErrorKind::FieldType(ref key, expected) => {
                assert_eq!(key, "Storm.WindGust");
                assert_eq!(expected, "a number");
            }
            ref other => panic!("unexpected error: {}", other),
        }
    }
}
