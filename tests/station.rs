#[macro_use]
extern crate error_chain;

use std::cell::Cell;
use std::time::Duration;

use bloomsky::errors::*;
use bloomsky::metrics::StationMetrics;
use bloomsky::{Headers, RetryPolicy, Station, Transport};

const PAYLOAD: &str = r#"[{
    "DeviceID": "442C05954A59", "CityName": "Namur", "DeviceName": "Garden",
    "Data": {"Temperature": 70.2, "Pressure": 29.92, "Humidity": 64, "Rain": true, "TS": 1476799442},
    "Storm": {"WindGust": 3.2, "SustainedWindSpeed": 1.5, "RainDaily": 0.12, "24hRain": 0.5}
}]"#;

/// Fails the first `failures` calls, then serves `body`.
struct Scripted {
    failures: u32,
    body: &'static str,
    calls: Cell<u32>,
}

impl Scripted {
    fn new(failures: u32, body: &'static str) -> Scripted {
        Scripted { failures, body, calls: Cell::new(0) }
    }
}

impl Transport for Scripted {
    fn fetch(&self, _url: &str, headers: &Headers) -> Result<Vec<u8>> {
        assert_eq!(headers["Authorization"], vec!["token".to_string()]);
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() <= self.failures {
            bail!("503 Service Unavailable");
        }
        Ok(self.body.as_bytes().to_vec())
    }
}

fn station(transport: &Scripted) -> Station<&Scripted> {
    Station::with_transport("https://api.bloomsky.com/api/skydata/", "token", transport).retry_policy(
        RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_millis(0),
        },
    )
}

#[test]
fn decodes_the_first_successful_answer() {
    let transport = Scripted::new(2, PAYLOAD);
    let observation = station(&transport).observe().unwrap();

    assert_eq!(transport.calls.get(), 3);
    assert_eq!(observation.attempts, 3);
    assert!(observation.fresh);
    assert_eq!(observation.snapshot.device_id(), "442C05954A59");
    assert_eq!(observation.snapshot.temperature_celsius(), 21.22);
    assert!(!observation.snapshot.last_call().is_empty());
}

#[test]
fn unreachable_station_yields_the_zero_record() {
    let transport = Scripted::new(u32::MAX, PAYLOAD);
    let snapshot = station(&transport).fetch_snapshot().unwrap();

    assert_eq!(transport.calls.get(), 5);
    assert_eq!(snapshot.device_id(), "");
    assert_eq!(snapshot.humidity(), 0.0);
    assert_eq!(snapshot.temperature_celsius(), -17.78);
    assert_eq!(snapshot.last_call(), "");
}

#[test]
fn contract_break_is_an_error() {
    let transport = Scripted::new(0, r#"{"DeviceID": "442C05954A59"}"#);
    let err = station(&transport).fetch_snapshot().unwrap_err();

    assert_eq!(transport.calls.get(), 1);
    assert!(err.is_structural());
}

#[test]
fn scrape_publishes_the_observation() {
    let transport = Scripted::new(1, PAYLOAD);
    let metrics = StationMetrics::new().unwrap();
    let text = String::from_utf8(metrics.scrape(&station(&transport)).unwrap()).unwrap();

    assert!(text.contains(r#"bloomsky_pressure_hpa{city="Namur",device_id="442C05954A59"} 1013.21"#));
    assert!(text.contains(r#"bloomsky_rain_24h_mm{city="Namur",device_id="442C05954A59"} 12.7"#));
    assert!(text.contains("bloomsky_fetch_attempts 2"));
    assert!(text.contains("bloomsky_up 1"));
}

#[test]
fn scrape_fails_on_a_contract_break() {
    let transport = Scripted::new(0, "[]");
    let metrics = StationMetrics::new().unwrap();
    let err = metrics.scrape(&station(&transport)).unwrap_err();

    assert!(matches!(*err.kind(), ErrorKind::ShapeMismatch(_)));
}
