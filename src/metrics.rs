//! Prometheus view of a station.

use prometheus::{Encoder, GaugeVec, IntGauge, Opts, Registry, TextEncoder};

use crate::errors::*;
use crate::fetch::Transport;
use crate::snapshot::Snapshot;
use crate::station::{Observation, Station};

const LABELS: &[&str] = &["device_id", "city"];

type Reading = fn(&Snapshot) -> f64;

const READINGS: &[(&str, &str, Reading)] = &[
    (
        "bloomsky_temperature_celsius",
        "The temperature in degrees C at the station",
        Snapshot::temperature_celsius,
    ),
    (
        "bloomsky_humidity_percent",
        "The humidity in % at the station",
        Snapshot::humidity,
    ),
    (
        "bloomsky_pressure_hpa",
        "The pressure in hPa at the station",
        Snapshot::pressure_hpa,
    ),
    (
        "bloomsky_luminance",
        "The luminance at the station",
        Snapshot::luminance,
    ),
    (
        "bloomsky_uv_index",
        "The UV index measured by the SKY",
        Snapshot::sky_uv_index,
    ),
    (
        "bloomsky_voltage",
        "The SKY battery voltage",
        Snapshot::voltage,
    ),
    (
        "bloomsky_wind_gust_ms",
        "The wind gust in m/s",
        Snapshot::wind_gust_ms,
    ),
    (
        "bloomsky_sustained_wind_speed_ms",
        "The sustained wind speed in m/s",
        Snapshot::sustained_wind_speed_ms,
    ),
    (
        "bloomsky_rain_daily_mm",
        "The rain of the day in mm",
        Snapshot::rain_daily_mm,
    ),
    (
        "bloomsky_rain_rate_mm",
        "The rain rate in mm",
        Snapshot::rain_rate_mm,
    ),
    (
        "bloomsky_rain_24h_mm",
        "The rain over the last 24h in mm",
        Snapshot::rain_mm,
    ),
    (
        "bloomsky_raining",
        "1 when the SKY reports rain",
        raining,
    ),
    (
        "bloomsky_night",
        "1 when the SKY reports night",
        night,
    ),
];

fn raining(snapshot: &Snapshot) -> f64 {
    if snapshot.is_rain() { 1.0 } else { 0.0 }
}

fn night(snapshot: &Snapshot) -> f64 {
    if snapshot.is_night() { 1.0 } else { 0.0 }
}

pub struct StationMetrics {
    readings: Vec<(GaugeVec, Reading)>,
    fetch_attempts: IntGauge,
    up: IntGauge,
    registry: Registry,
}

impl StationMetrics {
    pub fn new() -> Result<StationMetrics> {
        let registry = Registry::new();

        let mut readings = Vec::with_capacity(READINGS.len());
        for &(name, help, reading) in READINGS {
            let gauge = GaugeVec::new(Opts::new(name, help), LABELS)?;
            registry.register(Box::new(gauge.clone()))?;
            readings.push((gauge, reading));
        }

        let fetch_attempts = IntGauge::new(
            "bloomsky_fetch_attempts",
            "Calls made to the BloomSky API during the last scrape",
        )?;
        registry.register(Box::new(fetch_attempts.clone()))?;

        let up = IntGauge::new("bloomsky_up", "1 when the last scrape decoded fresh data")?;
        registry.register(Box::new(up.clone()))?;

        Ok(StationMetrics {
            readings,
            fetch_attempts,
            up,
            registry,
        })
    }

    /// Publishes `observation`. A stale observation only moves `bloomsky_up` and
    /// `bloomsky_fetch_attempts`; the readings keep their previous values.
    pub fn record(&self, observation: &Observation) {
        self.fetch_attempts.set(i64::from(observation.attempts));
        if !observation.fresh {
            self.up.set(0);
            return;
        }

        let snapshot = &observation.snapshot;
        let labels = [snapshot.device_id(), snapshot.city()];
        for (gauge, reading) in &self.readings {
            gauge.with_label_values(&labels).set(reading(snapshot));
        }
        self.up.set(1);
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![];
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }

    /// One observation of `station`, encoded in the text exposition format.
    pub fn scrape<T: Transport>(&self, station: &Station<T>) -> Result<Vec<u8>> {
        let observation = station.observe()?;
        self.record(&observation);
        self.encode()
    }
}
