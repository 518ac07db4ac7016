//! One observation from a SKY/STORM station.
//!
//! Fields hold the vendor units exactly as received. The derived metric fields
//! (`temperature_c`, `pressure_hpa`, the `_ms`/`_kmh`/`_mm` variants) are a cache
//! filled in by the decoder from their vendor field; nothing outside this crate can
//! set them, and a new observation always produces a new `Snapshot`.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::schema;

/// Multiplier behind the two `legacy_*_ms` accessors.
pub const LEGACY_MPH_FACTOR: f64 = 1.61;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub(crate) utc: f64,
    pub(crate) city_name: String,
    pub(crate) storm: Storm,
    pub(crate) searchable: bool,
    pub(crate) device_name: String,
    pub(crate) register_time: f64,
    pub(crate) dst: f64,
    pub(crate) bounded_point: String,
    pub(crate) lon: f64,
    pub(crate) point: Value,
    pub(crate) video_list: Vec<String>,
    pub(crate) video_list_c: Vec<String>,
    pub(crate) device_id: String,
    pub(crate) num_of_followers: f64,
    pub(crate) lat: f64,
    pub(crate) alt: f64,
    pub(crate) data: Sky,
    pub(crate) full_address: String,
    pub(crate) street_name: String,
    pub(crate) preview_image_list: Vec<String>,
    pub(crate) last_call: String,
}

/// The STORM add-on: wind and rain gauge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Storm {
    pub(crate) uv_index: String,
    pub(crate) wind_direction: String,
    pub(crate) wind_gust: f64,
    pub(crate) wind_gust_ms: f64,
    pub(crate) wind_gust_kmh: f64,
    pub(crate) sustained_wind_speed: f64,
    pub(crate) sustained_wind_speed_ms: f64,
    pub(crate) sustained_wind_speed_kmh: f64,
    pub(crate) rain_daily: f64,
    pub(crate) rain_daily_mm: f64,
    pub(crate) rain_rate: f64,
    pub(crate) rain_rate_mm: f64,
    pub(crate) rain_24h: f64,
    pub(crate) rain_24h_mm: f64,
}

/// The SKY unit itself: camera, thermometer, barometer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sky {
    pub(crate) luminance: f64,
    pub(crate) temperature_f: f64,
    pub(crate) temperature_c: f64,
    pub(crate) image_url: String,
    pub(crate) ts: f64,
    pub(crate) rain: bool,
    pub(crate) humidity: f64,
    pub(crate) pressure: f64,
    pub(crate) pressure_hpa: f64,
    pub(crate) device_type: String,
    pub(crate) voltage: f64,
    pub(crate) night: bool,
    pub(crate) uv_index: f64,
    pub(crate) image_ts: f64,
}

impl Snapshot {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn device_type(&self) -> &str {
        &self.data.device_type
    }

    pub fn city(&self) -> &str {
        &self.city_name
    }

    pub fn full_address(&self) -> &str {
        &self.full_address
    }

    pub fn latitude(&self) -> f64 {
        self.lat
    }

    pub fn longitude(&self) -> f64 {
        self.lon
    }

    pub fn altitude(&self) -> f64 {
        self.alt
    }

    pub fn utc_offset(&self) -> f64 {
        self.utc
    }

    pub fn register_time(&self) -> f64 {
        self.register_time
    }

    pub fn num_of_followers(&self) -> i64 {
        self.num_of_followers as i64
    }

    /// Time of the observation, from the `TS` epoch seconds.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.data.ts as i64, 0).single()
    }

    pub fn image_url(&self) -> &str {
        &self.data.image_url
    }

    pub fn image_timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.data.image_ts as i64, 0).single()
    }

    /// Local wall-clock time of the decode, `YYYY-MM-DD HH:MM:SS`. Empty when the
    /// snapshot was not decoded from a payload.
    pub fn last_call(&self) -> &str {
        &self.last_call
    }

    /// UV index from 1 to 11 as reported by the STORM.
    pub fn uv_index(&self) -> &str {
        &self.storm.uv_index
    }

    /// UV index as measured by the SKY.
    pub fn sky_uv_index(&self) -> f64 {
        self.data.uv_index
    }

    pub fn is_night(&self) -> bool {
        self.data.night
    }

    pub fn is_rain(&self) -> bool {
        self.data.rain
    }

    pub fn luminance(&self) -> f64 {
        self.data.luminance
    }

    pub fn voltage(&self) -> f64 {
        self.data.voltage
    }

    pub fn humidity(&self) -> f64 {
        self.data.humidity
    }

    pub fn temperature_fahrenheit(&self) -> f64 {
        self.data.temperature_f
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.data.temperature_c
    }

    pub fn pressure_inhg(&self) -> f64 {
        self.data.pressure
    }

    pub fn pressure_hpa(&self) -> f64 {
        self.data.pressure_hpa
    }

    /// Compass point (N, NE, ...).
    pub fn wind_direction(&self) -> &str {
        &self.storm.wind_direction
    }

    pub fn wind_gust_mph(&self) -> f64 {
        self.storm.wind_gust
    }

    pub fn wind_gust_ms(&self) -> f64 {
        self.storm.wind_gust_ms
    }

    pub fn wind_gust_kmh(&self) -> f64 {
        self.storm.wind_gust_kmh
    }

    /// Wind gust as `mph * 1.61`, unrounded.
    ///
    /// Not a real m/s figure (1.61 is closer to the km/h factor) and kept apart
    /// from [`wind_gust_ms`](#method.wind_gust_ms).
    pub fn legacy_wind_gust_ms(&self) -> f64 {
        self.storm.wind_gust * LEGACY_MPH_FACTOR
    }

    pub fn sustained_wind_speed_mph(&self) -> f64 {
        self.storm.sustained_wind_speed
    }

    pub fn sustained_wind_speed_ms(&self) -> f64 {
        self.storm.sustained_wind_speed_ms
    }

    pub fn sustained_wind_speed_kmh(&self) -> f64 {
        self.storm.sustained_wind_speed_kmh
    }

    /// Sustained wind speed as `mph * 1.61`, unrounded. Same caveat as
    /// [`legacy_wind_gust_ms`](#method.legacy_wind_gust_ms).
    pub fn legacy_sustained_wind_speed_ms(&self) -> f64 {
        self.storm.sustained_wind_speed * LEGACY_MPH_FACTOR
    }

    pub fn rain_daily_in(&self) -> f64 {
        self.storm.rain_daily
    }

    pub fn rain_daily_mm(&self) -> f64 {
        self.storm.rain_daily_mm
    }

    pub fn rain_rate_in(&self) -> f64 {
        self.storm.rain_rate
    }

    pub fn rain_rate_mm(&self) -> f64 {
        self.storm.rain_rate_mm
    }

    /// Rain over the last 24 hours.
    pub fn rain_in(&self) -> f64 {
        self.storm.rain_24h
    }

    pub fn rain_mm(&self) -> f64 {
        self.storm.rain_24h_mm
    }

    /// The whole record in the vendor's JSON layout, derived fields included.
    pub fn to_wire(&self) -> Value {
        Value::Object(schema::to_wire(self))
    }

    pub fn dump(&self) -> String {
        // A Value tree built in-process always serializes.
        serde_json::to_string_pretty(&self.to_wire()).expect("snapshot serializes to JSON")
    }

    pub fn log_dump(&self) {
        if log_enabled!(log::Level::Debug) {
            debug!("Decode:> \n{}", self.dump());
        }
    }
}
