//! Vendor units (°F, inHg, mph, inches) to metric.

use crate::rounding::to_fixed;
use crate::snapshot::Snapshot;

pub const HPA_PER_INHG: f64 = 33.8638815;
pub const MS_PER_MPH: f64 = 0.44704;
pub const KMH_PER_MPH: f64 = 1.60934;
pub const MM_PER_INCH: f64 = 25.4;

/// Decimal digits kept on every derived field.
pub const PRECISION: i32 = 2;

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    to_fixed((fahrenheit - 32.00) * 5.00 / 9.00, PRECISION)
}

pub fn inhg_to_hpa(inhg: f64) -> f64 {
    to_fixed(inhg * HPA_PER_INHG, PRECISION)
}

pub fn mph_to_ms(mph: f64) -> f64 {
    to_fixed(mph * MS_PER_MPH, PRECISION)
}

pub fn mph_to_kmh(mph: f64) -> f64 {
    to_fixed(mph * KMH_PER_MPH, PRECISION)
}

pub fn inches_to_mm(inches: f64) -> f64 {
    to_fixed(inches * MM_PER_INCH, PRECISION)
}

/// Recomputes every derived field of `snapshot` from its vendor field.
///
/// Overwrites all of them on each call; nothing is carried over from a previous
/// value.
pub fn derive(snapshot: &mut Snapshot) {
    let data = &mut snapshot.data;
    data.temperature_c = fahrenheit_to_celsius(data.temperature_f);
    data.pressure_hpa = inhg_to_hpa(data.pressure);

    let storm = &mut snapshot.storm;
    storm.wind_gust_ms = mph_to_ms(storm.wind_gust);
    storm.wind_gust_kmh = mph_to_kmh(storm.wind_gust);
    storm.sustained_wind_speed_ms = mph_to_ms(storm.sustained_wind_speed);
    storm.sustained_wind_speed_kmh = mph_to_kmh(storm.sustained_wind_speed);

    storm.rain_daily_mm = inches_to_mm(storm.rain_daily);
    storm.rain_rate_mm = inches_to_mm(storm.rain_rate);
    storm.rain_24h_mm = inches_to_mm(storm.rain_24h);
}
