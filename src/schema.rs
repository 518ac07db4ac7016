//! Vendor key to field mapping for the skydata payload.
//!
//! Each record type lists its keys once, in wire order, in a static table. The
//! decoder walks the table to fill a record and the debug dump walks it to
//! rebuild the wire layout, so the key names live nowhere else.

use serde_json::{Map, Value};

use crate::snapshot::{Sky, Snapshot, Storm};

/// Whether a key is read from the payload or computed from another field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Vendor,
    Derived,
}

#[derive(Debug, Clone, Copy)]
pub struct Field<F> {
    pub key: &'static str,
    pub id: F,
    pub origin: Origin,
}

const fn vendor<F>(key: &'static str, id: F) -> Field<F> {
    Field { key, id, origin: Origin::Vendor }
}

const fn derived<F>(key: &'static str, id: F) -> Field<F> {
    Field { key, id, origin: Origin::Derived }
}

/// Mutable view of one field, typed by what the wire carries.
pub enum Slot<'a> {
    Number(&'a mut f64),
    Text(&'a mut String),
    Flag(&'a mut bool),
    TextList(&'a mut Vec<String>),
    Any(&'a mut Value),
    Sky(&'a mut Sky),
    Storm(&'a mut Storm),
}

impl<'a> Slot<'a> {
    /// The JSON type this slot accepts, for error messages.
    pub fn expected(&self) -> &'static str {
        match *self {
            Slot::Number(_) => "a number",
            Slot::Text(_) => "a string",
            Slot::Flag(_) => "a boolean",
            Slot::TextList(_) => "an array of strings",
            Slot::Any(_) => "any value",
            Slot::Sky(_) | Slot::Storm(_) => "an object",
        }
    }
}

pub trait Record {
    type Field: Copy + 'static;

    fn fields() -> &'static [Field<Self::Field>];

    fn slot(&mut self, field: Self::Field) -> Slot<'_>;

    fn value(&self, field: Self::Field) -> Value;
}

/// Every field of `record` under its wire key, derived fields included.
pub fn to_wire<R: Record>(record: &R) -> Map<String, Value> {
    R::fields()
        .iter()
        .map(|field| (field.key.to_string(), record.value(field.id)))
        .collect()
}

fn strings(list: &[String]) -> Value {
    Value::Array(list.iter().cloned().map(Value::String).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationField {
    Utc,
    CityName,
    Storm,
    Searchable,
    DeviceName,
    RegisterTime,
    Dst,
    BoundedPoint,
    Lon,
    Point,
    VideoList,
    VideoListC,
    DeviceId,
    NumOfFollowers,
    Lat,
    Alt,
    Data,
    FullAddress,
    StreetName,
    PreviewImageList,
    LastCall,
}

pub static STATION: &[Field<StationField>] = &[
    vendor("UTC", StationField::Utc),
    vendor("CityName", StationField::CityName),
    vendor("Storm", StationField::Storm),
    vendor("Searchable", StationField::Searchable),
    vendor("DeviceName", StationField::DeviceName),
    vendor("RegisterTime", StationField::RegisterTime),
    vendor("DST", StationField::Dst),
    vendor("BoundedPoint", StationField::BoundedPoint),
    vendor("LON", StationField::Lon),
    vendor("Point", StationField::Point),
    vendor("VideoList", StationField::VideoList),
    vendor("VideoList_C", StationField::VideoListC),
    vendor("DeviceID", StationField::DeviceId),
    vendor("NumOfFollowers", StationField::NumOfFollowers),
    vendor("LAT", StationField::Lat),
    vendor("ALT", StationField::Alt),
    vendor("Data", StationField::Data),
    vendor("FullAddress", StationField::FullAddress),
    vendor("StreetName", StationField::StreetName),
    vendor("PreviewImageList", StationField::PreviewImageList),
    derived("LastCall", StationField::LastCall),
];

impl Record for Snapshot {
    type Field = StationField;

    fn fields() -> &'static [Field<StationField>] {
        STATION
    }

    fn slot(&mut self, field: StationField) -> Slot<'_> {
        match field {
            StationField::Utc => Slot::Number(&mut self.utc),
            StationField::CityName => Slot::Text(&mut self.city_name),
            StationField::Storm => Slot::Storm(&mut self.storm),
            StationField::Searchable => Slot::Flag(&mut self.searchable),
            StationField::DeviceName => Slot::Text(&mut self.device_name),
            StationField::RegisterTime => Slot::Number(&mut self.register_time),
            StationField::Dst => Slot::Number(&mut self.dst),
            StationField::BoundedPoint => Slot::Text(&mut self.bounded_point),
            StationField::Lon => Slot::Number(&mut self.lon),
            StationField::Point => Slot::Any(&mut self.point),
            StationField::VideoList => Slot::TextList(&mut self.video_list),
            StationField::VideoListC => Slot::TextList(&mut self.video_list_c),
            StationField::DeviceId => Slot::Text(&mut self.device_id),
            StationField::NumOfFollowers => Slot::Number(&mut self.num_of_followers),
            StationField::Lat => Slot::Number(&mut self.lat),
            StationField::Alt => Slot::Number(&mut self.alt),
            StationField::Data => Slot::Sky(&mut self.data),
            StationField::FullAddress => Slot::Text(&mut self.full_address),
            StationField::StreetName => Slot::Text(&mut self.street_name),
            StationField::PreviewImageList => Slot::TextList(&mut self.preview_image_list),
            StationField::LastCall => Slot::Text(&mut self.last_call),
        }
    }

    fn value(&self, field: StationField) -> Value {
        match field {
            StationField::Utc => Value::from(self.utc),
            StationField::CityName => Value::from(self.city_name.as_str()),
            StationField::Storm => Value::Object(to_wire(&self.storm)),
            StationField::Searchable => Value::Bool(self.searchable),
            StationField::DeviceName => Value::from(self.device_name.as_str()),
            StationField::RegisterTime => Value::from(self.register_time),
            StationField::Dst => Value::from(self.dst),
            StationField::BoundedPoint => Value::from(self.bounded_point.as_str()),
            StationField::Lon => Value::from(self.lon),
            StationField::Point => self.point.clone(),
            StationField::VideoList => strings(&self.video_list),
            StationField::VideoListC => strings(&self.video_list_c),
            StationField::DeviceId => Value::from(self.device_id.as_str()),
            StationField::NumOfFollowers => Value::from(self.num_of_followers),
            StationField::Lat => Value::from(self.lat),
            StationField::Alt => Value::from(self.alt),
            StationField::Data => Value::Object(to_wire(&self.data)),
            StationField::FullAddress => Value::from(self.full_address.as_str()),
            StationField::StreetName => Value::from(self.street_name.as_str()),
            StationField::PreviewImageList => strings(&self.preview_image_list),
            StationField::LastCall => Value::from(self.last_call.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormField {
    UvIndex,
    WindDirection,
    WindGust,
    WindGustMs,
    WindGustKmh,
    SustainedWindSpeed,
    SustainedWindSpeedMs,
    SustainedWindSpeedKmh,
    RainDaily,
    RainDailyMm,
    RainRate,
    RainRateMm,
    Rain24h,
    Rain24hMm,
}

pub static STORM: &[Field<StormField>] = &[
    vendor("UVIndex", StormField::UvIndex),
    vendor("WindDirection", StormField::WindDirection),
    vendor("WindGust", StormField::WindGust),
    derived("WindGustms", StormField::WindGustMs),
    derived("WindGustkmh", StormField::WindGustKmh),
    vendor("SustainedWindSpeed", StormField::SustainedWindSpeed),
    derived("SustainedWindSpeedms", StormField::SustainedWindSpeedMs),
    derived("SustainedWindSpeedkmh", StormField::SustainedWindSpeedKmh),
    vendor("RainDaily", StormField::RainDaily),
    derived("RainDailymm", StormField::RainDailyMm),
    vendor("RainRate", StormField::RainRate),
    derived("RainRatemm", StormField::RainRateMm),
    vendor("24hRain", StormField::Rain24h),
    derived("Rainmm", StormField::Rain24hMm),
];

impl Record for Storm {
    type Field = StormField;

    fn fields() -> &'static [Field<StormField>] {
        STORM
    }

    fn slot(&mut self, field: StormField) -> Slot<'_> {
        match field {
            StormField::UvIndex => Slot::Text(&mut self.uv_index),
            StormField::WindDirection => Slot::Text(&mut self.wind_direction),
            StormField::WindGust => Slot::Number(&mut self.wind_gust),
            StormField::WindGustMs => Slot::Number(&mut self.wind_gust_ms),
            StormField::WindGustKmh => Slot::Number(&mut self.wind_gust_kmh),
            StormField::SustainedWindSpeed => Slot::Number(&mut self.sustained_wind_speed),
            StormField::SustainedWindSpeedMs => Slot::Number(&mut self.sustained_wind_speed_ms),
            StormField::SustainedWindSpeedKmh => Slot::Number(&mut self.sustained_wind_speed_kmh),
            StormField::RainDaily => Slot::Number(&mut self.rain_daily),
            StormField::RainDailyMm => Slot::Number(&mut self.rain_daily_mm),
            StormField::RainRate => Slot::Number(&mut self.rain_rate),
            StormField::RainRateMm => Slot::Number(&mut self.rain_rate_mm),
            StormField::Rain24h => Slot::Number(&mut self.rain_24h),
            StormField::Rain24hMm => Slot::Number(&mut self.rain_24h_mm),
        }
    }

    fn value(&self, field: StormField) -> Value {
        match field {
            StormField::UvIndex => Value::from(self.uv_index.as_str()),
            StormField::WindDirection => Value::from(self.wind_direction.as_str()),
            StormField::WindGust => Value::from(self.wind_gust),
            StormField::WindGustMs => Value::from(self.wind_gust_ms),
            StormField::WindGustKmh => Value::from(self.wind_gust_kmh),
            StormField::SustainedWindSpeed => Value::from(self.sustained_wind_speed),
            StormField::SustainedWindSpeedMs => Value::from(self.sustained_wind_speed_ms),
            StormField::SustainedWindSpeedKmh => Value::from(self.sustained_wind_speed_kmh),
            StormField::RainDaily => Value::from(self.rain_daily),
            StormField::RainDailyMm => Value::from(self.rain_daily_mm),
            StormField::RainRate => Value::from(self.rain_rate),
            StormField::RainRateMm => Value::from(self.rain_rate_mm),
            StormField::Rain24h => Value::from(self.rain_24h),
            StormField::Rain24hMm => Value::from(self.rain_24h_mm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyField {
    Luminance,
    Temperature,
    TemperatureC,
    ImageUrl,
    Ts,
    Rain,
    Humidity,
    Pressure,
    PressureHpa,
    DeviceType,
    Voltage,
    Night,
    UvIndex,
    ImageTs,
}

pub static SKY: &[Field<SkyField>] = &[
    vendor("Luminance", SkyField::Luminance),
    vendor("Temperature", SkyField::Temperature),
    derived("TemperatureC", SkyField::TemperatureC),
    vendor("ImageURL", SkyField::ImageUrl),
    vendor("TS", SkyField::Ts),
    vendor("Rain", SkyField::Rain),
    vendor("Humidity", SkyField::Humidity),
    vendor("Pressure", SkyField::Pressure),
    derived("Pressurehpa", SkyField::PressureHpa),
    vendor("DeviceType", SkyField::DeviceType),
    vendor("Voltage", SkyField::Voltage),
    vendor("Night", SkyField::Night),
    vendor("UVIndex", SkyField::UvIndex),
    vendor("ImageTS", SkyField::ImageTs),
];

impl Record for Sky {
    type Field = SkyField;

    fn fields() -> &'static [Field<SkyField>] {
        SKY
    }

    fn slot(&mut self, field: SkyField) -> Slot<'_> {
        match field {
            SkyField::Luminance => Slot::Number(&mut self.luminance),
            SkyField::Temperature => Slot::Number(&mut self.temperature_f),
            SkyField::TemperatureC => Slot::Number(&mut self.temperature_c),
            SkyField::ImageUrl => Slot::Text(&mut self.image_url),
            SkyField::Ts => Slot::Number(&mut self.ts),
            SkyField::Rain => Slot::Flag(&mut self.rain),
            SkyField::Humidity => Slot::Number(&mut self.humidity),
            SkyField::Pressure => Slot::Number(&mut self.pressure),
            SkyField::PressureHpa => Slot::Number(&mut self.pressure_hpa),
            SkyField::DeviceType => Slot::Text(&mut self.device_type),
            SkyField::Voltage => Slot::Number(&mut self.voltage),
            SkyField::Night => Slot::Flag(&mut self.night),
            SkyField::UvIndex => Slot::Number(&mut self.uv_index),
            SkyField::ImageTs => Slot::Number(&mut self.image_ts),
        }
    }

    fn value(&self, field: SkyField) -> Value {
        match field {
            SkyField::Luminance => Value::from(self.luminance),
            SkyField::Temperature => Value::from(self.temperature_f),
            SkyField::TemperatureC => Value::from(self.temperature_c),
            SkyField::ImageUrl => Value::from(self.image_url.as_str()),
            SkyField::Ts => Value::from(self.ts),
            SkyField::Rain => Value::Bool(self.rain),
            SkyField::Humidity => Value::from(self.humidity),
            SkyField::Pressure => Value::from(self.pressure),
            SkyField::PressureHpa => Value::from(self.pressure_hpa),
            SkyField::DeviceType => Value::from(self.device_type.as_str()),
            SkyField::Voltage => Value::from(self.voltage),
            SkyField::Night => Value::Bool(self.night),
            SkyField::UvIndex => Value::from(self.uv_index),
            SkyField::ImageTs => Value::from(self.image_ts),
        }
    }
}
