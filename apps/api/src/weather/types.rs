use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::weather::report::format_number;

/// Sentinel shown in place of a soil reading. Not an error.
pub const SOIL_MOISTURE_UNAVAILABLE: &str =
    "No soil moisture data available for the specified location.";

/// A resolved point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Prompt-facing form: `Lat: 48.8566, Lon: 2.3522`.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.4}, Lon: {:.4}", self.latitude, self.longitude)
    }
}

/// Current conditions, metric units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// A reading plus the display text generated from it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub reading: WeatherReading,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SoilMoistureReading {
    /// Volumetric water content of the top centimetre, m³/m³.
    Measured {
        coordinates: Coordinates,
        value_m3_m3: f64,
    },
    Unavailable,
}

impl fmt::Display for SoilMoistureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilMoistureReading::Measured {
                coordinates,
                value_m3_m3,
            } => write!(
                f,
                "Soil Moisture at coordinates ({}, {}): {} m³/m³",
                format_number(coordinates.latitude),
                format_number(coordinates.longitude),
                format_number(*value_m3_m3)
            ),
            SoilMoistureReading::Unavailable => f.write_str(SOIL_MOISTURE_UNAVAILABLE),
        }
    }
}

/// Everything gathered for one analysis request. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub location: String,
    pub coordinates: Coordinates,
    pub weather: WeatherReading,
    pub soil_moisture: SoilMoistureReading,
    /// Display text of the weather report, shown as raw data.
    pub weather_info: String,
    pub generated_at: DateTime<Local>,
}

impl QueryResult {
    /// Timestamp in the form embedded in the prompt and reports.
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
