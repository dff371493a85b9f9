//! The fixed-format weather text block: built from a reading for display,
//! and parsed back into a reading.
//!
//! Parsing is strict. A line whose value will not convert, or a label that
//! never appears, fails the whole parse and no partial reading escapes.

use crate::errors::AppError;
use crate::weather::types::{Coordinates, WeatherReading};

const DESCRIPTION_LABEL: &str = "Description:";
const TEMPERATURE_LABEL: &str = "Temperature:";
const FEELS_LIKE_LABEL: &str = "Feels like:";
const HUMIDITY_LABEL: &str = "Humidity:";
const WIND_SPEED_LABEL: &str = "Wind speed:";

const CELSIUS_SUFFIX: &str = "°C";
const PERCENT_SUFFIX: &str = "%";
const SPEED_SUFFIX: &str = " m/s";

/// Builds the multi-line block shown to the user and sent to the model.
pub fn format_weather_report(coordinates: &Coordinates, reading: &WeatherReading) -> String {
    format!(
        "Weather at coordinates ({}, {}):\n\
         Description: {}\n\
         Temperature: {}°C\n\
         Feels like: {}°C\n\
         Humidity: {}%\n\
         Wind speed: {} m/s",
        format_number(coordinates.latitude),
        format_number(coordinates.longitude),
        reading.description,
        format_number(reading.temperature_c),
        format_number(reading.feels_like_c),
        reading.humidity_pct,
        format_number(reading.wind_speed_mps),
    )
}

/// Parses a block produced by [`format_weather_report`].
pub fn parse_weather_report(text: &str) -> Result<WeatherReading, AppError> {
    let mut fields = ReportFields::default();

    for line in text.lines() {
        let line = line.trim_start();
        if line.starts_with(DESCRIPTION_LABEL) {
            fields.description = Some(field_value(line)?.to_string());
        } else if line.starts_with(TEMPERATURE_LABEL) {
            fields.temperature_c = Some(parse_float(line, CELSIUS_SUFFIX)?);
        } else if line.starts_with(FEELS_LIKE_LABEL) {
            fields.feels_like_c = Some(parse_float(line, CELSIUS_SUFFIX)?);
        } else if line.starts_with(HUMIDITY_LABEL) {
            let raw = numeric_value(line, PERCENT_SUFFIX)?;
            let humidity = raw
                .parse::<u8>()
                .map_err(|e| AppError::Parse(format!("invalid humidity '{raw}': {e}")))?;
            fields.humidity_pct = Some(humidity);
        } else if line.starts_with(WIND_SPEED_LABEL) {
            fields.wind_speed_mps = Some(parse_float(line, SPEED_SUFFIX)?);
        }
    }

    fields.into_reading()
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Provider text as it appears on the `Description:` line: whitespace runs,
/// line breaks included, collapse to one space and the first letter is
/// capitalised. The parser reads back exactly this value.
pub fn normalize_description(raw: &str) -> String {
    let single_line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize(&single_line)
}

/// Shortest round-trip form, always with a fractional part: `15.0`, `21.37`.
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') && !text.contains('e') {
        format!("{text}.0")
    } else {
        text
    }
}

#[derive(Default)]
struct ReportFields {
    description: Option<String>,
    temperature_c: Option<f64>,
    feels_like_c: Option<f64>,
    humidity_pct: Option<u8>,
    wind_speed_mps: Option<f64>,
}

impl ReportFields {
    fn into_reading(self) -> Result<WeatherReading, AppError> {
        Ok(WeatherReading {
            description: self.description.ok_or_else(|| missing(DESCRIPTION_LABEL))?,
            temperature_c: self.temperature_c.ok_or_else(|| missing(TEMPERATURE_LABEL))?,
            feels_like_c: self.feels_like_c.ok_or_else(|| missing(FEELS_LIKE_LABEL))?,
            humidity_pct: self.humidity_pct.ok_or_else(|| missing(HUMIDITY_LABEL))?,
            wind_speed_mps: self.wind_speed_mps.ok_or_else(|| missing(WIND_SPEED_LABEL))?,
        })
    }
}

fn missing(label: &str) -> AppError {
    AppError::Parse(format!("missing '{label}' line"))
}

/// Text after the first `": "`, trimmed.
fn field_value(line: &str) -> Result<&str, AppError> {
    line.split_once(": ")
        .map(|(_, value)| value.trim())
        .ok_or_else(|| AppError::Parse(format!("no value separator in line '{line}'")))
}

fn numeric_value<'a>(line: &'a str, unit: &str) -> Result<&'a str, AppError> {
    let value = field_value(line)?;
    Ok(value.strip_suffix(unit).unwrap_or(value).trim())
}

fn parse_float(line: &str, unit: &str) -> Result<f64, AppError> {
    let raw = numeric_value(line, unit)?;
    raw.parse::<f64>()
        .map_err(|e| AppError::Parse(format!("invalid number '{raw}' in line '{line}': {e}")))
}
