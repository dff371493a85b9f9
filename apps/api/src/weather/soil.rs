//! Soil Moisture Fetcher: first hourly top-layer reading from Open-Meteo.
//!
//! Missing data is not an error: anything short of a numeric first value
//! degrades to `SoilMoistureReading::Unavailable`.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::weather::types::{Coordinates, SoilMoistureReading};
use crate::weather::WeatherClient;

pub const SOIL_MOISTURE_FIELD: &str = "soil_moisture_0_1cm";

// Fixed calendar day, kept as deployed. Not derived from the request date.
pub const SOIL_WINDOW_START: &str = "2024-10-19T00:00";
pub const SOIL_WINDOW_END: &str = "2024-10-19T23:00";

#[derive(Debug, Deserialize)]
struct SoilMoistureResponse {
    hourly: Option<HourlySoil>,
}

#[derive(Debug, Deserialize)]
struct HourlySoil {
    soil_moisture_0_1cm: Option<Vec<Option<f64>>>,
}

impl WeatherClient {
    pub async fn fetch_soil_moisture(
        &self,
        coordinates: &Coordinates,
    ) -> Result<SoilMoistureReading, AppError> {
        debug!("Fetching soil moisture for {coordinates}");

        let body = self
            .client
            .get(&self.soil_moisture_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", SOIL_MOISTURE_FIELD.to_string()),
                ("start", SOIL_WINDOW_START.to_string()),
                ("end", SOIL_WINDOW_END.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .text()
            .await?;

        let parsed = match serde_json::from_str::<SoilMoistureResponse>(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Soil moisture response not understood: {e}");
                return Ok(SoilMoistureReading::Unavailable);
            }
        };

        Ok(first_reading(parsed, *coordinates))
    }
}

fn first_reading(response: SoilMoistureResponse, coordinates: Coordinates) -> SoilMoistureReading {
    let value = response
        .hourly
        .and_then(|hourly| hourly.soil_moisture_0_1cm)
        .and_then(|values| values.into_iter().next())
        .flatten();

    match value {
        Some(value_m3_m3) => SoilMoistureReading::Measured {
            coordinates,
            value_m3_m3,
        },
        None => SoilMoistureReading::Unavailable,
    }
}
