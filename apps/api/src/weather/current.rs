//! Weather Fetcher: current conditions from OpenWeatherMap, metric units.

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::weather::report::{format_weather_report, normalize_description};
use crate::weather::types::{Coordinates, WeatherReading, WeatherReport};
use crate::weather::WeatherClient;

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: MainBlock,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

impl WeatherClient {
    /// Fetches current conditions and builds the display block from them.
    pub async fn fetch_weather(&self, coordinates: &Coordinates) -> Result<WeatherReport, AppError> {
        debug!("Fetching current weather for {coordinates}");

        let response = self
            .client
            .get(&self.weather_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.openweather_api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(AppError::WeatherService(message));
        }

        let raw = response.text().await?;
        let body: CurrentWeatherResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::WeatherService(format!("unexpected response body: {e}")))?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| AppError::WeatherService("response contained no conditions".into()))?;

        let reading = WeatherReading {
            description: normalize_description(&condition.description),
            temperature_c: body.main.temp,
            feels_like_c: body.main.feels_like,
            humidity_pct: body.main.humidity,
            wind_speed_mps: body.wind.speed,
        };
        info!(
            "Current weather: {} {}°C, humidity {}%",
            reading.description, reading.temperature_c, reading.humidity_pct
        );

        let text = format_weather_report(coordinates, &reading);
        Ok(WeatherReport { reading, text })
    }
}
