/// Weather data acquisition: geocoding, current conditions, soil moisture.
///
/// All three upstream services are reached through one `WeatherClient`,
/// which owns the HTTP client and the credentials. Calls are plain GETs with
/// no caching and no retries.
use reqwest::Client;

use crate::config::{Config, Endpoints};
use crate::errors::AppError;

pub mod current;
pub mod geocode;
pub mod report;
pub mod soil;
pub mod types;

pub use report::parse_weather_report;
pub use types::{Coordinates, QueryResult, SoilMoistureReading, WeatherReading, WeatherReport};

const USER_AGENT: &str = concat!("agriweather/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    geocoding_url: String,
    weather_url: String,
    soil_moisture_url: String,
    google_maps_token: String,
    openweather_api_key: String,
}

impl WeatherClient {
    pub fn new(
        endpoints: &Endpoints,
        google_maps_token: String,
        openweather_api_key: String,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            geocoding_url: endpoints.geocoding_url.clone(),
            weather_url: endpoints.weather_url.clone(),
            soil_moisture_url: endpoints.soil_moisture_url.clone(),
            google_maps_token,
            openweather_api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            &config.endpoints,
            config.google_maps_token.clone(),
            config.openweather_api_key.clone(),
        )
    }
}
