//! Geocoder: resolves a free-text address to coordinates (Google Geocoding API).

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::weather::types::Coordinates;
use crate::weather::WeatherClient;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl WeatherClient {
    /// Resolves `address` to the first match the provider returns.
    /// The address is passed through as-is, empty strings included.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, AppError> {
        debug!("Geocoding address: {address}");

        let raw = self
            .client
            .get(&self.geocoding_url)
            .query(&[("address", address), ("key", self.google_maps_token.as_str())])
            .send()
            .await?
            .text()
            .await?;
        let body: GeocodeResponse = serde_json::from_str(&raw)
            .map_err(|e| AppError::geocoding("INVALID_RESPONSE", e.to_string()))?;

        if body.status != "OK" {
            return Err(AppError::geocoding(
                body.status,
                body.error_message.unwrap_or_default(),
            ));
        }

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::geocoding("ZERO_RESULTS", "provider returned no results"))?;

        let coordinates = Coordinates::new(first.geometry.location.lat, first.geometry.location.lng);
        if !coordinates.is_valid() {
            return Err(AppError::geocoding(
                "INVALID_RESULT",
                format!("coordinates out of range: {coordinates}"),
            ));
        }
        info!("Geocoded '{address}' to {coordinates}");
        Ok(coordinates)
    }
}
