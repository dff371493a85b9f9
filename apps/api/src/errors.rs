use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Every failure of the analysis pipeline ends up here and is turned into a
/// user-visible message at the HTTP boundary. Nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    /// The geocoding provider rejected or could not resolve the address.
    #[error("Geocoding error: {status} - {message}")]
    Geocoding { status: String, message: String },

    /// The weather provider answered with a non-success status.
    #[error("Weather API error: {0}")]
    WeatherService(String),

    /// The weather text block did not match the expected line format.
    #[error("Weather parse error: {0}")]
    Parse(String),

    /// A prompt slot had no value bound to it.
    #[error("Prompt slot '{0}' has no value")]
    TemplateBinding(String),

    /// The language-model call failed.
    #[error("Model invocation error: {0}")]
    ModelInvocation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AppError {
    pub fn geocoding(status: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Geocoding {
            status: status.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Geocoding { status, message } => {
                tracing::warn!("Geocoding failed: {status} {message}");
                let detail = if message.is_empty() {
                    status.clone()
                } else {
                    format!("{status} - {message}")
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "GEOCODING_ERROR",
                    format!("Could not find coordinates for this location ({detail})."),
                )
            }
            AppError::WeatherService(msg) => {
                tracing::warn!("Weather service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "WEATHER_SERVICE_ERROR",
                    format!("Weather API error: {msg}"),
                )
            }
            AppError::Parse(msg) => {
                tracing::error!("Weather parse error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    format!("Error parsing weather data: {msg}"),
                )
            }
            AppError::TemplateBinding(slot) => {
                tracing::error!("Prompt slot '{slot}' unbound");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_BINDING_ERROR",
                    "The analysis prompt could not be prepared".to_string(),
                )
            }
            AppError::ModelInvocation(msg) => {
                tracing::error!("Model invocation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_INVOCATION_ERROR",
                    format!("Error generating analysis: {msg}"),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Transport(e) => {
                tracing::error!("Upstream transport error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Unable to reach an external service. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
