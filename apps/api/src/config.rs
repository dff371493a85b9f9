use anyhow::{Context, Result};

pub const DEFAULT_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_SOIL_MOISTURE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if a required credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_maps_token: String,
    pub openweather_api_key: String,
    pub groq_api_key: String,
    pub endpoints: Endpoints,
    pub port: u16,
    pub rust_log: String,
}

/// Upstream base URLs. Overridable so a proxy or mock server can stand in.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub weather_url: String,
    pub soil_moisture_url: String,
    pub llm_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            soil_moisture_url: DEFAULT_SOIL_MOISTURE_URL.to_string(),
            llm_url: DEFAULT_LLM_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_maps_token: require_env_any(&["GOOGLE_MAPS_TOKEN", "google_maps_token"])?,
            openweather_api_key: require_env_any(&["OPENWEATHER_API_KEY", "openweather_api_key"])?,
            groq_api_key: require_env_any(&["GROQ_API_KEY"])?,
            endpoints: Endpoints {
                geocoding_url: env_or("GEOCODING_API_URL", DEFAULT_GEOCODING_URL),
                weather_url: env_or("WEATHER_API_URL", DEFAULT_WEATHER_URL),
                soil_moisture_url: env_or("SOIL_MOISTURE_API_URL", DEFAULT_SOIL_MOISTURE_URL),
                llm_url: env_or("LLM_API_URL", DEFAULT_LLM_URL),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Returns the first non-empty value among `keys`. Later keys are legacy spellings.
fn require_env_any(keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .with_context(|| {
            format!(
                "Required environment variable '{}' is not set",
                keys.first().copied().unwrap_or_default()
            )
        })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
