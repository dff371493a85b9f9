mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod session;
mod state;
mod weather;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AgriWeather API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize weather clients (geocoding, current conditions, soil moisture)
    let weather = WeatherClient::from_config(&config)?;
    info!(
        "Weather client initialized (geocoding: {}, weather: {}, soil: {})",
        config.endpoints.geocoding_url,
        config.endpoints.weather_url,
        config.endpoints.soil_moisture_url
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.endpoints.llm_url.clone(), config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        weather,
        llm: Arc::new(llm),
        sessions: SessionStore::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
