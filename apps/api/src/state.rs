use std::sync::Arc;

use crate::llm_client::ChatModel;
use crate::session::SessionStore;
use crate::weather::WeatherClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Geocoding, current weather and soil moisture.
    pub weather: WeatherClient,
    /// Built once at startup and reused for every analysis.
    pub llm: Arc<dyn ChatModel>,
    pub sessions: SessionStore,
}
