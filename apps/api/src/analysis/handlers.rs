//! Axum route handler for running a weather analysis.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::pipeline::{history_request, run_analysis, AnalysisOutcome};
use crate::analysis::renderer::DisplayBlock;
use crate::errors::AppError;
use crate::session::AnalysisReport;
use crate::state::AppState;
use crate::weather::{Coordinates, SoilMoistureReading, WeatherReading};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub location: String,
    pub coordinates: Coordinates,
    pub weather: WeatherReading,
    pub soil: SoilMoistureReading,
    /// Display form of `soil`, sentinel included.
    pub soil_moisture: String,
    /// The raw weather text block.
    pub weather_info: String,
    pub timestamp: String,
    pub response: String,
    pub blocks: Vec<DisplayBlock>,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let timestamp = outcome.query.timestamp();
        let query = outcome.query;
        AnalyzeResponse {
            location: query.location,
            coordinates: query.coordinates,
            weather: query.weather,
            soil_moisture: query.soil_moisture.to_string(),
            soil: query.soil_moisture,
            weather_info: query.weather_info,
            timestamp,
            response: outcome.response,
            blocks: outcome.blocks,
        }
    }
}

/// POST /api/v1/sessions/:id/analyze
///
/// Runs the full pipeline for one location. The exchange is recorded in the
/// session only when the analysis succeeds.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let location = request.location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("Please enter a location.".to_string()));
    }

    let history = state.sessions.history(session_id).await?;

    let outcome = run_analysis(&state.weather, state.llm.as_ref(), location, &history).await?;

    state
        .sessions
        .record_exchange(
            session_id,
            history_request(location),
            AnalysisReport {
                location: outcome.query.location.clone(),
                generated_at: outcome.query.generated_at,
                response: outcome.response.clone(),
            },
        )
        .await?;

    Ok(Json(AnalyzeResponse::from(outcome)))
}
