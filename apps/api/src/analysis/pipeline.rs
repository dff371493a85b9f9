//! Analysis pipeline orchestrator.
//!
//! Steps, strictly in order and each awaited before the next:
//! 1. Geocode the location
//! 2. Fetch current weather and build its display text
//! 3. Re-parse the display text and check it against the reading
//! 4. Fetch soil moisture (absence degrades to the sentinel)
//! 5. Assemble the prompt with the prior conversation
//! 6. Invoke the model
//! 7. Render the response into display blocks
//!
//! Any failure aborts the run. Nothing is recorded here; the caller appends
//! to the conversation only after `run_analysis` returns `Ok`.

use chrono::Local;
use tracing::{info, warn};

use crate::analysis::assembler::assemble_prompt;
use crate::analysis::prompts::HISTORY_REQUEST_TEMPLATE;
use crate::analysis::renderer::{render_response, DisplayBlock};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::ConversationEntry;
use crate::weather::{parse_weather_report, QueryResult, WeatherClient, WeatherReport};

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub query: QueryResult,
    pub response: String,
    pub blocks: Vec<DisplayBlock>,
}

pub async fn run_analysis(
    weather: &WeatherClient,
    model: &dyn ChatModel,
    location: &str,
    history: &[ConversationEntry],
) -> Result<AnalysisOutcome, AppError> {
    info!("Starting analysis for '{location}'");

    let coordinates = weather.geocode(location).await?;

    let report = weather.fetch_weather(&coordinates).await?;
    check_report_text(&report)?;

    let soil_moisture = weather.fetch_soil_moisture(&coordinates).await?;

    let query = QueryResult {
        location: location.to_string(),
        coordinates,
        weather: report.reading,
        soil_moisture,
        weather_info: report.text,
        generated_at: Local::now(),
    };

    let prompt = assemble_prompt(&query, history)?;
    let response = model
        .complete(&prompt.to_messages())
        .await
        .map_err(|e| AppError::ModelInvocation(e.to_string()))?;

    let blocks = render_response(&response);
    info!(
        "Analysis for '{}' complete: {} blocks, {} chars",
        query.location,
        blocks.len(),
        response.len()
    );

    Ok(AnalysisOutcome {
        query,
        response,
        blocks,
    })
}

/// The human side of a recorded exchange.
pub fn history_request(location: &str) -> String {
    HISTORY_REQUEST_TEMPLATE.replace("{location}", location)
}

/// The display text must parse back to the reading it was built from.
fn check_report_text(report: &WeatherReport) -> Result<(), AppError> {
    let parsed = parse_weather_report(&report.text)?;
    if parsed != report.reading {
        warn!(
            "Weather text drifted from reading: parsed={:?} fetched={:?}",
            parsed, report.reading
        );
        return Err(AppError::Parse(
            "weather text does not match the fetched reading".to_string(),
        ));
    }
    Ok(())
}
