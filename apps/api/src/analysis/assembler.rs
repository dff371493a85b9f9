//! Prompt Assembler. Binds a `QueryResult` into the analysis templates and
//! appends the prior conversation after the system and human turns.

use std::collections::HashMap;

use crate::analysis::prompts::{ANALYSIS_HUMAN_TEMPLATE, ANALYSIS_SYSTEM_TEMPLATE};
use crate::analysis::template::bind_template;
use crate::errors::AppError;
use crate::llm_client::prompts::{DATA_FOCUS_INSTRUCTION, SCOPE_INSTRUCTION};
use crate::llm_client::{ChatMessage, Role};
use crate::session::ConversationEntry;
use crate::weather::report::format_number;
use crate::weather::QueryResult;

/// The three-part prompt: system instruction, human data turn, prior history.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub human: String,
    pub history: Vec<ConversationEntry>,
}

impl Prompt {
    /// Chat messages in send order: system, user, then the history as recorded.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::new(Role::System, self.system.clone()));
        messages.push(ChatMessage::new(Role::User, self.human.clone()));
        messages.extend(self.history.iter().map(|entry| match entry {
            ConversationEntry::Human(text) => ChatMessage::new(Role::User, text.clone()),
            ConversationEntry::Assistant(text) => ChatMessage::new(Role::Assistant, text.clone()),
        }));
        messages
    }
}

pub fn assemble_prompt(
    query: &QueryResult,
    history: &[ConversationEntry],
) -> Result<Prompt, AppError> {
    let values = prompt_values(query);

    Ok(Prompt {
        system: bind_template(ANALYSIS_SYSTEM_TEMPLATE, &values)?,
        human: bind_template(ANALYSIS_HUMAN_TEMPLATE, &values)?,
        history: history.to_vec(),
    })
}

fn prompt_values(query: &QueryResult) -> HashMap<&'static str, String> {
    let weather = &query.weather;
    HashMap::from([
        ("location", query.location.clone()),
        ("coordinates", query.coordinates.to_string()),
        ("description", weather.description.clone()),
        ("temp", format_number(weather.temperature_c)),
        ("feels_like", format_number(weather.feels_like_c)),
        ("humidity", weather.humidity_pct.to_string()),
        ("wind_speed", format_number(weather.wind_speed_mps)),
        ("soil_moisture", query.soil_moisture.to_string()),
        ("weather_info", query.weather_info.clone()),
        ("timestamp", query.timestamp()),
        ("scope_instruction", SCOPE_INSTRUCTION.to_string()),
        ("data_focus_instruction", DATA_FOCUS_INSTRUCTION.to_string()),
    ])
}
