// Shared prompt fragments. The analysis prompts in analysis/prompts.rs
// splice these in; they are plain text with no template slots.

/// Keeps the model on weather and agriculture topics.
pub const SCOPE_INSTRUCTION: &str = "**IMPORTANT**: Only respond to weather and \
agriculture-related queries. For any other topic, politely decline and redirect the \
user to weather or farming questions.";

/// Keeps the analysis anchored to the supplied readings.
pub const DATA_FOCUS_INSTRUCTION: &str = "Focus STRICTLY on the data provided and avoid \
any assumptions or generalizations.";
