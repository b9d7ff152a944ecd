//! Data-aware chat.

use crate::error::{NarrativeError, Result};
use crate::llm::{ChatMessage, ChatRole, LlmRequest};
use crate::table::{forecast_table, history_table};
use data_spi::GroundwaterRecord;
use forecast_spi::ForecastPoint;

/// Persona opening a new conversation
pub const PERSONA: &str = "You are an expert hydrogeologist AI. Your goal is to provide \
insightful and accurate answers regarding groundwater levels, trends, and forecasts based on \
the provided historical and predicted data. Maintain a professional and helpful tone.";

/// Data tables appended to the persona; empty when there is no data.
pub fn data_context(history: &[GroundwaterRecord], forecast: &[ForecastPoint]) -> String {
    let mut context = String::new();
    if !history.is_empty() {
        context.push_str("\n\nHistorical Groundwater Data:\n");
        context.push_str(&history_table(history));
    }
    if !forecast.is_empty() {
        context.push_str("\n\nForecasted Groundwater Data:\n");
        context.push_str(&forecast_table(forecast));
    }
    context
}

/// Build the provider request for a chat turn.
///
/// An empty history starts a conversation with the persona and data
/// context as its only user turn. A non-empty history is sent as is and
/// must end with a user turn.
pub fn build_chat_request(history: &[ChatMessage], context: &str) -> Result<LlmRequest> {
    if history.is_empty() {
        return Ok(LlmRequest::from_prompt(format!("{}{}", PERSONA, context)));
    }
    if history.iter().any(|m| m.content.trim().is_empty()) {
        return Err(NarrativeError::InvalidInput(
            "chat messages must not be empty".to_string(),
        ));
    }
    if history.last().map(|m| m.role) != Some(ChatRole::User) {
        return Err(NarrativeError::InvalidInput(
            "chat history must end with a user message".to_string(),
        ));
    }
    Ok(LlmRequest {
        messages: history.to_vec(),
        ..Default::default()
    })
}
