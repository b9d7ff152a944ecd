//! Narrative
//!
//! LLM-backed reports and chat about a groundwater dataset and its
//! forecast. The [`LlmProvider`] trait is the seam; [`GeminiProvider`] is
//! the bundled implementation.

pub mod chat;
pub mod error;
pub mod gemini;
pub mod llm;
pub mod report;
pub mod table;

pub use chat::{build_chat_request, data_context, PERSONA};
pub use error::{NarrativeError, Result};
pub use gemini::{GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use llm::{ChatMessage, ChatRole, LlmProvider, LlmRequest};
pub use report::{render_markdown, report_prompt, ReportLanguage, ReportSections};

use chrono::NaiveDate;
use data_spi::GroundwaterRecord;
use forecast_spi::ForecastPoint;
use tracing::info;

/// Ask the provider for a report and render it as Markdown.
pub async fn generate_report<P>(
    provider: &P,
    language: ReportLanguage,
    history: &[GroundwaterRecord],
    forecast: &[ForecastPoint],
    generated_on: NaiveDate,
) -> Result<String>
where
    P: LlmProvider + ?Sized,
{
    let prompt = report_prompt(language, history, forecast);
    let reply = provider.generate(&LlmRequest::from_prompt(prompt)).await?;
    let sections = ReportSections::parse(&reply, language)?;
    info!(
        provider = provider.name(),
        model = provider.model(),
        language = %language,
        "Report generated"
    );
    Ok(render_markdown(&sections, history, forecast, generated_on, language))
}

/// Answer the latest chat turn.
pub async fn chat<P>(
    provider: &P,
    history: &[ChatMessage],
    records: &[GroundwaterRecord],
    forecast: &[ForecastPoint],
) -> Result<String>
where
    P: LlmProvider + ?Sized,
{
    let request = build_chat_request(history, &data_context(records, forecast))?;
    provider.generate(&request).await
}
