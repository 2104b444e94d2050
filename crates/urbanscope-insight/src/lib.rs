pub mod engine;
mod parse;
mod prompt;

use thiserror::Error;

use urbanscope_core::{AiSettings, PopulationRecord, SprawlPrediction};

/// Failures surfaced by the gateway. Every failure is terminal for the
/// invocation — there are no retries and never a partial result.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The completion endpoint could not be reached, rejected the request,
    /// or returned no usable text.
    #[error("AI service error: {0}")]
    Service(String),

    /// The endpoint replied, but the payload failed JSON decoding or lacked
    /// the required shape.
    #[error("invalid prediction structure: {0}")]
    Validation(String),
}

/// Ask the configured provider for a free-text summary of the growth trend.
/// Returns the response text verbatim.
pub async fn generate_analysis(
    records: &[PopulationRecord],
    location: &str,
    settings: &AiSettings,
) -> Result<String, InsightError> {
    let system = prompt::analysis_system_prompt();
    let user_msg = prompt::analysis_user_message(records, location);

    eprintln!(
        "[urbanscope-insight] analysis request to {} ({})",
        settings.provider, settings.model
    );

    engine::generate(settings, system, &user_msg, None).await
}

/// Ask the configured provider for a structured urban sprawl prediction,
/// constrained by a declared JSON output schema and validated after parsing.
pub async fn generate_prediction(
    records: &[PopulationRecord],
    location: &str,
    settings: &AiSettings,
) -> Result<SprawlPrediction, InsightError> {
    let system = prompt::prediction_system_prompt();
    let user_msg = prompt::prediction_user_message(records, location);
    let schema = engine::prediction_schema()?;

    eprintln!(
        "[urbanscope-insight] prediction request to {} ({})",
        settings.provider, settings.model
    );

    let raw = engine::generate(settings, &system, &user_msg, Some(schema)).await?;
    parse::parse_prediction(&raw)
}
