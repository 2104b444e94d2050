use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, StructuredOutputFormat};

use urbanscope_core::{AiSettings, SprawlPrediction};

use crate::InsightError;

fn map_backend(provider: &str) -> Result<LLMBackend, InsightError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(InsightError::Service(format!("unknown provider: {other}"))),
    }
}

/// The machine-readable output-schema declaration sent with the structured
/// prediction request. Field names and types come straight from the
/// `SprawlPrediction` derive, so the schema can never drift from the decoder.
pub fn prediction_schema() -> Result<StructuredOutputFormat, InsightError> {
    let schema = schemars::schema_for!(SprawlPrediction);
    serde_json::from_value(serde_json::json!({
        "name": "urban_sprawl_prediction",
        "description": "Structured urban sprawl prediction for a selected location",
        "schema": schema,
        "strict": false,
    }))
    .map_err(|e| InsightError::Service(format!("schema declaration: {e}")))
}

/// One synchronous (awaited) round trip to the configured provider. When a
/// schema is given the provider is asked for a structured reply constrained
/// to it. A single attempt: failures and empty replies surface immediately.
pub async fn generate(
    settings: &AiSettings,
    system: &str,
    user_msg: &str,
    schema: Option<StructuredOutputFormat>,
) -> Result<String, InsightError> {
    let backend = map_backend(&settings.provider)?;

    let mut builder = LLMBuilder::new()
        .backend(backend)
        .model(&settings.model)
        .system(system);

    if !settings.api_key.is_empty() {
        builder = builder.api_key(&settings.api_key);
    }

    if let Some(schema) = schema {
        builder = builder.schema(schema);
    }

    let llm = builder
        .build()
        .map_err(|e| InsightError::Service(format!("build LLM: {e}")))?;

    let messages = vec![ChatMessage::user().content(user_msg).build()];

    let response = llm
        .chat(&messages)
        .await
        .map_err(|e| InsightError::Service(format!("chat: {e}")))?;

    match response.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(InsightError::Service("LLM returned empty text".to_string())),
        None => Err(InsightError::Service("LLM returned no text".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_providers_map() {
        for provider in ["openai", "anthropic", "google", "ollama", "groq", "mistral", "deepseek"] {
            assert!(map_backend(provider).is_ok(), "{provider} should map");
        }
        assert!(matches!(
            map_backend("bedrock"),
            Err(InsightError::Service(_))
        ));
    }

    #[test]
    fn schema_declaration_builds() {
        assert!(prediction_schema().is_ok());
    }
}
