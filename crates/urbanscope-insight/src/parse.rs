use urbanscope_core::SprawlPrediction;

use crate::InsightError;

/// Extract the JSON object substring from raw LLM output. Providers that
/// ignore the schema declaration tend to wrap the object in markdown fences
/// or prose; the outermost braces are still the object.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Decode raw LLM output into a prediction. Either every required field
/// decodes and the summary is non-empty, or the whole value is rejected —
/// a partial prediction is never handed to the caller.
pub fn parse_prediction(raw: &str) -> Result<SprawlPrediction, InsightError> {
    let json_str = extract_json_object(raw)
        .ok_or_else(|| InsightError::Validation("no JSON object in response".to_string()))?;

    let prediction: SprawlPrediction = serde_json::from_str(json_str)
        .map_err(|e| InsightError::Validation(format!("invalid structure: {e}")))?;

    if prediction.summary.trim().is_empty() {
        return Err(InsightError::Validation("empty summary".to_string()));
    }

    Ok(prediction)
}
