pub mod data;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// --- Types (matching the frontend's wire shapes) ---

/// One yearly census figure. Population is in millions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    pub year: u32,
    pub population: f64,
    #[serde(default)]
    pub projected: bool,
}

/// Structured urban sprawl prediction returned by the AI gateway.
///
/// The declared output schema marks the last four fields required; the two
/// leading estimate strings are serde-defaulted so the decoder and the schema
/// agree on what may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprawlPrediction {
    #[serde(default)]
    pub urban_area_growth: String,
    #[serde(default)]
    pub population_density_change: String,
    pub infrastructure_strain: String,
    pub summary: String,
    pub factors_considered: Vec<String>,
    pub growth_hotspots: Vec<String>,
}

/// Statistics derived from a record sequence. Recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthStats {
    pub first_actual: PopulationRecord,
    pub latest_actual: PopulationRecord,
    /// Percentage growth between first and latest actual, one decimal place.
    pub growth_percent: String,
    /// The final record of the sequence, possibly projected.
    pub horizon: PopulationRecord,
}

/// Derive display statistics from an ordered record sequence.
/// Returns None when the sequence has no actual (non-projected) record.
pub fn derive_stats(records: &[PopulationRecord]) -> Option<GrowthStats> {
    let first_actual = records.iter().copied().find(|r| !r.projected)?;
    let latest_actual = records.iter().copied().filter(|r| !r.projected).last()?;
    let horizon = records.last().copied()?;

    let growth_percent = if first_actual.population > 0.0 {
        let pct =
            (latest_actual.population - first_actual.population) / first_actual.population * 100.0;
        format!("{:.1}", pct)
    } else {
        "0.0".to_string()
    };

    Some(GrowthStats {
        first_actual,
        latest_actual,
        growth_percent,
        horizon,
    })
}

/// Label used when talking about a location in prose.
pub fn display_label(location: &str) -> String {
    if location == data::AGGREGATE_REGION {
        "the Greater Toronto Area (GTA)".to_string()
    } else {
        location.to_string()
    }
}

// --- Map embed ---

/// Build the embedded map viewer URL for a location, optionally focused on a
/// predicted growth hotspot (hotspot views zoom in tighter).
pub fn map_embed_url(location: &str, hotspot: Option<&str>) -> String {
    let (query, zoom) = match hotspot {
        Some(spot) => (format!("{}, {}", spot, location), 14),
        None if location == data::AGGREGATE_REGION => ("Greater Toronto Area".to_string(), 9),
        None => (format!("{}, Ontario, Canada", location), 12),
    };
    format!(
        "https://maps.google.com/maps?t=&z={}&ie=UTF8&iwloc=&output=embed&q={}",
        zoom,
        urlencoding::encode(&query)
    )
}

// --- AI Settings ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

/// Resolve the global config directory (~/.urbanscope/).
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".urbanscope")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn read_settings() -> AiSettings {
    let path = settings_path();
    if !path.exists() {
        return AiSettings::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn write_settings(settings: &AiSettings) -> Result<(), String> {
    let dir = config_dir();
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
    fs::write(settings_path(), json).map_err(|e| e.to_string())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
