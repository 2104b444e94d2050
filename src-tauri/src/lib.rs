use std::sync::{Arc, Mutex};

use urbanscope_core::state::{Dashboard, Operation, Snapshot};
use urbanscope_core::{data, AiSettings};

/// Managed state wrapping the dashboard state machine.
struct DashboardState(Arc<Mutex<Dashboard>>);

/// Managed state wrapping the AI settings.
struct SettingsState(Arc<Mutex<AiSettings>>);

// The underlying gateway error is logged for diagnostics; the UI only ever
// sees one of these two fixed messages.
const ANALYSIS_FAILED: &str = "Failed to get analysis. Please try again.";
const PREDICTION_FAILED: &str = "Failed to get urban sprawl prediction. Please try again.";

#[tauri::command]
fn list_locations() -> Vec<String> {
    data::LOCATIONS.iter().map(|s| s.to_string()).collect()
}

#[tauri::command]
fn dashboard(state: tauri::State<'_, DashboardState>) -> Snapshot {
    state.0.lock().unwrap().snapshot()
}

#[tauri::command]
fn select_location(location: String, state: tauri::State<'_, DashboardState>) -> Snapshot {
    let mut dash = state.0.lock().unwrap();
    dash.select_location(&location);
    dash.snapshot()
}

/// Embed URL for the map widget; a hotspot focuses the view tighter.
#[tauri::command]
fn map_view(hotspot: Option<String>, state: tauri::State<'_, DashboardState>) -> String {
    let dash = state.0.lock().unwrap();
    urbanscope_core::map_embed_url(dash.location(), hotspot.as_deref())
}

#[tauri::command]
async fn analyze_population(
    dashboard: tauri::State<'_, DashboardState>,
    settings: tauri::State<'_, SettingsState>,
) -> Result<Snapshot, String> {
    let ai = settings.0.lock().unwrap().clone();
    if !urbanscope_core::ai_configured(&ai) {
        return Err("AI provider is not configured".to_string());
    }

    let (records, location, token) = {
        let mut dash = dashboard.0.lock().unwrap();
        match dash.try_begin(Operation::Analysis) {
            Some(token) => (dash.records(), dash.location().to_string(), token),
            // Another request is in flight; triggering is a no-op.
            None => return Ok(dash.snapshot()),
        }
    };

    let outcome = urbanscope_insight::generate_analysis(records, &location, &ai).await;

    let mut dash = dashboard.0.lock().unwrap();
    match outcome {
        Ok(text) => {
            dash.finish_analysis(token, Ok(text));
        }
        Err(e) => {
            eprintln!("[urbanscope] analysis failed: {e}");
            dash.finish_analysis(token, Err(ANALYSIS_FAILED.to_string()));
        }
    }
    Ok(dash.snapshot())
}

#[tauri::command]
async fn predict_sprawl(
    dashboard: tauri::State<'_, DashboardState>,
    settings: tauri::State<'_, SettingsState>,
) -> Result<Snapshot, String> {
    let ai = settings.0.lock().unwrap().clone();
    if !urbanscope_core::ai_configured(&ai) {
        return Err("AI provider is not configured".to_string());
    }

    let (records, location, token) = {
        let mut dash = dashboard.0.lock().unwrap();
        match dash.try_begin(Operation::Prediction) {
            Some(token) => (dash.records(), dash.location().to_string(), token),
            None => return Ok(dash.snapshot()),
        }
    };

    let outcome = urbanscope_insight::generate_prediction(records, &location, &ai).await;

    let mut dash = dashboard.0.lock().unwrap();
    match outcome {
        Ok(prediction) => {
            dash.finish_prediction(token, Ok(prediction));
        }
        Err(e) => {
            eprintln!("[urbanscope] prediction failed: {e}");
            dash.finish_prediction(token, Err(PREDICTION_FAILED.to_string()));
        }
    }
    Ok(dash.snapshot())
}

#[tauri::command]
fn get_ai_settings(state: tauri::State<'_, SettingsState>) -> Result<serde_json::Value, String> {
    let settings = state.0.lock().unwrap().clone();
    let configured = urbanscope_core::ai_configured(&settings);
    // Mask API key — only send whether it's set
    Ok(serde_json::json!({
        "provider": settings.provider,
        "model": settings.model,
        "hasKey": !settings.api_key.is_empty(),
        "configured": configured,
    }))
}

#[tauri::command]
fn save_ai_settings(
    provider: String,
    api_key: String,
    model: String,
    state: tauri::State<'_, SettingsState>,
) -> Result<(), String> {
    let mut settings = state.0.lock().unwrap();
    settings.provider = provider;
    settings.model = model;
    // Empty key means "keep existing"
    if !api_key.is_empty() {
        settings.api_key = api_key;
    }
    urbanscope_core::write_settings(&settings)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let settings = urbanscope_core::read_settings();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(DashboardState(Arc::new(Mutex::new(Dashboard::default()))))
        .manage(SettingsState(Arc::new(Mutex::new(settings))))
        .invoke_handler(tauri::generate_handler![
            list_locations,
            dashboard,
            select_location,
            map_view,
            analyze_population,
            predict_sprawl,
            get_ai_settings,
            save_ai_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
