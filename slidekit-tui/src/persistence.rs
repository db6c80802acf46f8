//! Slider value persistence — JSON save/load across restarts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use slidekit_core::SliderSpec;

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// One value per slider, in slider order.
    pub values: Vec<f64>,
    pub saved_at: Option<DateTime<Local>>,
}

/// `<config dir>/slidekit/state.json`, or `./slidekit/state.json` when the
/// platform has no config dir.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidekit")
        .join("state.json")
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        values: app.specs.iter().map(|spec| spec.value).collect(),
        saved_at: Some(Local::now()),
    }
}

/// Overwrite configured values with persisted ones.
///
/// Values saved for a different slider set (another count) are ignored as a
/// whole. Values are not sanitized here: the sliders correct them on mount.
pub fn apply(specs: &mut [SliderSpec], state: &PersistedState) -> bool {
    if state.values.is_empty() {
        return false;
    }
    if state.values.len() != specs.len() {
        tracing::info!(
            persisted = state.values.len(),
            configured = specs.len(),
            "persisted values belong to a different slider set, ignoring"
        );
        return false;
    }
    for (spec, &value) in specs.iter_mut().zip(&state.values) {
        spec.value = value;
    }
    true
}
