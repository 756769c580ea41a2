//! JSON configuration loading for the assessment parameters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assess::AssessParams;

/// Runtime configuration consumed by embedding tools: where results go and
/// how the assessor is parameterized.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Optional path the embedding writes the JSON report to.
    pub report_out: Option<PathBuf>,
    pub assess_params: AssessParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
