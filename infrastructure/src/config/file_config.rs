//! File-based configuration schema

use consenso_domain::SolverConfig;
use serde::{Deserialize, Serialize};

/// Root configuration structure, merged from file sources and defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Aggregation strategy settings
    pub solver: SolverConfig,
    /// Participant data location
    pub data: FileDataConfig,
    /// Reasoning service settings
    pub gemini: FileGeminiConfig,
}

/// Where participant files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Directory with `participante_NN.json` files
    pub dir: String,
}

impl Default for FileDataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

/// Gemini model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Default model
    pub model: String,
    /// Model used with the `--pro` flag
    pub pro_model: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            pro_model: "gemini-3-pro-preview".to_string(),
        }
    }
}
