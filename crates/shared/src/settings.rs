//! Application settings: model/provider selection and storage location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-provider authentication. Environment variables are the fallback
/// when no key is configured here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderAuth {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// e.g. ["gemini", "anthropic", "local"]; the first provider that can
    /// be constructed (auth present) handles every generation call.
    pub provider_preference: Vec<String>,
    pub gemini_model: String,
    pub anthropic_model: String,
    /// e.g. "llama3.2:3b" for Ollama
    pub local_model: String,

    #[serde(default)]
    pub gemini_auth: ProviderAuth,
    #[serde(default)]
    pub anthropic_auth: ProviderAuth,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider_preference: vec!["gemini".into(), "anthropic".into(), "local".into()],
            gemini_model: "gemini-2.5-flash".into(),
            anthropic_model: "claude-3-5-sonnet-20241022".into(),
            local_model: "llama3.2:3b".into(),
            gemini_auth: ProviderAuth::default(),
            anthropic_auth: ProviderAuth::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub model: ModelConfig,
    /// Overrides the platform data directory when set.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}
