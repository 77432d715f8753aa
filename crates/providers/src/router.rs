use crate::anthropic::AnthropicClient;
use crate::gemini::GeminiClient;
use crate::ollama::OllamaClient;
use crate::Generator;
use anyhow::{anyhow, Result};
use shared::settings::ModelConfig;

/// Build the generation client for the first usable provider in the
/// preference list.
///
/// Selection happens once, at construction: a provider is skipped only
/// when its client cannot be built (no auth configured). At call time
/// each `generate` is a single attempt with no cross-provider fallback;
/// the pipelines decide what failure means.
pub fn build_generator(config: &ModelConfig) -> Result<Box<dyn Generator>> {
    let mut last_error = None;

    for provider in config.provider_preference.iter() {
        match provider.as_str() {
            "gemini" => match GeminiClient::from_auth(&config.gemini_model, &config.gemini_auth) {
                Ok(client) => return Ok(Box::new(client)),
                Err(e) => last_error = Some(e),
            },
            "anthropic" => {
                match AnthropicClient::from_auth(&config.anthropic_model, &config.anthropic_auth) {
                    Ok(client) => return Ok(Box::new(client)),
                    Err(e) => last_error = Some(e),
                }
            }
            "local" => {
                return Ok(Box::new(OllamaClient::new(config.local_model.clone())));
            }
            other => {
                last_error = Some(anyhow!("Unknown provider: {}", other));
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("No providers configured")))
}
