//! Generation clients for the triage pipelines.
//!
//! Each client wraps one hosted or local text-generation API behind the
//! same contract: one prompt in, raw model text out, one outbound call per
//! invocation. No retries and no caching; the pipelines own all fallback
//! behavior.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod router;

use anyhow::Result;
use async_trait::async_trait;

/// The opaque generation seam the pipelines depend on.
///
/// Implementations must not leak credentials through returned errors.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
