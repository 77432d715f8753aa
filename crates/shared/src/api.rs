//! Transport-agnostic request/response contracts for the two boundary
//! operations. Serialized shapes match the persisted record schemas.

use crate::types::{Reframe, Thought};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortResponse {
    /// Ordered batch, model's within-batch order preserved.
    pub thoughts: Vec<Thought>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReframeRequest {
    pub thought: String,
    /// Pre-existing thought id to preserve in the projection, if any.
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReframeResponse {
    pub reframe: Reframe,
    /// Thought-shaped projection suitable for direct storage.
    pub thought: Thought,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
