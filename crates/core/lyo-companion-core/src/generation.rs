//! Text generation seam
//!
//! The engine never talks to a model directly. A [`GenerationService`]
//! receives the fully assembled prompt and returns the reply text; the
//! session decides what to do with it.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single request handed to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Monotonic per-session sequence number
    pub sequence: u64,

    /// Assembled prompt: system prompt, recent topics and the user message
    pub prompt: String,
}

impl GenerationRequest {
    /// Create a request
    pub fn new(sequence: u64, prompt: impl Into<String>) -> Self {
        Self {
            sequence,
            prompt: prompt.into(),
        }
    }
}

/// Produces reply text for a prompt
///
/// Implementations may take arbitrarily long; the session bounds each call
/// with its configured timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate a reply
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
