use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::GenerationError;
use super::GenerationRequest;
use super::GenerationResult;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub llm_key_configured: bool,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the generation service can be reached before
    /// the user submits anything.
    async fn health_check(&self) -> Result<HealthStatus>;

    /// Transforms a command into its structured and system prompts. Exactly
    /// one HTTP request is made per call, and failures are never retried.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError>;

    /// Loads a previous generation stored by the service.
    async fn get_prompt(&self, id: &str) -> Result<GenerationResult, GenerationError>;
}

pub type BackendHandle = Arc<dyn Backend + Send + Sync>;
