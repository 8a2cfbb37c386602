#[cfg(test)]
#[path = "prompt_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::Backend;
use crate::domain::models::GenerationError;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResult;
use crate::domain::models::HealthStatus;
use crate::domain::models::GENERATE_FALLBACK_ERROR;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
const FETCH_FALLBACK_ERROR: &str = "Failed to fetch prompt";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateRequest {
    command: String,
}

/// FastAPI sends a string `detail` for handled errors, and a list of
/// validation failures for 422s.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Option<serde_json::Value>,
}

fn error_detail(body: &str) -> Option<String> {
    let res = serde_json::from_str::<ErrorResponse>(body).ok()?;
    return res
        .detail
        .and_then(|detail| return detail.as_str().map(|e| return e.to_string()));
}

async fn parse_generation(
    res: reqwest::Response,
    fallback: &str,
) -> Result<GenerationResult, GenerationError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|err| return GenerationError::transport(err.to_string(), fallback))?;

    if !status.is_success() {
        tracing::error!(
            status = status.as_u16(),
            body = %body,
            "Prompt service returned an error"
        );
        return Err(GenerationError::service(error_detail(&body), fallback));
    }

    tracing::debug!(body = %body, "Prompt service response");
    return serde_json::from_str::<GenerationResult>(&body).map_err(|err| {
        return GenerationError::transport(
            format!("The prompt service returned an unexpected response: {err}"),
            fallback,
        );
    });
}

/// Client for the prompt generation HTTP service.
pub struct PromptApi {
    url: String,
    timeout: Duration,
}

impl PromptApi {
    /// An empty `base_url` points at the default origin.
    pub fn new(base_url: &str, health_check_timeout_ms: u64) -> PromptApi {
        let mut url = base_url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            url = DEFAULT_BACKEND_URL.to_string();
        }

        return PromptApi {
            url,
            timeout: Duration::from_millis(health_check_timeout_ms),
        };
    }

    pub fn url(&self) -> &str {
        return &self.url;
    }
}

#[async_trait]
impl Backend for PromptApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<HealthStatus> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/health", url = self.url))
            .timeout(self.timeout)
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Prompt service is not running");
                bail!("Prompt service is not running at {}", self.url);
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Prompt service health check failed"
            );
            bail!("Prompt service health check failed with status {}", res.status());
        }

        let status = res.json::<HealthStatus>().await?;
        tracing::debug!(status = ?status, "Prompt service health");

        return Ok(status);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let req = GenerateRequest {
            command: request.command.to_string(),
        };
        tracing::debug!(id = request.id, body = ?req, "Generate prompt request");

        let res = reqwest::Client::new()
            .post(format!("{url}/api/generate-prompt", url = self.url))
            .json(&req)
            .send()
            .await
            .map_err(|err| {
                return GenerationError::transport(err.to_string(), GENERATE_FALLBACK_ERROR);
            })?;

        return parse_generation(res, GENERATE_FALLBACK_ERROR).await;
    }

    #[allow(clippy::implicit_return)]
    async fn get_prompt(&self, id: &str) -> Result<GenerationResult, GenerationError> {
        let mut url = reqwest::Url::parse(&format!("{url}/api/prompts/", url = self.url))
            .map_err(|err| {
                return GenerationError::transport(err.to_string(), FETCH_FALLBACK_ERROR);
            })?;

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }

        let res = reqwest::Client::new()
            .get(url)
            .send()
            .await
            .map_err(|err| {
                return GenerationError::transport(err.to_string(), FETCH_FALLBACK_ERROR);
            })?;

        return parse_generation(res, FETCH_FALLBACK_ERROR).await;
    }
}
