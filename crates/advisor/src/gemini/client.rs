use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::types::*;
use crate::error::{AdvisorError, AdvisorResult};
use crate::model::GenerativeModel;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 60000;

/// Wait before the next attempt: the server's `Retry-After` when given,
/// otherwise the current backoff, never above `MAX_BACKOFF_MS`.
fn retry_delay_ms(retry_after_secs: Option<u64>, backoff_ms: u64) -> u64 {
    retry_after_secs
        .map(|secs| secs.saturating_mul(1000))
        .unwrap_or(backoff_ms)
        .min(MAX_BACKOFF_MS)
}

/// Client for the Google Generative Language API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_retries: u32,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Applies a per-request timeout to every call
    pub fn with_timeout(mut self, timeout: Duration) -> AdvisorResult<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn with_retry<T, F, Fut>(&self, operation: F, operation_name: &str) -> AdvisorResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AdvisorResult<T>>,
    {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(AdvisorError::RateLimited { retry_after }) => {
                    if retries >= self.max_retries {
                        error!(
                            "{} failed after {} retries due to rate limiting",
                            operation_name, retries
                        );
                        return Err(AdvisorError::RateLimited { retry_after });
                    }

                    let wait_ms = retry_delay_ms(retry_after, backoff_ms);

                    warn!(
                        "{} rate limited, retrying in {}ms (attempt {}/{})",
                        operation_name,
                        wait_ms,
                        retries + 1,
                        self.max_retries
                    );

                    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                    retries += 1;
                    backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
                }
                Err(AdvisorError::Api {
                    ref message,
                    status_code: Some(code),
                }) if code >= 500 => {
                    if retries >= self.max_retries {
                        error!(
                            "{} failed after {} retries due to server error: {}",
                            operation_name, retries, message
                        );
                        return Err(AdvisorError::Api {
                            message: message.clone(),
                            status_code: Some(code),
                        });
                    }

                    warn!(
                        "{} server error ({}), retrying in {}ms (attempt {}/{})",
                        operation_name,
                        code,
                        backoff_ms,
                        retries + 1,
                        self.max_retries
                    );

                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    retries += 1;
                    backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    if retries > 0 {
                        info!("{} failed after {} retries: {}", operation_name, retries, e);
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn generate_content_inner(
        &self,
        request: &GenerateContentRequest,
    ) -> AdvisorResult<GenerateContentResponse> {
        debug!(
            "Generating content with {} turns, {} tool sets, model {}",
            request.contents.len(),
            request.tools.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!("Rate limited by Gemini");
                return Err(AdvisorError::RateLimited { retry_after });
            }

            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                error!(
                    "Gemini API error: {} (status: {:?})",
                    error_resp.error.message, error_resp.error.status
                );
                return Err(AdvisorError::Api {
                    message: error_resp.error.message,
                    status_code: Some(status.as_u16()),
                });
            }

            return Err(AdvisorError::Api {
                message: error_text,
                status_code: Some(status.as_u16()),
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &body.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                output_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> AdvisorResult<GenerateContentResponse> {
        self.with_retry(|| self.generate_content_inner(request), "generate_content")
            .await
    }
}
