use async_trait::async_trait;

use crate::error::AdvisorResult;
use crate::gemini::{GenerateContentRequest, GenerateContentResponse};

/// A generative model that turns a prompt conversation into candidates.
///
/// `GeminiClient` is the production implementation; flows only depend on this
/// trait so they can run against scripted models in tests.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> AdvisorResult<GenerateContentResponse>;
}
