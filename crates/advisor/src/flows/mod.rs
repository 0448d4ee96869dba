//! Advisory flows: one prompt, one typed input and one typed output each

pub mod diagnosis;
pub mod farming_guide;
pub mod recommendation;
pub mod trend_summary;
pub mod yield_prediction;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{AdvisorError, AdvisorResult};
use crate::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::json::parse_output;
use crate::model::GenerativeModel;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

const JSON_MIME_TYPE: &str = "application/json";

/// Sampling settings shared by every flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationSettings {
    /// Plain text config, used when tools are offered
    pub(crate) fn text_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: Some(self.temperature),
            max_output_tokens: Some(self.max_output_tokens),
            ..Default::default()
        }
    }

    /// JSON mode constrained by `schema`
    pub(crate) fn json_config(&self, schema: Value) -> GenerationConfig {
        GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            response_schema: Some(schema),
            ..self.text_config()
        }
    }
}

pub(crate) fn build_request(
    system_prompt: &str,
    parts: Vec<Part>,
    generation_config: GenerationConfig,
) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Some(Content::system(system_prompt)),
        contents: vec![Content::user(parts)],
        tools: Vec::new(),
        generation_config: Some(generation_config),
    }
}

/// Parses the final model reply of a flow
pub(crate) fn decode_response<T: DeserializeOwned>(
    response: &GenerateContentResponse,
    flow: &str,
) -> AdvisorResult<T> {
    let text = response.text().ok_or_else(|| {
        let reason = response.stop_reason();
        error!(flow = flow, reason = %reason, "Model returned no text");
        AdvisorError::EmptyResponse(reason)
    })?;
    parse_output(&text, flow)
}

/// Runs a tool-free flow in JSON mode
pub(crate) async fn generate_structured<T: DeserializeOwned>(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    system_prompt: &str,
    parts: Vec<Part>,
    schema: Value,
    flow: &str,
) -> AdvisorResult<T> {
    let request = build_request(system_prompt, parts, settings.json_config(schema));
    let response = model.generate(&request).await?;
    let output = decode_response(&response, flow)?;
    info!(flow = flow, "Flow completed");
    Ok(output)
}
