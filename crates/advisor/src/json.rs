//! Recovering JSON objects from model text

use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::error::{AdvisorError, AdvisorResult};

/// Finds the JSON object in a model reply.
///
/// Accepts a bare object, a fenced ```json block or, as a last resort, the
/// span between the first `{` and the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }

    if let Some(block) = extract_json_from_codeblock(trimmed) {
        return Some(block);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if start < end {
        Some(&trimmed[start..=end])
    } else {
        None
    }
}

fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let patterns = ["```json", "```JSON", "```"];

    for pattern in patterns {
        if let Some(start_idx) = text.find(pattern) {
            let json_start = start_idx + pattern.len();
            if let Some(end_idx) = text[json_start..].find("```") {
                let json = text[json_start..json_start + end_idx].trim();
                if json.starts_with('{') {
                    return Some(json);
                }
            }
        }
    }

    None
}

/// Parses the model reply into the flow's output type
pub fn parse_output<T: DeserializeOwned>(text: &str, flow: &str) -> AdvisorResult<T> {
    let json = extract_json(text).ok_or_else(|| {
        warn!(flow = flow, response_len = text.len(), "No JSON object in model response");
        AdvisorError::MalformedOutput(format!("{}: no JSON object in response", flow))
    })?;

    serde_json::from_str(json).map_err(|e| {
        error!(flow = flow, error = %e, "Model response did not match output schema");
        AdvisorError::MalformedOutput(format!("{}: {}", flow, e))
    })
}
