//! Scripted model double for flow tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{AdvisorError, AdvisorResult};
use crate::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::model::GenerativeModel;

/// Replays canned responses in order and records every request it receives
pub struct ScriptedModel {
    responses: Mutex<VecDeque<GenerateContentResponse>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<GenerateContentResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap()
    }

    pub fn json(value: Value) -> GenerateContentResponse {
        Self::text(&value.to_string())
    }

    pub fn function_call(name: &str, args: Value) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": name, "args": args}}]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap()
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> AdvisorResult<GenerateContentResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AdvisorError::EmptyResponse("script exhausted".to_string()))
    }
}
