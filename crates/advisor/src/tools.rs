//! Local functions the model may call mid-generation

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use mavuno_core::RainfallEstimate;

use crate::error::{AdvisorError, AdvisorResult};
use crate::gemini::{
    Content, FunctionCall, FunctionDeclaration, GenerateContentRequest, GenerateContentResponse,
    Part, ToolSet,
};
use crate::model::GenerativeModel;

/// Rounds of tool calls allowed before the model must answer
pub const MAX_TOOL_ROUNDS: usize = 5;

pub trait Tool: Send + Sync {
    fn declaration(&self) -> FunctionDeclaration;

    /// Runs the tool. The error string is reported back to the model.
    fn call(&self, args: &Value) -> Result<Value, String>;
}

/// Predicted rainfall for a county and year, backed by the static county table
pub struct RainfallTool;

pub const RAINFALL_TOOL_NAME: &str = "getPredictedRainfall";

#[derive(Debug, Deserialize)]
struct RainfallArgs {
    county: String,
    year: f64,
}

impl Tool for RainfallTool {
    fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: RAINFALL_TOOL_NAME.to_string(),
            description: "Gets the predicted annual rainfall in millimeters (mm) for a specific \
                          county in Kenya and a given year."
                .to_string(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "county": {
                        "type": "STRING",
                        "description": "The county in Kenya for which to get the rainfall prediction."
                    },
                    "year": {
                        "type": "NUMBER",
                        "description": "The year for which to get the prediction."
                    }
                },
                "required": ["county", "year"]
            }),
        }
    }

    fn call(&self, args: &Value) -> Result<Value, String> {
        let args: RainfallArgs = serde_json::from_value(args.clone())
            .map_err(|e| format!("invalid arguments: {}", e))?;

        if !args.year.is_finite() || args.year.abs() > i32::MAX as f64 {
            return Err(format!("invalid year: {}", args.year));
        }

        let estimate = RainfallEstimate::new(&args.county, args.year.trunc() as i32);
        debug!(
            county = %estimate.county,
            year = estimate.year,
            rainfall_mm = estimate.rainfall_mm,
            "Rainfall tool called"
        );

        Ok(json!({
            "county": estimate.county,
            "year": estimate.year,
            "predictedRainfallMm": estimate.rainfall_mm,
        }))
    }
}

/// The tools offered to one flow
#[derive(Default)]
pub struct Toolbox {
    tools: Vec<Box<dyn Tool>>,
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn tool_set(&self) -> ToolSet {
        ToolSet {
            function_declarations: self.tools.iter().map(|t| t.declaration()).collect(),
        }
    }

    /// Executes a model function call; failures become an `error` payload.
    pub fn invoke(&self, call: &FunctionCall) -> Value {
        let Some(tool) = self.tools.iter().find(|t| t.declaration().name == call.name) else {
            warn!(tool = %call.name, "Model called an unknown tool");
            return json!({ "error": format!("unknown tool: {}", call.name) });
        };

        match tool.call(&call.args) {
            Ok(value) => value,
            Err(message) => {
                warn!(tool = %call.name, error = %message, "Tool call failed");
                json!({ "error": message })
            }
        }
    }
}

/// Runs the request, answering function calls until the model replies with
/// content of its own or `max_rounds` rounds of calls have been served.
pub async fn generate_with_tools(
    model: &dyn GenerativeModel,
    mut request: GenerateContentRequest,
    toolbox: &Toolbox,
    max_rounds: usize,
) -> AdvisorResult<GenerateContentResponse> {
    request.tools = vec![toolbox.tool_set()];

    for round in 0..=max_rounds {
        let response = model.generate(&request).await?;
        let calls = response.function_calls();
        if calls.is_empty() {
            return Ok(response);
        }
        if round == max_rounds {
            break;
        }

        info!(round = round + 1, calls = calls.len(), "Serving model tool calls");

        let model_turn = response
            .first_content()
            .cloned()
            .unwrap_or_else(|| Content::model(Vec::new()));
        request.contents.push(Content::model(model_turn.parts));

        let results = calls
            .iter()
            .map(|call| Part::function_response(call.name.clone(), toolbox.invoke(call)))
            .collect();
        request.contents.push(Content::user(results));
    }

    Err(AdvisorError::ToolLoopExhausted(max_rounds))
}
