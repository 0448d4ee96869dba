use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use mavuno_core::YieldPredictionInput;

use super::{build_request, decode_response, GenerationSettings};
use crate::error::{AdvisorError, AdvisorResult};
use crate::gemini::Part;
use crate::model::GenerativeModel;
use crate::prompts::{yield_prediction_prompt, YIELD_SYSTEM_PROMPT};
use crate::tools::{generate_with_tools, RainfallTool, Toolbox, MAX_TOOL_ROUNDS};

const FLOW: &str = "yield_prediction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct YieldPrediction {
    /// Predicted harvest in tons
    pub predicted_yield: f64,
    pub recommended_fertilizer: String,
    pub irrigation_advice: String,
}

/// Predicts the harvest, letting the model look up rainfall through the tool.
pub async fn run(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    input: &YieldPredictionInput,
) -> AdvisorResult<YieldPrediction> {
    let request = build_request(
        YIELD_SYSTEM_PROMPT,
        vec![Part::text(yield_prediction_prompt(input))],
        settings.text_config(),
    );
    let toolbox = Toolbox::new().with(RainfallTool);

    let response = generate_with_tools(model, request, &toolbox, MAX_TOOL_ROUNDS).await?;
    let prediction: YieldPrediction = decode_response(&response, FLOW)?;

    if !prediction.predicted_yield.is_finite() || prediction.predicted_yield < 0.0 {
        return Err(AdvisorError::MalformedOutput(format!(
            "{}: predicted yield {} is not a valid amount",
            FLOW, prediction.predicted_yield
        )));
    }

    info!(
        flow = FLOW,
        crop = %input.crop,
        county = %input.county,
        predicted_yield = prediction.predicted_yield,
        "Flow completed"
    );
    Ok(prediction)
}
