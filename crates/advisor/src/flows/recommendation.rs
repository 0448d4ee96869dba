use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use utoipa::ToSchema;

use mavuno_core::RecommendationInput;

use super::{generate_structured, GenerationSettings};
use crate::error::AdvisorResult;
use crate::gemini::Part;
use crate::model::GenerativeModel;
use crate::prompts::{recommendation_prompt, AGRONOMIST_SYSTEM_PROMPT};

const FLOW: &str = "crop_recommendation";

/// How many crops a recommendation lists at most
pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendation {
    pub crop_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CropRecommendations {
    pub recommendations: Vec<CropRecommendation>,
}

fn output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "description": "An array of top 3 crop recommendations.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "cropName": {"type": "STRING", "description": "The name of the recommended crop."},
                        "reason": {"type": "STRING", "description": "A brief reason why this crop is recommended for the given conditions."}
                    },
                    "required": ["cropName", "reason"]
                }
            }
        },
        "required": ["recommendations"]
    })
}

pub async fn run(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    input: &RecommendationInput,
) -> AdvisorResult<CropRecommendations> {
    let mut output: CropRecommendations = generate_structured(
        model,
        settings,
        AGRONOMIST_SYSTEM_PROMPT,
        vec![Part::text(recommendation_prompt(input))],
        output_schema(),
        FLOW,
    )
    .await?;

    if output.recommendations.len() > MAX_RECOMMENDATIONS {
        warn!(
            returned = output.recommendations.len(),
            "Model returned more recommendations than requested"
        );
        output.recommendations.truncate(MAX_RECOMMENDATIONS);
    }

    info!(county = %input.county, count = output.recommendations.len(), "Crops recommended");
    Ok(output)
}
