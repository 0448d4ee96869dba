use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use mavuno_core::FarmingGuideInput;

use super::{generate_structured, GenerationSettings};
use crate::error::AdvisorResult;
use crate::gemini::Part;
use crate::model::GenerativeModel;
use crate::prompts::{farming_guide_prompt, AGRONOMIST_SYSTEM_PROMPT};

const FLOW: &str = "farming_guide";

/// Step-by-step guide for growing one crop in Kenya
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FarmingGuide {
    pub crop_name: String,
    pub land_preparation: String,
    pub planting: String,
    pub watering_and_irrigation: String,
    pub fertilizer_application: String,
    pub pest_and_disease_control: String,
    pub harvesting: String,
    pub post_harvest_handling: String,
}

const SECTIONS: [(&str, &str); 8] = [
    ("cropName", "The name of the crop."),
    ("landPreparation", "Detailed steps for preparing the land before planting."),
    ("planting", "Instructions on how to plant the crop, including seed depth, spacing, and timing."),
    ("wateringAndIrrigation", "Guidance on the crop's water needs, including frequency and methods for irrigation."),
    ("fertilizerApplication", "A guide on applying fertilizer, including types, amounts, and application schedule."),
    ("pestAndDiseaseControl", "Common pests and diseases affecting this crop in Kenya and recommended control methods, both organic and chemical."),
    ("harvesting", "When and how to harvest the crop for maximum yield and quality."),
    ("postHarvestHandling", "Post-harvest handling, including storage and preparation for market."),
];

fn output_schema() -> Value {
    let properties: serde_json::Map<String, Value> = SECTIONS
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({"type": "STRING", "description": description}),
            )
        })
        .collect();
    let required: Vec<&str> = SECTIONS.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

pub async fn run(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    input: &FarmingGuideInput,
) -> AdvisorResult<FarmingGuide> {
    generate_structured(
        model,
        settings,
        AGRONOMIST_SYSTEM_PROMPT,
        vec![Part::text(farming_guide_prompt(input))],
        output_schema(),
        FLOW,
    )
    .await
}
