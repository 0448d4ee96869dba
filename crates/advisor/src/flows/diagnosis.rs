use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use utoipa::ToSchema;

use mavuno_core::DiagnosisInput;

use super::{generate_structured, GenerationSettings};
use crate::error::AdvisorResult;
use crate::gemini::Part;
use crate::model::GenerativeModel;
use crate::prompts::{diagnosis_prompt, PATHOLOGIST_SYSTEM_PROMPT};

const FLOW: &str = "plant_diagnosis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PlantDiagnosis {
    pub is_plant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
}

impl PlantDiagnosis {
    /// Drops fields that contradict the verdict, and blank strings.
    pub fn normalize(mut self) -> Self {
        for field in [
            &mut self.plant_name,
            &mut self.diagnosis,
            &mut self.possible_cause,
            &mut self.remedy,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }

        if !self.is_plant {
            self.plant_name = None;
            self.is_healthy = false;
        }
        if !self.is_plant || self.is_healthy {
            self.diagnosis = None;
            self.possible_cause = None;
            self.remedy = None;
        }
        self
    }
}

fn output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "isPlant": {"type": "BOOLEAN", "description": "Whether or not the image contains a plant."},
            "plantName": {"type": "STRING", "description": "The common name of the identified plant."},
            "isHealthy": {"type": "BOOLEAN", "description": "Whether the plant appears to be healthy."},
            "diagnosis": {"type": "STRING", "description": "The diagnosis of the plant's health issue, if any."},
            "possibleCause": {"type": "STRING", "description": "The likely environmental or pathological cause of the issue."},
            "remedy": {"type": "STRING", "description": "A recommended mode of treatment or course of action."}
        },
        "required": ["isPlant", "isHealthy"]
    })
}

pub async fn run(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    input: &DiagnosisInput,
) -> AdvisorResult<PlantDiagnosis> {
    let parts = vec![
        Part::text(diagnosis_prompt(input)),
        Part::inline_data(input.photo.mime_type.clone(), input.photo.data.clone()),
    ];

    let output: PlantDiagnosis = generate_structured(
        model,
        settings,
        PATHOLOGIST_SYSTEM_PROMPT,
        parts,
        output_schema(),
        FLOW,
    )
    .await?;
    let output = output.normalize();

    info!(
        photo_bytes = input.photo.byte_len,
        is_plant = output.is_plant,
        is_healthy = output.is_healthy,
        "Plant diagnosed"
    );
    Ok(output)
}
