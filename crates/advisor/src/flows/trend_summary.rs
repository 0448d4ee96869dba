use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use mavuno_core::TrendInput;

use super::{generate_structured, GenerationSettings};
use crate::error::{AdvisorError, AdvisorResult};
use crate::gemini::Part;
use crate::model::GenerativeModel;
use crate::prompts::{trend_summary_prompt, ANALYST_SYSTEM_PROMPT};

const FLOW: &str = "yield_trend_summary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct YieldTrendSummary {
    pub summary: String,
}

fn output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {"type": "STRING", "description": "A descriptive summary of the historical yield trends."}
        },
        "required": ["summary"]
    })
}

pub async fn run(
    model: &dyn GenerativeModel,
    settings: &GenerationSettings,
    input: &TrendInput,
) -> AdvisorResult<YieldTrendSummary> {
    let output: YieldTrendSummary = generate_structured(
        model,
        settings,
        ANALYST_SYSTEM_PROMPT,
        vec![Part::text(trend_summary_prompt(input))],
        output_schema(),
        FLOW,
    )
    .await?;

    if output.summary.trim().is_empty() {
        return Err(AdvisorError::EmptyResponse(format!("{}: empty summary", FLOW)));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedModel;
    use mavuno_core::TrendForm;

    fn input() -> TrendInput {
        TrendForm {
            crop: "Beans".to_string(),
            county: "Meru".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_summary_parsed() {
        let model = ScriptedModel::new(vec![ScriptedModel::json(
            json!({"summary": "Yields rose steadily with a dip in 2017."}),
        )]);
        let output = run(&model, &GenerationSettings::default(), &input())
            .await
            .unwrap();
        assert!(output.summary.contains("2017"));

        let prompt = model.requests()[0].contents[0].text();
        assert!(prompt.contains("Crop: Beans"));
        assert!(prompt.contains("Historical Data: Year 2015:"));
    }

    #[tokio::test]
    async fn test_blank_summary_rejected() {
        let model = ScriptedModel::new(vec![ScriptedModel::json(json!({"summary": "  "}))]);
        let err = run(&model, &GenerationSettings::default(), &input())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyResponse(_)));
    }
}
