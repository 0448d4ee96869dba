//! Prompts for the advisory flows

use mavuno_core::{
    crops, DiagnosisInput, FarmingGuideInput, RecommendationInput, TrendInput,
    YieldPredictionInput,
};

use crate::tools::RAINFALL_TOOL_NAME;

pub const YIELD_SYSTEM_PROMPT: &str = r#"You are an expert agricultural model, capable of predicting crop yields and providing recommendations based on historical and environmental data for Kenya."#;

pub const AGRONOMIST_SYSTEM_PROMPT: &str =
    r#"You are an expert agronomist providing practical advice to farmers in Kenya."#;

pub const PATHOLOGIST_SYSTEM_PROMPT: &str = r#"You are an expert plant pathologist and botanist. Your task is to analyze an image of a plant and an optional user description to diagnose its health."#;

pub const ANALYST_SYSTEM_PROMPT: &str = r#"You are an expert agricultural analyst. You are tasked with summarizing historical yield trends for a specific crop and county."#;

const JSON_ONLY: &str = "Return your response as a valid JSON object.";

pub fn yield_prediction_prompt(input: &YieldPredictionInput) -> String {
    format!(
        r#"First, use the {tool} tool to find the predicted rainfall for the given county and year.

Then, based on that rainfall data and the following input data, provide a predicted crop yield, recommend the best fertilizer to use, and give advice on irrigation.

Input Data:
- Crop: {crop}
- County: {county}
- Year: {year}
- Area (hectares): {area}
- Fertilizer Type Used for Prediction: {fertilizer}
- Soil Quality: {soil}

Your Task:
1. Predict Yield: Predict the crop yield in tons. Give your answer as a floating point number for the "predictedYield" field.
2. Recommend Fertilizer: Based on all inputs, determine the single best fertilizer type for maximum yield ("recommendedFertilizer").
3. Advise on Irrigation: Based on the crop's water needs and the predicted rainfall, provide concise irrigation advice ("irrigationAdvice"). State if it's needed and briefly why.

Give your answer as a valid JSON object with exactly the fields predictedYield, recommendedFertilizer and irrigationAdvice. Do not include units or other verbiage in the output fields."#,
        tool = RAINFALL_TOOL_NAME,
        crop = input.crop,
        county = input.county,
        year = input.year,
        area = input.area,
        fertilizer = input.fertilizer,
        soil = input.soil_quality,
    )
}

pub fn recommendation_prompt(input: &RecommendationInput) -> String {
    let all_crops = crops()
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Based on the following conditions, recommend the top 3 most suitable crops to plant. The available crops to choose from are: {all_crops}.

For each recommendation, provide a concise reason explaining why it's a good choice for the given county, climate, and soil.

Input Data:
- County: {county}
- Year: {year}
- Land Area (hectares): {area}
- Predicted Rainfall (mm): {rainfall}
- Soil Quality: {soil}

{JSON_ONLY}"#,
        county = input.county,
        year = input.year,
        area = input.area,
        rainfall = input.rainfall,
        soil = input.soil_quality,
    )
}

pub fn farming_guide_prompt(input: &FarmingGuideInput) -> String {
    format!(
        r#"Create a detailed farming guide for a farmer in Kenya. The guide should be practical, easy to understand, and specific to Kenyan conditions.

Generate a comprehensive guide for the following crop: {crop}

Provide detailed, actionable advice for each of the following sections.

- Land Preparation
- Planting (seed depth, spacing and timing)
- Watering and Irrigation
- Fertilizer Application (types, amounts and schedule)
- Pest and Disease Control (common problems in Kenya, organic and chemical control)
- Harvesting
- Post-Harvest Handling (storage and preparation for market)

{JSON_ONLY}"#,
        crop = input.crop_name,
    )
}

pub fn diagnosis_prompt(input: &DiagnosisInput) -> String {
    let description = input
        .description
        .as_deref()
        .unwrap_or("No description provided.");

    format!(
        r#"1. First, determine if the image actually contains a plant. If not, set "isPlant" to false and provide no other information.
2. If it is a plant, identify its common name and populate "plantName".
3. Assess the plant's health. Look for signs of disease, pests, or nutrient deficiencies.
4. If the plant is healthy, set "isHealthy" to true and leave "diagnosis", "possibleCause", and "remedy" empty.
5. If the plant is unhealthy, set "isHealthy" to false.
   - Provide a concise "diagnosis" of the problem (e.g. "Powdery Mildew", "Aphid Infestation", "Nitrogen Deficiency").
   - Describe the "possibleCause" of the issue (e.g. "High humidity and poor air circulation", "Overwatering leading to root rot").
   - Provide a practical, actionable "remedy" which is the recommended mode of treatment. This could involve organic or chemical treatments, or changes in care.

Use the following information for your analysis. The photo is attached.

Description: {description}"#
    )
}

pub fn trend_summary_prompt(input: &TrendInput) -> String {
    format!(
        r#"Given the following historical yield data, provide a concise and informative summary of the trends. Highlight any significant increases, decreases, or periods of stability in yield.

Crop: {crop}
County: {county}
Historical Data: {data}

{JSON_ONLY}"#,
        crop = input.crop,
        county = input.county,
        data = input.historical_data,
    )
}
