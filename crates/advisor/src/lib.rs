//! Generative-AI advisory flows for MavunoVision.
//!
//! The [`Advisor`] runs the five farmer-facing flows against any
//! [`GenerativeModel`]; [`GeminiClient`] is the production model.

pub mod error;
pub mod flows;
pub mod gemini;
pub mod json;
pub mod model;
pub mod prompts;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use mavuno_core::{
    DiagnosisInput, FarmingGuideInput, RecommendationInput, TrendInput, YieldPredictionInput,
};

pub use error::{AdvisorError, AdvisorResult};
pub use flows::diagnosis::PlantDiagnosis;
pub use flows::farming_guide::FarmingGuide;
pub use flows::recommendation::{CropRecommendation, CropRecommendations};
pub use flows::trend_summary::YieldTrendSummary;
pub use flows::yield_prediction::YieldPrediction;
pub use flows::GenerationSettings;
pub use gemini::GeminiClient;
pub use model::GenerativeModel;

/// Entry point for the advisory flows
#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn GenerativeModel>,
    settings: GenerationSettings,
}

impl Advisor {
    pub fn new(model: Arc<dyn GenerativeModel>, settings: GenerationSettings) -> Self {
        Self { model, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub async fn predict_yield(&self, input: &YieldPredictionInput) -> AdvisorResult<YieldPrediction> {
        flows::yield_prediction::run(self.model.as_ref(), &self.settings, input).await
    }

    pub async fn recommend_crops(
        &self,
        input: &RecommendationInput,
    ) -> AdvisorResult<CropRecommendations> {
        flows::recommendation::run(self.model.as_ref(), &self.settings, input).await
    }

    pub async fn farming_guide(&self, input: &FarmingGuideInput) -> AdvisorResult<FarmingGuide> {
        flows::farming_guide::run(self.model.as_ref(), &self.settings, input).await
    }

    pub async fn diagnose_plant(&self, input: &DiagnosisInput) -> AdvisorResult<PlantDiagnosis> {
        flows::diagnosis::run(self.model.as_ref(), &self.settings, input).await
    }

    pub async fn summarize_trend(&self, input: &TrendInput) -> AdvisorResult<YieldTrendSummary> {
        flows::trend_summary::run(self.model.as_ref(), &self.settings, input).await
    }
}
