//! Run with: cargo run --package server --bin generate-types --features typescript

use std::fs;
use std::path::Path;

fn main() {
    println!("Generating TypeScript types...");

    let out_dir = Path::new("bindings");

    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("Failed to create output directory: {}", e);
        std::process::exit(1);
    }

    #[cfg(feature = "typescript")]
    {
        use ts_rs::TS;

        mavuno_core::CountyInfo::export_all_to(out_dir).expect("Failed to export CountyInfo");
        mavuno_core::Crop::export_all_to(out_dir).expect("Failed to export Crop");
        mavuno_core::FertilizerType::export_all_to(out_dir)
            .expect("Failed to export FertilizerType");
        mavuno_core::SoilQuality::export_all_to(out_dir).expect("Failed to export SoilQuality");
        mavuno_core::RainfallEstimate::export_all_to(out_dir)
            .expect("Failed to export RainfallEstimate");
        mavuno_core::FormDefaults::export_all_to(out_dir).expect("Failed to export FormDefaults");
        mavuno_core::FieldError::export_all_to(out_dir).expect("Failed to export FieldError");

        mavuno_core::YieldPredictionForm::export_all_to(out_dir)
            .expect("Failed to export YieldPredictionForm");
        mavuno_core::RecommendationForm::export_all_to(out_dir)
            .expect("Failed to export RecommendationForm");
        mavuno_core::FarmingGuideForm::export_all_to(out_dir)
            .expect("Failed to export FarmingGuideForm");
        mavuno_core::DiagnosisForm::export_all_to(out_dir)
            .expect("Failed to export DiagnosisForm");
        mavuno_core::TrendForm::export_all_to(out_dir).expect("Failed to export TrendForm");

        advisor::YieldPrediction::export_all_to(out_dir)
            .expect("Failed to export YieldPrediction");
        advisor::CropRecommendations::export_all_to(out_dir)
            .expect("Failed to export CropRecommendations");
        advisor::FarmingGuide::export_all_to(out_dir).expect("Failed to export FarmingGuide");
        advisor::PlantDiagnosis::export_all_to(out_dir).expect("Failed to export PlantDiagnosis");
        advisor::YieldTrendSummary::export_all_to(out_dir)
            .expect("Failed to export YieldTrendSummary");

        server::error::ErrorResponse::export_all_to(out_dir)
            .expect("Failed to export ErrorResponse");
        server::routes::TrendResponse::export_all_to(out_dir)
            .expect("Failed to export TrendResponse");
    }

    println!("TypeScript types generated in {}", out_dir.display());
}
