pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MavunoVision API",
        version = "0.1.0",
        description = "Crop yield prediction and farming advice for Kenyan counties"
    ),
    paths(
        routes::health_check,
        routes::list_counties,
        routes::list_crops,
        routes::get_crop,
        routes::list_fertilizers,
        routes::list_soil_types,
        routes::get_rainfall,
        routes::get_form_defaults,
        routes::predict_yield,
        routes::recommend_crops,
        routes::create_guide,
        routes::diagnose_plant,
        routes::summarize_trend,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::CropQuery,
        routes::RainfallQuery,
        routes::DefaultsQuery,
        routes::TrendResponse,
        error::ErrorResponse,
        mavuno_core::FieldError,
        mavuno_core::CountyInfo,
        mavuno_core::Crop,
        mavuno_core::YieldRecord,
        mavuno_core::FertilizerType,
        mavuno_core::SoilQuality,
        mavuno_core::RainfallEstimate,
        mavuno_core::FormDefaults,
        mavuno_core::YieldPredictionForm,
        mavuno_core::RecommendationForm,
        mavuno_core::FarmingGuideForm,
        mavuno_core::DiagnosisForm,
        mavuno_core::TrendForm,
        advisor::YieldPrediction,
        advisor::CropRecommendation,
        advisor::CropRecommendations,
        advisor::FarmingGuide,
        advisor::PlantDiagnosis,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reference", description = "Counties, crops and farm input catalogues"),
        (name = "rainfall", description = "Rainfall estimates and form defaults"),
        (name = "advisor", description = "AI-generated predictions, recommendations and diagnoses"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.uploads.body_limit();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health_check))
        .route("/api/counties", get(routes::list_counties))
        .route("/api/crops", get(routes::list_crops))
        .route("/api/crops/{name}", get(routes::get_crop))
        .route("/api/fertilizers", get(routes::list_fertilizers))
        .route("/api/soil-types", get(routes::list_soil_types))
        .route("/api/rainfall", get(routes::get_rainfall))
        .route("/api/forms/defaults", get(routes::get_form_defaults))
        .route("/api/predictions/yield", post(routes::predict_yield))
        .route("/api/recommendations", post(routes::recommend_crops))
        .route("/api/guides", post(routes::create_guide))
        .route("/api/diagnoses", post(routes::diagnose_plant))
        .route("/api/trends", post(routes::summarize_trend))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
