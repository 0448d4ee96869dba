use advisor::CropRecommendations;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mavuno_core::RecommendationForm;
use tracing::info;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/recommendations",
    request_body = RecommendationForm,
    responses(
        (status = 200, description = "Top 3 crops for the conditions", body = CropRecommendations),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 502, description = "Model failure", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    ),
    tag = "advisor"
)]
pub async fn recommend_crops(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationForm>, JsonRejection>,
) -> Result<Json<CropRecommendations>, AppError> {
    let Json(form) = payload?;
    let input = form.validate(state.current_year())?;
    info!(county = %input.county, soil = %input.soil_quality, "Recommending crops");

    let recommendations = state.advisor()?.recommend_crops(&input).await?;
    Ok(Json(recommendations))
}
