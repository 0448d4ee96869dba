use advisor::FarmingGuide;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mavuno_core::FarmingGuideForm;
use tracing::info;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/guides",
    request_body = FarmingGuideForm,
    responses(
        (status = 200, description = "Step-by-step farming guide", body = FarmingGuide),
        (status = 400, description = "Crop name missing", body = ErrorResponse),
        (status = 502, description = "Model failure", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    ),
    tag = "advisor"
)]
pub async fn create_guide(
    State(state): State<AppState>,
    payload: Result<Json<FarmingGuideForm>, JsonRejection>,
) -> Result<Json<FarmingGuide>, AppError> {
    let Json(form) = payload?;
    let input = form.validate()?;
    info!(crop = %input.crop_name, "Generating farming guide");

    let guide = state.advisor()?.farming_guide(&input).await?;
    Ok(Json(guide))
}
