use advisor::YieldPrediction;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mavuno_core::YieldPredictionForm;
use tracing::info;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/predictions/yield",
    request_body = YieldPredictionForm,
    responses(
        (status = 200, description = "Predicted yield with fertilizer and irrigation advice", body = YieldPrediction),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 502, description = "Model failure", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    ),
    tag = "advisor"
)]
pub async fn predict_yield(
    State(state): State<AppState>,
    payload: Result<Json<YieldPredictionForm>, JsonRejection>,
) -> Result<Json<YieldPrediction>, AppError> {
    let Json(form) = payload?;
    let input = form.validate(state.current_year())?;
    info!(crop = %input.crop, county = %input.county, year = input.year, "Predicting yield");

    let prediction = state.advisor()?.predict_yield(&input).await?;
    Ok(Json(prediction))
}
