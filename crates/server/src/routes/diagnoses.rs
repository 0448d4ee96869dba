use advisor::PlantDiagnosis;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mavuno_core::DiagnosisForm;
use tracing::info;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/diagnoses",
    request_body = DiagnosisForm,
    responses(
        (status = 200, description = "Plant health diagnosis", body = PlantDiagnosis),
        (status = 400, description = "Missing or invalid photo", body = ErrorResponse),
        (status = 502, description = "Model failure", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    ),
    tag = "advisor"
)]
pub async fn diagnose_plant(
    State(state): State<AppState>,
    payload: Result<Json<DiagnosisForm>, JsonRejection>,
) -> Result<Json<PlantDiagnosis>, AppError> {
    let Json(form) = payload?;
    let input = form.validate(state.config.uploads.max_photo_bytes)?;
    info!(
        mime_type = %input.photo.mime_type,
        photo_bytes = input.photo.byte_len,
        has_description = input.description.is_some(),
        "Diagnosing plant"
    );

    let diagnosis = state.advisor()?.diagnose_plant(&input).await?;
    Ok(Json(diagnosis))
}
