use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mavuno_core::{TrendForm, YieldRecord};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

/// Trend narrative plus the series it describes, for charting
#[derive(Debug, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub crop: String,
    pub county: String,
    pub summary: String,
    pub series: Vec<YieldRecord>,
}

#[utoipa::path(
    post,
    path = "/api/trends",
    request_body = TrendForm,
    responses(
        (status = 200, description = "Historical yield trend summary", body = TrendResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 502, description = "Model failure", body = ErrorResponse),
        (status = 503, description = "No API key configured", body = ErrorResponse)
    ),
    tag = "advisor"
)]
pub async fn summarize_trend(
    State(state): State<AppState>,
    payload: Result<Json<TrendForm>, JsonRejection>,
) -> Result<Json<TrendResponse>, AppError> {
    let Json(form) = payload?;
    let input = form.validate()?;
    info!(crop = %input.crop, county = %input.county, "Summarizing yield trend");

    let output = state.advisor()?.summarize_trend(&input).await?;
    Ok(Json(TrendResponse {
        crop: input.crop,
        county: input.county,
        summary: output.summary,
        series: input.series,
    }))
}
