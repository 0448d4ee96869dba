use axum::extract::{Query, State};
use axum::Json;
use mavuno_core::{is_known_county, CoreError, FieldError, FormDefaults, RainfallEstimate};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RainfallQuery {
    pub county: Option<String>,
    /// Defaults to next year
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DefaultsQuery {
    pub county: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/rainfall",
    params(
        ("county" = String, Query, description = "County name, e.g. Nakuru"),
        ("year" = Option<i32>, Query, description = "Year of the estimate, defaults to next year")
    ),
    responses(
        (status = 200, description = "Estimated annual rainfall", body = RainfallEstimate),
        (status = 400, description = "County missing", body = ErrorResponse)
    ),
    tag = "rainfall"
)]
pub async fn get_rainfall(
    State(state): State<AppState>,
    Query(query): Query<RainfallQuery>,
) -> Result<Json<RainfallEstimate>, AppError> {
    let county = query
        .county
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::Validation(vec![FieldError::new("county", "Please select a county.")])
        })?;
    let year = query.year.unwrap_or_else(|| state.current_year() + 1);

    let estimate = RainfallEstimate::new(county, year);
    debug!(
        county = %estimate.county,
        year = estimate.year,
        rainfall_mm = estimate.rainfall_mm,
        known_county = estimate.known_county,
        "Rainfall estimated"
    );

    Ok(Json(estimate))
}

#[utoipa::path(
    get,
    path = "/api/forms/defaults",
    params(
        ("county" = Option<String>, Query, description = "Pre-populate rainfall for this county")
    ),
    responses(
        (status = 200, description = "Starting values for the prediction form", body = FormDefaults),
        (status = 404, description = "Unknown county", body = ErrorResponse)
    ),
    tag = "rainfall"
)]
pub async fn get_form_defaults(
    State(state): State<AppState>,
    Query(query): Query<DefaultsQuery>,
) -> Result<Json<FormDefaults>, AppError> {
    let county = query
        .county
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    if let Some(county) = county {
        if !is_known_county(county) {
            return Err(CoreError::UnknownCounty(county.to_string()).into());
        }
    }

    Ok(Json(FormDefaults::new(county, state.current_year())))
}
