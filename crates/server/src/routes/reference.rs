use axum::extract::{Path, Query};
use axum::Json;
use mavuno_core::{
    crop_by_name, crops, crops_for_county, is_known_county, CoreError, CountyInfo, Crop,
    FertilizerType, SoilQuality,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CropQuery {
    /// Only crops grown in this county
    pub county: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/counties",
    responses(
        (status = 200, description = "All 47 counties with their base rainfall", body = Vec<CountyInfo>)
    ),
    tag = "reference"
)]
pub async fn list_counties() -> Json<Vec<CountyInfo>> {
    Json(CountyInfo::all())
}

#[utoipa::path(
    get,
    path = "/api/crops",
    params(
        ("county" = Option<String>, Query, description = "Filter to crops grown in this county")
    ),
    responses(
        (status = 200, description = "Crops with their yield history", body = Vec<Crop>),
        (status = 404, description = "Unknown county", body = ErrorResponse)
    ),
    tag = "reference"
)]
pub async fn list_crops(Query(query): Query<CropQuery>) -> Result<Json<Vec<Crop>>, AppError> {
    let county = query
        .county
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let list = match county {
        Some(county) => {
            if !is_known_county(county) {
                return Err(CoreError::UnknownCounty(county.to_string()).into());
            }
            debug!(county = %county, "Listing crops for county");
            crops_for_county(county).map(Crop::from).collect()
        }
        None => crops().iter().map(Crop::from).collect(),
    };

    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/crops/{name}",
    params(
        ("name" = String, Path, description = "Crop name, e.g. Maize")
    ),
    responses(
        (status = 200, description = "Crop with its yield history", body = Crop),
        (status = 404, description = "Unknown crop", body = ErrorResponse)
    ),
    tag = "reference"
)]
pub async fn get_crop(Path(name): Path<String>) -> Result<Json<Crop>, AppError> {
    let crop = crop_by_name(&name)?;
    Ok(Json(Crop::from(crop)))
}

#[utoipa::path(
    get,
    path = "/api/fertilizers",
    responses(
        (status = 200, description = "Fertilizer types offered on the prediction form", body = Vec<FertilizerType>)
    ),
    tag = "reference"
)]
pub async fn list_fertilizers() -> Json<Vec<FertilizerType>> {
    Json(FertilizerType::ALL.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/soil-types",
    responses(
        (status = 200, description = "Soil qualities offered on the forms", body = Vec<SoilQuality>)
    ),
    tag = "reference"
)]
pub async fn list_soil_types() -> Json<Vec<SoilQuality>> {
    Json(SoilQuality::ALL.to_vec())
}
