//! Farmer-facing forms and their validated counterparts.
//!
//! Each form arrives as loosely typed JSON. `validate` checks every field,
//! reports all problems at once and produces the typed input handed to the
//! advisor flows.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::county::is_known_county;
use super::crop::{find_crop, YieldRecord};
use super::farm_inputs::{FertilizerType, SoilQuality};
use super::photo::PhotoDataUri;
use super::rainfall::estimate_rainfall;
use crate::error::{CoreError, FieldError, Result};

pub const DEFAULT_AREA_HECTARES: f64 = 10.0;
pub const DEFAULT_RAINFALL_MM: u32 = 500;

/// Form numbers arrive as JSON numbers or as the text of an input field.
#[derive(Deserialize)]
#[serde(untagged)]
enum FormNumber {
    Number(f64),
    Text(String),
}

/// Unparsable text becomes NaN so it fails field validation instead of the
/// whole body.
fn form_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FormNumber::deserialize(deserializer)? {
        FormNumber::Number(n) => n,
        FormNumber::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
    })
}

/// Fractional or out-of-range years become `i32::MIN` and fail the year check.
fn form_year<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = form_number(deserializer)?;
    if value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Ok(i32::MIN)
    }
}

#[derive(Default)]
struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(CoreError::Validation(self.0))
        }
    }

    fn year(&mut self, year: i32, current_year: i32) {
        if year < current_year {
            self.push("year", format!("Year must be {} or later.", current_year));
        }
    }

    fn positive(&mut self, field: &str, value: f64, label: &str) {
        if !(value.is_finite() && value > 0.0) {
            self.push(field, format!("{} must be a positive number.", label));
        }
    }

    fn county(&mut self, county: &str) {
        if county.trim().is_empty() {
            self.push("county", "Please select a county.");
        } else if !is_known_county(county) {
            self.push("county", format!("Unknown county: {}", county));
        }
    }

    fn crop(&mut self, field: &str, crop: &str) {
        if crop.trim().is_empty() {
            self.push(field, "Please select a crop.");
        } else if find_crop(crop).is_none() {
            self.push(field, format!("Unknown crop: {}", crop));
        }
    }

    fn fertilizer(&mut self, value: &str) -> Option<FertilizerType> {
        let parsed = FertilizerType::parse(value);
        if parsed.is_none() {
            self.push("fertilizer", "Please select a fertilizer type.");
        }
        parsed
    }

    fn soil_quality(&mut self, value: &str) -> Option<SoilQuality> {
        let parsed = SoilQuality::parse(value);
        if parsed.is_none() {
            self.push("soilQuality", "Please select a soil quality.");
        }
        parsed
    }
}

// Yield prediction

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct YieldPredictionForm {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub county: String,
    #[serde(default, deserialize_with = "form_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "form_number")]
    pub area: f64,
    #[serde(default)]
    pub fertilizer: String,
    #[serde(default)]
    pub soil_quality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPredictionInput {
    pub crop: String,
    pub county: String,
    pub year: i32,
    pub area: f64,
    pub fertilizer: FertilizerType,
    pub soil_quality: SoilQuality,
}

impl YieldPredictionForm {
    pub fn validate(&self, current_year: i32) -> Result<YieldPredictionInput> {
        let mut errors = FieldErrors::default();
        errors.crop("crop", &self.crop);
        errors.county(&self.county);
        errors.year(self.year, current_year);
        errors.positive("area", self.area, "Area");
        let fertilizer = errors.fertilizer(&self.fertilizer);
        let soil_quality = errors.soil_quality(&self.soil_quality);

        match (fertilizer, soil_quality) {
            (Some(fertilizer), Some(soil_quality)) => errors.finish(|| YieldPredictionInput {
                crop: self.crop.clone(),
                county: self.county.clone(),
                year: self.year,
                area: self.area,
                fertilizer,
                soil_quality,
            }),
            _ => Err(CoreError::Validation(errors.0)),
        }
    }
}

// Crop recommendation

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RecommendationForm {
    #[serde(default)]
    pub county: String,
    #[serde(default, deserialize_with = "form_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "form_number")]
    pub area: f64,
    #[serde(default, deserialize_with = "form_number")]
    pub rainfall: f64,
    #[serde(default)]
    pub soil_quality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub county: String,
    pub year: i32,
    pub area: f64,
    pub rainfall: f64,
    pub soil_quality: SoilQuality,
}

impl RecommendationForm {
    pub fn validate(&self, current_year: i32) -> Result<RecommendationInput> {
        let mut errors = FieldErrors::default();
        errors.county(&self.county);
        errors.year(self.year, current_year);
        errors.positive("area", self.area, "Area");
        errors.positive("rainfall", self.rainfall, "Rainfall");
        let soil_quality = errors.soil_quality(&self.soil_quality);

        match soil_quality {
            Some(soil_quality) => errors.finish(|| RecommendationInput {
                county: self.county.clone(),
                year: self.year,
                area: self.area,
                rainfall: self.rainfall,
                soil_quality,
            }),
            None => Err(CoreError::Validation(errors.0)),
        }
    }
}

// Farming guide

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FarmingGuideForm {
    #[serde(default)]
    pub crop_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingGuideInput {
    pub crop_name: String,
}

impl FarmingGuideForm {
    /// Any crop name is accepted here, not only catalogued ones.
    pub fn validate(&self) -> Result<FarmingGuideInput> {
        let mut errors = FieldErrors::default();
        let crop_name = self.crop_name.trim();
        if crop_name.is_empty() {
            errors.push("cropName", "Please enter a crop name.");
        }
        errors.finish(|| FarmingGuideInput {
            crop_name: crop_name.to_string(),
        })
    }
}

// Plant diagnosis

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisForm {
    #[serde(default)]
    pub photo_data_uri: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisInput {
    pub photo: PhotoDataUri,
    pub description: Option<String>,
}

impl DiagnosisForm {
    pub fn validate(&self, max_photo_bytes: usize) -> Result<DiagnosisInput> {
        let uri = match self.photo_data_uri.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => uri,
            _ => {
                return Err(CoreError::Validation(vec![FieldError::new(
                    "photoDataUri",
                    "Please upload a photo of the plant to analyze.",
                )]))
            }
        };

        let photo = PhotoDataUri::parse(uri, max_photo_bytes).map_err(|message| {
            CoreError::Validation(vec![FieldError::new("photoDataUri", message)])
        })?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(DiagnosisInput { photo, description })
    }
}

// Yield trend

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TrendForm {
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub county: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInput {
    pub crop: String,
    pub county: String,
    pub historical_data: String,
    #[serde(skip)]
    pub series: Vec<YieldRecord>,
}

impl TrendForm {
    pub fn validate(&self) -> Result<TrendInput> {
        let mut errors = FieldErrors::default();
        errors.crop("crop", &self.crop);
        errors.county(&self.county);

        let crop = find_crop(&self.crop).filter(|crop| !crop.history.is_empty());
        if find_crop(&self.crop).is_some() && crop.is_none() {
            errors.push("crop", format!("No historical data for {}", self.crop));
        }

        match crop {
            Some(crop) => errors.finish(|| TrendInput {
                crop: crop.name.to_string(),
                county: self.county.clone(),
                historical_data: crop.history_summary(),
                series: crop.history(),
            }),
            None => Err(CoreError::Validation(errors.0)),
        }
    }
}

// Defaults

/// Starting values for the prediction form
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    pub county: Option<String>,
    pub year: i32,
    pub area: f64,
    /// Pre-populated from the rainfall estimate when a county is chosen
    pub rainfall: u32,
}

impl FormDefaults {
    pub fn new(county: Option<&str>, current_year: i32) -> Self {
        let year = current_year + 1;
        let county = county.map(str::trim).filter(|c| !c.is_empty());
        Self {
            county: county.map(str::to_string),
            year,
            area: DEFAULT_AREA_HECTARES,
            rainfall: county
                .map(|c| estimate_rainfall(c, year))
                .unwrap_or(DEFAULT_RAINFALL_MM),
        }
    }
}
