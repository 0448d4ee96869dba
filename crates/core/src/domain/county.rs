use serde::Serialize;
use utoipa::ToSchema;

use super::rainfall::{base_rainfall, DEFAULT_BASE_RAINFALL_MM};

/// The 47 counties of Kenya, in the order they are offered to farmers
pub const COUNTIES: [&str; 47] = [
    "Mombasa",
    "Kwale",
    "Kilifi",
    "Tana River",
    "Lamu",
    "Taita-Taveta",
    "Garissa",
    "Wajir",
    "Mandera",
    "Marsabit",
    "Isiolo",
    "Meru",
    "Tharaka-Nithi",
    "Embu",
    "Kitui",
    "Machakos",
    "Makueni",
    "Nyandarua",
    "Nyeri",
    "Kirinyaga",
    "Murang'a",
    "Kiambu",
    "Turkana",
    "West Pokot",
    "Samburu",
    "Trans Nzoia",
    "Uasin Gishu",
    "Elgeyo-Marakwet",
    "Nandi",
    "Baringo",
    "Laikipia",
    "Nakuru",
    "Narok",
    "Kajiado",
    "Kericho",
    "Bomet",
    "Kakamega",
    "Vihiga",
    "Bungoma",
    "Busia",
    "Siaya",
    "Kisumu",
    "Homa Bay",
    "Migori",
    "Kisii",
    "Nyamira",
    "Nairobi",
];

pub fn counties() -> &'static [&'static str] {
    &COUNTIES
}

/// Exact, case-sensitive match against the county list
pub fn is_known_county(name: &str) -> bool {
    COUNTIES.contains(&name)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CountyInfo {
    pub name: String,
    /// Reference annual rainfall in millimeters
    pub base_rainfall_mm: u32,
}

impl CountyInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_rainfall_mm: base_rainfall(name).unwrap_or(DEFAULT_BASE_RAINFALL_MM),
        }
    }

    pub fn all() -> Vec<Self> {
        COUNTIES.iter().map(|name| Self::new(name)).collect()
    }
}
