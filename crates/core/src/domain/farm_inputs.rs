use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum FertilizerType {
    Urea,
    #[serde(rename = "DAP")]
    Dap,
    #[serde(rename = "CAN")]
    Can,
    #[serde(rename = "NPK")]
    Npk,
    Manure,
    #[serde(rename = "Sulphate of Ammonia (SA)")]
    SulphateOfAmmonia,
}

impl FertilizerType {
    pub const ALL: [FertilizerType; 6] = [
        Self::Urea,
        Self::Dap,
        Self::Can,
        Self::Npk,
        Self::Manure,
        Self::SulphateOfAmmonia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urea => "Urea",
            Self::Dap => "DAP",
            Self::Can => "CAN",
            Self::Npk => "NPK",
            Self::Manure => "Manure",
            Self::SulphateOfAmmonia => "Sulphate of Ammonia (SA)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for FertilizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum SoilQuality {
    Loam,
    Clay,
    Sandy,
    Silt,
    Peat,
    Chalky,
}

impl SoilQuality {
    pub const ALL: [SoilQuality; 6] = [
        Self::Loam,
        Self::Clay,
        Self::Sandy,
        Self::Silt,
        Self::Peat,
        Self::Chalky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loam => "Loam",
            Self::Clay => "Clay",
            Self::Sandy => "Sandy",
            Self::Silt => "Silt",
            Self::Peat => "Peat",
            Self::Chalky => "Chalky",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }
}

impl fmt::Display for SoilQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
