use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{CoreError, Result};

/// Static description of a crop grown in Kenya
#[derive(Debug)]
pub struct CropSpec {
    pub name: &'static str,
    /// Counties where the crop is commonly grown
    pub counties: &'static [&'static str],
    /// National average yield by year, tons per hectare
    pub history: &'static [(i32, f64)],
}

impl CropSpec {
    pub fn grows_in(&self, county: &str) -> bool {
        self.counties.contains(&county)
    }

    pub fn history(&self) -> Vec<YieldRecord> {
        self.history
            .iter()
            .map(|&(year, yield_tons_per_ha)| YieldRecord {
                year,
                yield_tons_per_ha,
            })
            .collect()
    }

    /// Renders the yield series the way it is handed to the trend analyst,
    /// e.g. `Year 2015: 2.5 tons/ha, Year 2016: 2.7 tons/ha`.
    pub fn history_summary(&self) -> String {
        self.history
            .iter()
            .map(|(year, value)| format!("Year {}: {} tons/ha", year, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct YieldRecord {
    pub year: i32,
    #[serde(rename = "yield")]
    pub yield_tons_per_ha: f64,
}

/// Owned view of a crop for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub name: String,
    pub counties: Vec<String>,
    pub historical_data: Vec<YieldRecord>,
}

impl From<&CropSpec> for Crop {
    fn from(spec: &CropSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            counties: spec.counties.iter().map(|c| c.to_string()).collect(),
            historical_data: spec.history(),
        }
    }
}

pub fn crops() -> &'static [CropSpec] {
    &CROPS
}

pub fn find_crop(name: &str) -> Option<&'static CropSpec> {
    CROPS.iter().find(|crop| crop.name == name)
}

pub fn crop_by_name(name: &str) -> Result<&'static CropSpec> {
    find_crop(name).ok_or_else(|| CoreError::UnknownCrop(name.to_string()))
}

pub fn crops_for_county<'a>(county: &'a str) -> impl Iterator<Item = &'static CropSpec> + 'a {
    CROPS.iter().filter(move |crop| crop.grows_in(county))
}

static CROPS: [CropSpec; 20] = [
    CropSpec {
        name: "Maize",
        counties: &[
            "Trans Nzoia", "Uasin Gishu", "Nakuru", "Bungoma", "Kakamega", "Nandi", "Narok",
            "Laikipia", "Meru", "Embu", "Machakos", "Kitui", "Makueni", "Kiambu", "Murang'a",
            "Kirinyaga", "Nyeri", "Kisii", "Nyamira", "Migori", "Homa Bay", "Kisumu", "Siaya",
            "Busia", "Vihiga", "Bomet", "Kericho",
        ],
        history: &[
            (2015, 2.5), (2016, 2.7), (2017, 2.6), (2018, 2.9), (2019, 3.1), (2020, 3.0),
            (2021, 3.3), (2022, 3.5), (2023, 3.4), (2024, 3.6),
        ],
    },
    CropSpec {
        name: "Wheat",
        counties: &[
            "Narok", "Uasin Gishu", "Nakuru", "Trans Nzoia", "Meru", "Laikipia", "Nyandarua",
        ],
        history: &[
            (2015, 1.8), (2016, 1.9), (2017, 2.1), (2018, 2.0), (2019, 2.2), (2020, 2.4),
            (2021, 2.5), (2022, 2.3), (2023, 2.6), (2024, 2.7),
        ],
    },
    CropSpec {
        name: "Beans",
        counties: &[
            "Nakuru", "Bungoma", "Kakamega", "Meru", "Embu", "Machakos", "Kitui", "Makueni",
            "Kiambu", "Murang'a", "Nyeri", "Kirinyaga", "Kisii", "Nyamira", "Migori",
            "Homa Bay", "Kisumu", "Siaya", "Busia", "Vihiga", "Bomet", "Kericho",
        ],
        history: &[
            (2015, 0.8), (2016, 0.9), (2017, 0.85), (2018, 1.0), (2019, 1.1), (2020, 1.05),
            (2021, 1.2), (2022, 1.3), (2023, 1.25), (2024, 1.35),
        ],
    },
    CropSpec {
        name: "Potatoes",
        counties: &[
            "Nyandarua", "Nakuru", "Elgeyo-Marakwet", "Meru", "Nyeri", "Kiambu", "Taita-Taveta",
            "Narok",
        ],
        history: &[
            (2015, 15.0), (2016, 16.0), (2017, 15.5), (2018, 17.0), (2019, 18.0), (2020, 17.5),
            (2021, 18.5), (2022, 19.0), (2023, 18.8), (2024, 19.5),
        ],
    },
    CropSpec {
        name: "Tea",
        counties: &[
            "Kericho", "Bomet", "Nandi", "Kiambu", "Murang'a", "Nyeri", "Kirinyaga", "Embu",
            "Meru", "Tharaka-Nithi", "Kisii", "Nyamira", "Kakamega", "Vihiga",
        ],
        history: &[
            (2015, 1.2), (2016, 1.3), (2017, 1.25), (2018, 1.4), (2019, 1.5), (2020, 1.6),
            (2021, 1.55), (2022, 1.7), (2023, 1.65), (2024, 1.75),
        ],
    },
    CropSpec {
        name: "Coffee",
        counties: &[
            "Kiambu", "Murang'a", "Nyeri", "Kirinyaga", "Embu", "Meru", "Machakos", "Nakuru",
            "Trans Nzoia", "Bungoma", "Kisii",
        ],
        history: &[
            (2015, 0.6), (2016, 0.7), (2017, 0.65), (2018, 0.75), (2019, 0.8), (2020, 0.78),
            (2021, 0.85), (2022, 0.9), (2023, 0.88), (2024, 0.92),
        ],
    },
    CropSpec {
        name: "Sugarcane",
        counties: &[
            "Kisumu", "Kakamega", "Busia", "Bungoma", "Migori", "Homa Bay", "Nandi", "Kwale",
        ],
        history: &[
            (2015, 55.0), (2016, 60.0), (2017, 58.0), (2018, 62.0), (2019, 65.0), (2020, 63.0),
            (2021, 68.0), (2022, 70.0), (2023, 69.0), (2024, 71.0),
        ],
    },
    CropSpec {
        name: "Avocado",
        counties: &[
            "Murang'a", "Kiambu", "Nyeri", "Kirinyaga", "Embu", "Meru", "Kisii", "Nakuru",
            "Uasin Gishu",
        ],
        history: &[
            (2015, 7.0), (2016, 8.0), (2017, 7.5), (2018, 9.0), (2019, 10.0), (2020, 12.0),
            (2021, 14.0), (2022, 15.0), (2023, 16.0), (2024, 17.0),
        ],
    },
    CropSpec {
        name: "Mango",
        counties: &[
            "Makueni", "Machakos", "Kitui", "Embu", "Meru", "Murang'a", "Tana River", "Kilifi",
            "Kwale",
        ],
        history: &[
            (2015, 10.0), (2016, 11.0), (2017, 10.5), (2018, 12.0), (2019, 13.0), (2020, 12.5),
            (2021, 14.0), (2022, 15.0), (2023, 14.8), (2024, 15.5),
        ],
    },
    CropSpec {
        name: "Sorghum",
        counties: &[
            "Tharaka-Nithi", "Meru", "Embu", "Kitui", "Makueni", "Machakos", "Homa Bay",
            "Migori", "Siaya", "Busia", "Baringo", "Turkana",
        ],
        history: &[
            (2015, 1.0), (2016, 1.1), (2017, 1.0), (2018, 1.2), (2019, 1.3), (2020, 1.2),
            (2021, 1.4), (2022, 1.5), (2023, 1.4), (2024, 1.5),
        ],
    },
    CropSpec {
        name: "Millet",
        counties: &[
            "Kitui", "Machakos", "Makueni", "Tharaka-Nithi", "Busia", "Siaya", "Baringo",
            "West Pokot",
        ],
        history: &[
            (2015, 0.7), (2016, 0.8), (2017, 0.75), (2018, 0.9), (2019, 0.95), (2020, 1.0),
            (2021, 1.1), (2022, 1.05), (2023, 1.12), (2024, 1.15),
        ],
    },
    CropSpec {
        name: "Cassava",
        counties: &[
            "Busia", "Siaya", "Kisumu", "Homa Bay", "Migori", "Kilifi", "Kwale", "Lamu",
            "Taita-Taveta", "Kitui",
        ],
        history: &[
            (2015, 10.0), (2016, 11.0), (2017, 10.8), (2018, 12.0), (2019, 12.5), (2020, 13.0),
            (2021, 13.5), (2022, 14.0), (2023, 14.2), (2024, 14.5),
        ],
    },
    CropSpec {
        name: "Sweet Potatoes",
        counties: &[
            "Homa Bay", "Migori", "Busia", "Vihiga", "Kakamega", "Nyamira", "Kisii", "Makueni",
            "Kitui", "Machakos",
        ],
        history: &[
            (2015, 5.0), (2016, 5.5), (2017, 5.2), (2018, 6.0), (2019, 6.3), (2020, 6.5),
            (2021, 6.8), (2022, 7.0), (2023, 7.1), (2024, 7.5),
        ],
    },
    CropSpec {
        name: "Tomatoes",
        counties: &[
            "Kirinyaga", "Kajiado", "Nakuru", "Kiambu", "Murang'a", "Taita-Taveta",
        ],
        history: &[
            (2015, 20.0), (2016, 22.0), (2017, 21.0), (2018, 24.0), (2019, 25.0), (2020, 23.0),
            (2021, 26.0), (2022, 28.0), (2023, 27.0), (2024, 29.0),
        ],
    },
    CropSpec {
        name: "Cabbages",
        counties: &[
            "Kiambu", "Nyandarua", "Nyeri", "Meru", "Nakuru", "Uasin Gishu", "Elgeyo-Marakwet",
        ],
        history: &[
            (2015, 30.0), (2016, 32.0), (2017, 31.0), (2018, 35.0), (2019, 36.0), (2020, 34.0),
            (2021, 38.0), (2022, 40.0), (2023, 39.0), (2024, 41.0),
        ],
    },
    CropSpec {
        name: "Onions",
        counties: &[
            "Kajiado", "Narok", "Laikipia", "Nakuru", "Meru", "Taita-Taveta", "Bungoma",
        ],
        history: &[
            (2015, 14.0), (2016, 15.0), (2017, 14.5), (2018, 16.0), (2019, 17.0), (2020, 16.5),
            (2021, 18.0), (2022, 19.0), (2023, 18.5), (2024, 19.2),
        ],
    },
    CropSpec {
        name: "Kale (Sukuma Wiki)",
        counties: &[
            "Kiambu", "Murang'a", "Nyeri", "Nakuru", "Uasin Gishu", "Kericho", "Kisii", "Meru",
            "Bungoma",
        ],
        history: &[
            (2015, 10.0), (2016, 11.0), (2017, 10.5), (2018, 12.0), (2019, 13.0), (2020, 12.5),
            (2021, 14.0), (2022, 14.5), (2023, 14.2), (2024, 15.0),
        ],
    },
    CropSpec {
        name: "Bananas",
        counties: &[
            "Kisii", "Nyamira", "Meru", "Embu", "Murang'a", "Kirinyaga", "Kakamega", "Bungoma",
            "Taita-Taveta",
        ],
        history: &[
            (2015, 25.0), (2016, 27.0), (2017, 26.0), (2018, 29.0), (2019, 30.0), (2020, 32.0),
            (2021, 34.0), (2022, 35.0), (2023, 33.0), (2024, 36.0),
        ],
    },
    CropSpec {
        name: "Carrots",
        counties: &[
            "Nyandarua", "Kiambu", "Nakuru", "Elgeyo-Marakwet", "Uasin Gishu", "Meru",
        ],
        history: &[
            (2015, 20.0), (2016, 22.0), (2017, 21.0), (2018, 24.0), (2019, 25.0), (2020, 23.0),
            (2021, 26.0), (2022, 27.0), (2023, 26.5), (2024, 28.0),
        ],
    },
    CropSpec {
        name: "Capsicum",
        counties: &[
            "Kajiado", "Nakuru", "Kiambu", "Murang'a", "Laikipia", "Taita-Taveta", "Kirinyaga",
        ],
        history: &[
            (2015, 8.0), (2016, 8.5), (2017, 8.2), (2018, 9.0), (2019, 9.5), (2020, 10.0),
            (2021, 10.5), (2022, 11.0), (2023, 10.8), (2024, 11.5),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::county::is_known_county;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(crops().len(), 20);
        for crop in crops() {
            assert_eq!(crop.history.len(), 10, "{}", crop.name);
            assert!(!crop.counties.is_empty(), "{}", crop.name);
            for county in crop.counties {
                assert!(is_known_county(county), "{} lists {}", crop.name, county);
            }
        }
    }

    #[test]
    fn test_find_crop() {
        let maize = find_crop("Maize").unwrap();
        assert!(maize.grows_in("Trans Nzoia"));
        assert!(!maize.grows_in("Mombasa"));
        assert!(find_crop("maize").is_none());
        assert!(matches!(
            crop_by_name("Quinoa"),
            Err(CoreError::UnknownCrop(name)) if name == "Quinoa"
        ));
    }

    #[test]
    fn test_history_summary_format() {
        let maize = find_crop("Maize").unwrap();
        let summary = maize.history_summary();
        assert!(summary.starts_with("Year 2015: 2.5 tons/ha, Year 2016: 2.7 tons/ha"));
        assert!(summary.contains("Year 2020: 3 tons/ha"));
        assert!(summary.ends_with("Year 2024: 3.6 tons/ha"));
    }

    #[test]
    fn test_crops_for_county() {
        let names: Vec<_> = crops_for_county("Kericho").map(|c| c.name).collect();
        assert!(names.contains(&"Tea"));
        assert!(names.contains(&"Maize"));
        assert!(!names.contains(&"Sugarcane"));
        assert_eq!(crops_for_county("Nowhere").count(), 0);
    }

    #[test]
    fn test_crop_view_serializes_yield_key() {
        let crop = Crop::from(find_crop("Tea").unwrap());
        let json = serde_json::to_value(&crop).unwrap();
        assert_eq!(json["name"], "Tea");
        assert_eq!(json["historicalData"][0]["year"], 2015);
        assert_eq!(json["historicalData"][0]["yield"], 1.2);
    }
}
