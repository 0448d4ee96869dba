pub mod county;
pub mod crop;
pub mod farm_inputs;
pub mod forms;
pub mod photo;
pub mod rainfall;

pub use county::{counties, is_known_county, CountyInfo, COUNTIES};
pub use crop::{crop_by_name, crops, crops_for_county, find_crop, Crop, CropSpec, YieldRecord};
pub use farm_inputs::{FertilizerType, SoilQuality};
pub use forms::*;
pub use photo::{PhotoDataUri, DEFAULT_MAX_PHOTO_BYTES};
pub use rainfall::{
    base_rainfall, estimate_rainfall, yearly_offset, RainfallEstimate,
    DEFAULT_BASE_RAINFALL_MM, MIN_RAINFALL_MM,
};
