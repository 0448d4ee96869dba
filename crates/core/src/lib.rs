//! Domain model for MavunoVision
//!
//! Static reference data for Kenyan agriculture (counties, crops, farm
//! inputs), the rainfall estimator and validation of the farmer-facing forms.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{CoreError, FieldError, Result};
