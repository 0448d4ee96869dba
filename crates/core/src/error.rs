use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown county: {0}")]
    UnknownCounty(String),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

pub type Result<T> = std::result::Result<T, CoreError>;
