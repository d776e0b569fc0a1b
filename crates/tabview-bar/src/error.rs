//! Theme error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Colour component out of range in {field}: {value}")]
    ComponentOutOfRange { field: &'static str, value: f32 },

    #[error("Invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),
}
