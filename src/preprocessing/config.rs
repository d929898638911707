//! Preprocessing configuration

use super::TransformType;
use crate::error::{PreprocessError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the rental feature pipeline
///
/// Column names are exact-match, case-sensitive. The defaults follow the
/// rental dataset schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Column holding the room size (square measure)
    pub size_column: String,

    /// Column holding the floor description string ("<floor> out of <total>")
    pub floor_column: String,

    /// Categorical columns to target-encode
    pub categorical_columns: Vec<String>,

    /// Transform applied to the size column
    pub size_transform: TransformType,

    /// Smoothing weight for the target encoder
    ///
    /// Categories with few supporting rows are pulled toward the global
    /// target mean; the pull weakens as the row count grows past this weight.
    pub smoothing: f64,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            size_column: "size".to_string(),
            floor_column: "floor".to_string(),
            categorical_columns: vec![
                "area_type".to_string(),
                "city".to_string(),
                "furnishing_status".to_string(),
                "tenant_preferred".to_string(),
                "point_of_contact".to_string(),
            ],
            size_transform: TransformType::Sqrt,
            smoothing: 10.0,
        }
    }
}

impl PreprocessConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the size column
    pub fn with_size_column(mut self, name: impl Into<String>) -> Self {
        self.size_column = name.into();
        self
    }

    /// Builder method to set the floor column
    pub fn with_floor_column(mut self, name: impl Into<String>) -> Self {
        self.floor_column = name.into();
        self
    }

    /// Builder method to set the categorical columns
    pub fn with_categorical_columns(mut self, columns: Vec<String>) -> Self {
        self.categorical_columns = columns;
        self
    }

    /// Builder method to set the size transform
    pub fn with_size_transform(mut self, transform: TransformType) -> Self {
        self.size_transform = transform;
        self
    }

    /// Builder method to set the encoder smoothing weight
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check the configuration for invalid values
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(PreprocessError::ConfigError(format!(
                "smoothing must be a positive finite number, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}
