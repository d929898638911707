//! Feature preprocessing module
//!
//! Provides the column-wise transforms for the rental dataset:
//! - Numeric transformation (square root on room size)
//! - Floor-number extraction from floor description strings
//! - Smoothed-mean target encoding of categorical features
//! - Pipeline composition with passthrough for remaining columns

mod config;
mod encoder;
mod floor;
mod pipeline;
mod transforms;

pub use config::PreprocessConfig;
pub use encoder::TargetEncoder;
pub use floor::{extract_floor, FloorExtractor};
pub use pipeline::FeaturePreprocessor;
pub use transforms::{TransformType, Transformer};

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column data type for preprocessing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

/// Feature statistics computed during fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStats {
    pub name: String,
    pub dtype: ColumnType,
    pub count: usize,
    pub null_count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unique_count: Option<usize>,
    pub categories: Option<Vec<String>>,
}

impl FeatureStats {
    /// Create new feature statistics
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            count: 0,
            null_count: 0,
            mean: None,
            std: None,
            min: None,
            max: None,
            unique_count: None,
            categories: None,
        }
    }

    /// Compute statistics from a numeric series
    pub fn from_numeric_series(name: &str, series: &Series) -> Result<Self> {
        let mut stats = Self::new(name, ColumnType::Numeric);
        stats.count = series.len();
        stats.null_count = series.null_count();

        if let Ok(ca) = series
            .cast(&DataType::Float64)
            .and_then(|s| s.f64().map(|ca| ca.clone()))
        {
            stats.mean = ca.mean();
            stats.std = ca.std(1);
            stats.min = ca.min();
            stats.max = ca.max();
        }

        Ok(stats)
    }

    /// Compute statistics from a categorical series
    pub fn from_categorical_series(name: &str, series: &Series) -> Result<Self> {
        let mut stats = Self::new(name, ColumnType::Categorical);
        stats.count = series.len();
        stats.null_count = series.null_count();
        stats.unique_count = Some(series.n_unique().unwrap_or(0));

        if let Ok(ca) = series.str() {
            let categories: Vec<String> = ca
                .unique()
                .unwrap_or_else(|_| ca.clone())
                .into_iter()
                .filter_map(|s| s.map(|s| s.to_string()))
                .collect();
            stats.categories = Some(categories);
        }

        Ok(stats)
    }
}
