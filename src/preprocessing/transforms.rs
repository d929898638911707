//! Element-wise numeric transforms
//!
//! Applies a mathematical transform to every value of the configured
//! columns. Used by the pipeline for the square-root transform on the
//! room size column.

use crate::error::{PreprocessError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Type of transformation to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformType {
    /// Square root; negative input yields NaN
    Sqrt,
    /// Log with offset: log(x + 1)
    Log1p,
    /// No transformation
    Identity,
}

impl Default for TransformType {
    fn default() -> Self {
        TransformType::Identity
    }
}

/// Feature transformer for applying element-wise transforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transformer {
    transform_type: TransformType,
    columns: Vec<String>,
    is_fitted: bool,
}

impl Transformer {
    /// Create a new transformer
    pub fn new(transform_type: TransformType) -> Self {
        Self {
            transform_type,
            columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the transformer to the data
    ///
    /// The transforms carry no learned parameters; fitting records the
    /// column list and verifies the columns exist with a numeric dtype.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.columns.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PreprocessError::FeatureNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();
            series
                .f64()
                .map_err(|e| PreprocessError::DataError(e.to_string()))?;

            self.columns.push(col_name.to_string());
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PreprocessError::NotFitted);
        }

        let mut result = df.clone();

        for col_name in &self.columns {
            let column = df
                .column(col_name)
                .map_err(|_| PreprocessError::FeatureNotFound(col_name.clone()))?;
            let series = column.as_materialized_series();
            let transformed = self.transform_series(series)?;
            result
                .with_column(transformed)
                .map_err(|e| PreprocessError::DataError(e.to_string()))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Transform a single series
    fn transform_series(&self, series: &Series) -> Result<Series> {
        let ca = series
            .f64()
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        let transformed: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|x| self.transform_value(x)))
            .collect();

        Ok(transformed.with_name(series.name().clone()).into_series())
    }

    /// Transform a single value
    fn transform_value(&self, x: f64) -> f64 {
        match self.transform_type {
            TransformType::Sqrt => {
                if x >= 0.0 {
                    x.sqrt()
                } else {
                    f64::NAN
                }
            }
            TransformType::Log1p => (x + 1.0).ln(),
            TransformType::Identity => x,
        }
    }
}
