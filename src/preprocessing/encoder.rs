//! Smoothed-mean target encoding for categorical features
//!
//! Each category value is replaced by a blend of the mean target value of
//! the rows bearing that category and the global target mean. The blend is
//! additive (m-estimate) smoothing:
//!
//! ```text
//! encoded(c) = (n_c * mean_c + k * global_mean) / (n_c + k)
//! ```
//!
//! where `n_c` is the number of supporting rows and `k` the smoothing
//! weight. Categories with many rows sit close to their raw mean, rare
//! categories close to the global mean. Categories never seen during fit
//! resolve to the global mean.

use crate::error::{PreprocessError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target encoder over one or more categorical columns
///
/// Fit once against training data and a target series; transform any number
/// of times, including on data whose categories were never seen during fit.
///
/// The transform is not idempotent: it replaces string columns with Float64
/// columns, so applying it a second time without refitting fails on the
/// dtype check rather than silently re-encoding statistics as categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEncoder {
    smoothing: f64,
    columns: Vec<String>,
    mappings: HashMap<String, HashMap<String, f64>>,
    global_mean: f64,
    is_fitted: bool,
}

impl TargetEncoder {
    /// Create a new encoder with the given smoothing weight
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            columns: Vec::new(),
            mappings: HashMap::new(),
            global_mean: 0.0,
            is_fitted: false,
        }
    }

    /// Fit the encoder to the data
    ///
    /// Learns one category-to-statistic mapping per column plus the global
    /// target mean used as the fallback for unseen categories. Null category
    /// values are skipped.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str], target: &Series) -> Result<&mut Self> {
        if target.len() != df.height() {
            return Err(PreprocessError::DataError(format!(
                "target length {} does not match row count {}",
                target.len(),
                df.height()
            )));
        }

        let target = target
            .cast(&DataType::Float64)
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;
        let target_ca = target
            .f64()
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        self.global_mean = target_ca.mean().ok_or_else(|| {
            PreprocessError::DataError("cannot fit target encoder on an empty target".to_string())
        })?;

        self.columns.clear();
        self.mappings.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PreprocessError::FeatureNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();
            let ca = series
                .str()
                .map_err(|e| PreprocessError::DataError(e.to_string()))?;

            // per-category target sum and supporting row count
            let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
            for (cat, label) in ca.into_iter().zip(target_ca.into_iter()) {
                if let (Some(cat), Some(label)) = (cat, label) {
                    let entry = totals.entry(cat.to_string()).or_insert((0.0, 0));
                    entry.0 += label;
                    entry.1 += 1;
                }
            }

            let mapping: HashMap<String, f64> = totals
                .into_iter()
                .map(|(cat, (sum, n))| {
                    let encoded =
                        (sum + self.smoothing * self.global_mean) / (n as f64 + self.smoothing);
                    (cat, encoded)
                })
                .collect();

            self.columns.push(col_name.to_string());
            self.mappings.insert(col_name.to_string(), mapping);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data
    ///
    /// Replaces each fitted column with a Float64 column of learned
    /// statistics; unseen and null categories resolve to the global mean.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PreprocessError::NotFitted);
        }

        let mut result = df.clone();

        for col_name in &self.columns {
            let mapping = self
                .mappings
                .get(col_name)
                .ok_or_else(|| PreprocessError::FeatureNotFound(col_name.clone()))?;

            let column = df
                .column(col_name)
                .map_err(|_| PreprocessError::FeatureNotFound(col_name.clone()))?;
            let series = column.as_materialized_series();
            let ca = series
                .str()
                .map_err(|e| PreprocessError::DataError(e.to_string()))?;

            let encoded: Float64Chunked = ca
                .into_iter()
                .map(|opt| {
                    Some(match opt {
                        Some(cat) => *mapping.get(cat).unwrap_or(&self.global_mean),
                        None => self.global_mean,
                    })
                })
                .collect();
            let encoded = encoded.with_name(series.name().clone()).into_series();

            result
                .with_column(encoded)
                .map_err(|e| PreprocessError::DataError(e.to_string()))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(
        &mut self,
        df: &DataFrame,
        columns: &[&str],
        target: &Series,
    ) -> Result<DataFrame> {
        self.fit(df, columns, target)?;
        self.transform(df)
    }

    /// The fallback statistic substituted for unseen categories
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Learned statistic for a category, if seen during fit
    pub fn encoding(&self, column: &str, category: &str) -> Option<f64> {
        self.mappings.get(column).and_then(|m| m.get(category)).copied()
    }
}
