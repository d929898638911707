//! The composed feature-preprocessing pipeline

use super::{
    config::PreprocessConfig, encoder::TargetEncoder, floor::FloorExtractor,
    transforms::Transformer, FeatureStats,
};
use crate::error::{PreprocessError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Column-wise feature preprocessing pipeline for rental data
///
/// Applies three transforms over disjoint column subsets and passes every
/// other column through unchanged:
///
/// 1. Square-root transform on the size column
/// 2. Floor-number extraction on the floor column
/// 3. Smoothed-mean target encoding on the categorical columns
///
/// Transformed columns replace the originals in place, keeping the flat
/// column names, the column order, and the exact row count and row order.
///
/// The pipeline must be fitted against a training DataFrame and a target
/// series before transforming; the encoder's learned mapping is the only
/// state mutated by [`fit`](FeaturePreprocessor::fit). After fitting the
/// pipeline is read-only and can transform any number of DataFrames,
/// including data disjoint from the fit set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePreprocessor {
    config: PreprocessConfig,
    size_transform: Transformer,
    floor_extractor: FloorExtractor,
    encoder: TargetEncoder,
    feature_stats: HashMap<String, FeatureStats>,
    is_fitted: bool,
}

impl FeaturePreprocessor {
    /// Create a new pipeline with the default rental dataset configuration
    pub fn new() -> Self {
        Self::with_config(PreprocessConfig::default())
    }

    /// Create a new pipeline with a custom configuration
    pub fn with_config(config: PreprocessConfig) -> Self {
        let size_transform = Transformer::new(config.size_transform.clone());
        let floor_extractor = FloorExtractor::new(config.floor_column.clone());
        let encoder = TargetEncoder::new(config.smoothing);

        Self {
            config,
            size_transform,
            floor_extractor,
            encoder,
            feature_stats: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the pipeline to training data
    ///
    /// `target` supplies the labels for the target encoder and must have one
    /// value per row of `df`.
    pub fn fit(&mut self, df: &DataFrame, target: &Series) -> Result<&mut Self> {
        self.config.validate()?;
        self.check_required_columns(df)?;

        let df = self.cast_size_to_f64(df)?;

        self.size_transform.fit(&df, &[&self.config.size_column])?;

        // floor extraction is stateless, but a wrong dtype should fail at
        // fit time rather than on the first transform
        let floor = df.column(&self.config.floor_column)?;
        floor
            .as_materialized_series()
            .str()
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        let categorical: Vec<&str> = self
            .config
            .categorical_columns
            .iter()
            .map(|s| s.as_str())
            .collect();
        self.encoder.fit(&df, &categorical, target)?;

        self.compute_statistics(&df)?;

        self.is_fitted = true;
        debug!(rows = df.height(), "fitted feature preprocessing pipeline");
        Ok(self)
    }

    /// Transform a DataFrame into model-ready features
    ///
    /// Fails with [`PreprocessError::NotFitted`] if called before
    /// [`fit`](FeaturePreprocessor::fit).
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PreprocessError::NotFitted);
        }

        let mut result = self.cast_size_to_f64(df)?;
        result = self.size_transform.transform(&result)?;
        result = self.floor_extractor.transform(&result)?;
        result = self.encoder.transform(&result)?;

        debug!(rows = result.height(), "transformed dataset");
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, target: &Series) -> Result<DataFrame> {
        self.fit(df, target)?;
        self.transform(df)
    }

    /// Get the configuration
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Whether the pipeline has been fitted
    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// The fitted target encoder
    pub fn encoder(&self) -> &TargetEncoder {
        &self.encoder
    }

    /// Statistics of the engineered columns, computed during fit
    pub fn feature_stats(&self) -> &HashMap<String, FeatureStats> {
        &self.feature_stats
    }

    /// Save the fitted pipeline to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a pipeline from a file
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let pipeline: Self = serde_json::from_str(&json)?;
        Ok(pipeline)
    }

    fn check_required_columns(&self, df: &DataFrame) -> Result<()> {
        let required = [&self.config.size_column, &self.config.floor_column]
            .into_iter()
            .chain(self.config.categorical_columns.iter());

        for col_name in required {
            if df.column(col_name).is_err() {
                return Err(PreprocessError::FeatureNotFound(col_name.clone()));
            }
        }
        Ok(())
    }

    fn cast_size_to_f64(&self, df: &DataFrame) -> Result<DataFrame> {
        let column = df
            .column(&self.config.size_column)
            .map_err(|_| PreprocessError::FeatureNotFound(self.config.size_column.clone()))?;
        let casted = column
            .cast(&DataType::Float64)
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        let mut result = df.clone();
        result
            .with_column(casted)
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;
        Ok(result)
    }

    fn compute_statistics(&mut self, df: &DataFrame) -> Result<()> {
        self.feature_stats.clear();

        let size = df.column(&self.config.size_column)?;
        let stats =
            FeatureStats::from_numeric_series(&self.config.size_column, size.as_materialized_series())?;
        self.feature_stats.insert(self.config.size_column.clone(), stats);

        let categorical_like = std::iter::once(&self.config.floor_column)
            .chain(self.config.categorical_columns.iter());
        for col_name in categorical_like {
            if let Ok(column) = df.column(col_name) {
                let stats =
                    FeatureStats::from_categorical_series(col_name, column.as_materialized_series())?;
                self.feature_stats.insert(col_name.clone(), stats);
            }
        }

        Ok(())
    }
}

impl Default for FeaturePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::TransformType;
    use super::*;

    fn small_config() -> PreprocessConfig {
        PreprocessConfig::new().with_categorical_columns(vec!["city".to_string()])
    }

    fn sample_df() -> DataFrame {
        df!(
            "size" => &[100.0, 225.0, 400.0],
            "floor" => &["1 out of 3", "Ground out of 5", "2 out of 2"],
            "city" => &["A", "B", "A"],
            "listing_id" => &[11i64, 22, 33],
        )
        .unwrap()
    }

    #[test]
    fn test_fit_transform_end_to_end() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let result = pipeline.fit_transform(&df, &target).unwrap();

        let size: Vec<f64> = result
            .column("size")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(size, vec![10.0, 15.0, 20.0]);

        let floor: Vec<i64> = result
            .column("floor")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(floor, vec![1, 0, 2]);

        // global mean 20; both categories have raw mean 20, so the blend
        // lands on 20 exactly
        let city: Vec<f64> = result
            .column("city")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(city, vec![20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_passthrough_and_column_order() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let result = pipeline.fit_transform(&df, &target).unwrap();

        let names: Vec<&str> = result.get_column_names_str();
        assert_eq!(names, vec!["size", "floor", "city", "listing_id"]);

        let ids: Vec<i64> = result
            .column("listing_id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec![11, 22, 33]);
    }

    #[test]
    fn test_row_count_preserved() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let result = pipeline.fit_transform(&df, &target).unwrap();
        assert_eq!(result.height(), df.height());
    }

    #[test]
    fn test_transform_empty_frame() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        pipeline.fit(&df, &target).unwrap();

        let empty = df!(
            "size" => Vec::<f64>::new(),
            "floor" => Vec::<String>::new(),
            "city" => Vec::<String>::new(),
            "listing_id" => Vec::<i64>::new(),
        )
        .unwrap();
        let result = pipeline.transform(&empty).unwrap();
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_transform_before_fit() {
        let pipeline = FeaturePreprocessor::with_config(small_config());
        let err = pipeline.transform(&sample_df()).unwrap_err();
        assert!(matches!(err, PreprocessError::NotFitted));
    }

    #[test]
    fn test_fit_missing_column() {
        let df = df!(
            "size" => &[100.0],
            "floor" => &["1 out of 3"],
        )
        .unwrap();
        let target = Series::new("rent".into(), &[10.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let err = pipeline.fit(&df, &target).unwrap_err();
        assert!(matches!(err, PreprocessError::FeatureNotFound(c) if c == "city"));
    }

    #[test]
    fn test_fit_invalid_smoothing() {
        let config = small_config().with_smoothing(-1.0);
        let mut pipeline = FeaturePreprocessor::with_config(config);
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);
        let err = pipeline.fit(&sample_df(), &target).unwrap_err();
        assert!(matches!(err, PreprocessError::ConfigError(_)));
    }

    #[test]
    fn test_integer_size_is_cast() {
        let df = df!(
            "size" => &[16i64, 25, 36],
            "floor" => &["1 out of 3", "2 out of 3", "3 out of 3"],
            "city" => &["A", "B", "A"],
        )
        .unwrap();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let result = pipeline.fit_transform(&df, &target).unwrap();

        let size: Vec<f64> = result
            .column("size")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(size, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_feature_statistics() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        pipeline.fit(&df, &target).unwrap();

        let stats = pipeline.feature_stats();
        assert!(stats.get("size").unwrap().mean.is_some());
        assert_eq!(stats.get("city").unwrap().unique_count, Some(2));
        // passthrough columns get no statistics
        assert!(stats.get("listing_id").is_none());
    }

    #[test]
    fn test_identity_size_transform() {
        let config = small_config().with_size_transform(TransformType::Identity);
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(config);
        let result = pipeline.fit_transform(&df, &target).unwrap();

        let size: Vec<f64> = result
            .column("size")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(size, vec![100.0, 225.0, 400.0]);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let df = sample_df();
        let target = Series::new("rent".into(), &[10.0, 20.0, 30.0]);

        let mut pipeline = FeaturePreprocessor::with_config(small_config());
        let expected = pipeline.fit_transform(&df, &target).unwrap();

        let path = std::env::temp_dir().join("rental_preprocess_pipeline.json");
        let path = path.to_str().unwrap();
        pipeline.save(path).unwrap();

        let restored = FeaturePreprocessor::load(path).unwrap();
        assert!(restored.is_fitted());
        let result = restored.transform(&df).unwrap();
        assert!(result.equals_missing(&expected));

        let _ = std::fs::remove_file(path);
    }
}
