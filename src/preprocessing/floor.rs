//! Floor-number extraction from floor description strings
//!
//! The raw dataset stores floors as `"<floor> out of <total>"`, where the
//! first token is either a number (`"2 out of 4"`) or a named level
//! (`"Ground out of 2"`, `"Upper Basement out of 3"`). Named levels all map
//! to floor 0.

use crate::error::{PreprocessError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Extract the floor number from a floor description string.
///
/// Takes the first whitespace-delimited token; if it is an unsigned integer
/// literal its value is returned, otherwise 0. The numeric check is a pure
/// digit predicate, so signed strings like `"-3"` count as non-numeric and
/// map to 0. Never panics, for any input.
pub fn extract_floor(raw: &str) -> i64 {
    let token = match raw.split_whitespace().next() {
        Some(t) => t,
        None => return 0,
    };

    if token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Column-wise wrapper around [`extract_floor`]
///
/// Replaces the configured string column with an Int64 column of extracted
/// floor numbers, in place. Stateless; no fitting required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorExtractor {
    column: String,
}

impl FloorExtractor {
    /// Create a new extractor for the given column
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Transform the data
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let column = df
            .column(&self.column)
            .map_err(|_| PreprocessError::FeatureNotFound(self.column.clone()))?;
        let series = column.as_materialized_series();

        let ca = series
            .str()
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        let floors: Int64Chunked = ca.into_iter().map(|opt| opt.map(extract_floor)).collect();
        let floors = floors.with_name(series.name().clone()).into_series();

        let mut result = df.clone();
        result
            .with_column(floors)
            .map_err(|e| PreprocessError::DataError(e.to_string()))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_first_token() {
        assert_eq!(extract_floor("3 out of 5"), 3);
        assert_eq!(extract_floor("2 out of 4"), 2);
        assert_eq!(extract_floor("11 out of 19"), 11);
        assert_eq!(extract_floor("0 out of 2"), 0);
    }

    #[test]
    fn test_named_levels() {
        assert_eq!(extract_floor("Ground out of 2"), 0);
        assert_eq!(extract_floor("Upper Basement out of 3"), 0);
        assert_eq!(extract_floor("Lower Basement out of 5"), 0);
    }

    #[test]
    fn test_signed_token_is_not_numeric() {
        // digit predicate only, no sign handling
        assert_eq!(extract_floor("-3 out of 5"), 0);
        assert_eq!(extract_floor("+2 out of 4"), 0);
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(extract_floor(""), 0);
        assert_eq!(extract_floor("   "), 0);
        assert_eq!(extract_floor("3.5 out of 5"), 0);
    }

    #[test]
    fn test_column_transform() {
        let df = df!(
            "floor" => &["1 out of 3", "Ground out of 5", "2 out of 2"],
            "rent" => &[100.0, 200.0, 300.0],
        )
        .unwrap();

        let extractor = FloorExtractor::new("floor");
        let result = extractor.transform(&df).unwrap();

        let floors: Vec<i64> = result
            .column("floor")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(floors, vec![1, 0, 2]);

        // passthrough column untouched
        let rent: Vec<f64> = result
            .column("rent")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(rent, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_missing_column() {
        let df = df!("rent" => &[100.0]).unwrap();
        let extractor = FloorExtractor::new("floor");
        let err = extractor.transform(&df).unwrap_err();
        assert!(matches!(err, PreprocessError::FeatureNotFound(_)));
    }
}
