//! Rental price feature preprocessing
//!
//! This crate turns raw rental-listing columns into model-ready numeric
//! features through a column-wise transformation pipeline:
//!
//! - Square-root transform on the room `size` column
//! - Floor-number extraction from `"<floor> out of <total>"` strings
//! - Smoothed-mean target encoding of the categorical columns
//!
//! All other columns pass through unchanged; row count and row order are
//! preserved exactly.
//!
//! # Modules
//!
//! - [`preprocessing`] - Transforms, encoder, and the composed pipeline
//! - [`error`] - Crate-wide error type
//!
//! # Example
//!
//! ```no_run
//! use polars::prelude::*;
//! use rental_preprocess::preprocessing::{FeaturePreprocessor, PreprocessConfig};
//!
//! # fn main() -> rental_preprocess::Result<()> {
//! let df = df!(
//!     "size" => &[100.0, 225.0],
//!     "floor" => &["1 out of 3", "Ground out of 5"],
//!     "area_type" => &["Super Area", "Carpet Area"],
//!     "city" => &["Mumbai", "Delhi"],
//!     "furnishing_status" => &["Furnished", "Unfurnished"],
//!     "tenant_preferred" => &["Family", "Bachelors"],
//!     "point_of_contact" => &["Contact Owner", "Contact Agent"],
//! )?;
//! let target = Series::new("rent".into(), &[15000.0, 8000.0]);
//!
//! let mut pipeline = FeaturePreprocessor::with_config(PreprocessConfig::default());
//! let features = pipeline.fit_transform(&df, &target)?;
//! assert_eq!(features.height(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod preprocessing;

pub use error::{PreprocessError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{PreprocessError, Result};
    pub use crate::preprocessing::{
        extract_floor, FeaturePreprocessor, FloorExtractor, PreprocessConfig, TargetEncoder,
        TransformType, Transformer,
    };
}
