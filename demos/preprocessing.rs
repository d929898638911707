//! Preprocessing Demo
//!
//! Fits the rental feature pipeline on a small in-memory dataset and prints
//! the model-ready output.

use polars::prelude::*;
use rental_preprocess::preprocessing::{FeaturePreprocessor, PreprocessConfig};

fn main() -> anyhow::Result<()> {
    let df = df!(
        "size" => &[1100.0, 800.0, 1000.0, 650.0],
        "floor" => &["2 out of 4", "Ground out of 2", "1 out of 3", "Upper Basement out of 3"],
        "area_type" => &["Super Area", "Carpet Area", "Super Area", "Carpet Area"],
        "city" => &["Mumbai", "Delhi", "Mumbai", "Kolkata"],
        "furnishing_status" => &["Furnished", "Semi-Furnished", "Unfurnished", "Unfurnished"],
        "tenant_preferred" => &["Family", "Bachelors", "Family", "Bachelors/Family"],
        "point_of_contact" => &["Contact Owner", "Contact Agent", "Contact Owner", "Contact Owner"],
    )?;
    let target = Series::new("rent".into(), &[35000.0, 12000.0, 28000.0, 8000.0]);

    println!("Raw listings:");
    println!("{}", df);

    let config = PreprocessConfig::default().with_smoothing(10.0);
    let mut pipeline = FeaturePreprocessor::with_config(config);
    let features = pipeline.fit_transform(&df, &target)?;

    println!("\nModel-ready features:");
    println!("{}", features);

    println!("\nGlobal target mean (unseen-category fallback): {:.2}", pipeline.encoder().global_mean());

    Ok(())
}
