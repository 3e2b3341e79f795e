//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use pricefit::pipeline::PipelineConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FEATURES: [&str; 4] = ["Gr Liv Area", "Overall Qual", "Garage Cars", "Year Built"];

/// Create a synthetic housing DataFrame with a known linear price relation
///
/// This DataFrame includes:
/// - The four candidate features, all numeric and complete
/// - `Neighborhood`: categorical column with three levels
/// - `SalePrice`: linear in the features plus small noise
pub fn create_housing_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let neighborhoods = ["CollgCr", "NAmes", "OldTown"];

    let mut area = Vec::with_capacity(rows);
    let mut quality = Vec::with_capacity(rows);
    let mut garage = Vec::with_capacity(rows);
    let mut year = Vec::with_capacity(rows);
    let mut hood = Vec::with_capacity(rows);
    let mut price = Vec::with_capacity(rows);

    for _ in 0..rows {
        let a: f64 = rng.gen_range(600.0..3000.0);
        let q: i64 = rng.gen_range(1..=10);
        let g: i64 = rng.gen_range(0..=3);
        let y: i64 = rng.gen_range(1900..=2010);
        let noise: f64 = rng.gen_range(-5000.0..5000.0);

        area.push(a);
        quality.push(q);
        garage.push(g);
        year.push(y);
        hood.push(neighborhoods[rng.gen_range(0..neighborhoods.len())]);
        price.push(
            20_000.0 + 60.0 * a + 15_000.0 * q as f64 + 8_000.0 * g as f64
                + 300.0 * (y - 1900) as f64
                + noise,
        );
    }

    df! {
        "Gr Liv Area" => area,
        "Overall Qual" => quality,
        "Garage Cars" => garage,
        "Year Built" => year,
        "Neighborhood" => hood,
        "SalePrice" => price,
    }
    .unwrap()
}

/// Create a small DataFrame with gaps in numeric and categorical columns
pub fn create_missing_dataframe() -> DataFrame {
    df! {
        "Lot Frontage" => [Some(60.0f64), None, Some(80.0), Some(70.0), None, Some(50.0)],
        "Garage Cars" => [Some(2i64), Some(1), None, Some(2), Some(3), Some(2)],
        "Alley" => [None, Some("Grvl"), Some("Pave"), Some("Grvl"), None, Some("Pave")],
        "Street" => [Some("Pave"), Some("Pave"), Some("Grvl"), None, Some("Pave"), Some("Pave")],
        "SalePrice" => [208500.0f64, 181500.0, 223500.0, 140000.0, 250000.0, 143000.0],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Quiet pipeline configuration writing the model next to the input
pub fn quiet_config(input: &Path, dir: &Path) -> PipelineConfig {
    PipelineConfig {
        quiet: true,
        ..PipelineConfig::new(input, dir.join("house_price_model.json"))
    }
}

/// Values of a numeric column as f64
pub fn column_f64(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("unexpected null"))
        .collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
