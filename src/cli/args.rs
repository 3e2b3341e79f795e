//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{
    LoadOptions, PipelineConfig, DEFAULT_FEATURES, DEFAULT_INFER_SCHEMA_LENGTH,
    DEFAULT_INPUT, DEFAULT_MODEL_PATH, DEFAULT_NULL_VALUES, DEFAULT_SEED, DEFAULT_TARGET,
};

/// Pricefit - Train a linear house price model from a tabular dataset
#[derive(Parser, Debug)]
#[command(name = "pricefit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input dataset path (CSV, TSV, or Parquet)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Target column to predict
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Candidate feature columns (comma-separated).
    /// Candidates missing from the dataset are skipped.
    /// Defaults to: Gr Liv Area, Overall Qual, Garage Cars, Year Built
    #[arg(short, long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Model artifact path, overwritten if it exists
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    /// Share of rows held out for evaluation (strictly between 0 and 1)
    #[arg(long, default_value = "0.2", value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of rows to use for schema inference (CSV/TSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
    pub infer_schema_length: usize,

    /// Cell values read as missing (comma-separated).
    /// Defaults to: "", NA, N/A, NaN, nan, null, NULL
    #[arg(long, value_delimiter = ',')]
    pub null_values: Vec<String>,

    /// Only print the metric and completion lines
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the metadata, metrics and coefficients of a saved model
    Inspect {
        /// Model artifact path
        model: PathBuf,
    },
}

impl Cli {
    /// Candidate features, falling back to the defaults when none were given.
    pub fn feature_list(&self) -> Vec<String> {
        if self.features.is_empty() {
            DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect()
        } else {
            self.features.iter().map(|f| f.trim().to_string()).collect()
        }
    }

    /// Build the pipeline configuration from the parsed arguments.
    pub fn to_config(&self) -> PipelineConfig {
        let null_values = if self.null_values.is_empty() {
            DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect()
        } else {
            self.null_values.clone()
        };

        PipelineConfig {
            input: self.input.clone(),
            target: self.target.clone(),
            features: self.feature_list(),
            output: self.output.clone(),
            test_size: self.test_size,
            seed: self.seed,
            load: LoadOptions {
                infer_schema_length: self.infer_schema_length,
                null_values,
            },
            quiet: self.quiet,
        }
    }
}

/// Validator for test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_test_size() {
        assert_eq!(validate_test_size("0.25"), Ok(0.25));
        assert!(validate_test_size("0").is_err());
        assert!(validate_test_size("1").is_err());
        assert!(validate_test_size("abc").is_err());
    }
}
