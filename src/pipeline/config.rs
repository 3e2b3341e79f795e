//! Pipeline configuration

use std::path::PathBuf;

use super::error::{PipelineError, PipelineResult};

/// Default dataset file, resolved relative to the working directory.
pub const DEFAULT_INPUT: &str = "AmesHousing.csv";

/// Default target column.
pub const DEFAULT_TARGET: &str = "SalePrice";

/// Default model artifact path, overwritten on every run.
pub const DEFAULT_MODEL_PATH: &str = "house_price_model.json";

/// Candidate features: above-grade living area, overall quality,
/// garage car capacity and year built.
pub const DEFAULT_FEATURES: [&str; 4] = ["Gr Liv Area", "Overall Qual", "Garage Cars", "Year Built"];

/// Strings read as missing values in delimited input.
pub const DEFAULT_NULL_VALUES: [&str; 7] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

/// Options that only affect how the input file is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Rows used for CSV schema inference. `0` scans the whole file.
    pub infer_schema_length: usize,
    /// Cell contents treated as missing in every column.
    pub null_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Everything a training run needs, passed into [`run_pipeline`](super::run_pipeline).
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub target: String,
    /// Candidate feature names, in preferred order.
    pub features: Vec<String>,
    pub output: PathBuf,
    /// Share of rows held out for evaluation, in (0, 1).
    pub test_size: f64,
    pub seed: u64,
    pub load: LoadOptions,
    /// Suppress step headers and spinners.
    pub quiet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            target: DEFAULT_TARGET.to_string(),
            features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_MODEL_PATH),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            load: LoadOptions::default(),
            quiet: false,
        }
    }
}

impl PipelineConfig {
    /// Default configuration reading from `input` and writing to `output`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> PipelineResult<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test_size must be strictly between 0.0 and 1.0, got {}",
                self.test_size
            )));
        }
        if self.target.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "target column name must not be empty".to_string(),
            ));
        }
        if self.features.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one candidate feature is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.target, "SalePrice");
        assert_eq!(
            config.features,
            vec!["Gr Liv Area", "Overall Qual", "Garage Cars", "Year Built"]
        );
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.output, PathBuf::from("house_price_model.json"));
        assert!(config.load.null_values.contains(&"NA".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_overrides_paths_only() {
        let config = PipelineConfig::new("data/train.csv", "out/model.json");
        assert_eq!(config.input, PathBuf::from("data/train.csv"));
        assert_eq!(config.output, PathBuf::from("out/model.json"));
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_invalid_test_size() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = PipelineConfig {
                test_size: bad,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(PipelineError::InvalidConfig(_))),
                "test_size {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_empty_features_rejected() {
        let config = PipelineConfig {
            features: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
