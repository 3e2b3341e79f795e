//! Error types for the training pipeline.
//!
//! `PipelineError` is the closed set of ways a training run can fail. Every
//! variant is terminal: the run stops at the failing stage and no model
//! artifact is written. [`ErrorKind`] collapses the variants onto the three
//! causes an operator cares about (missing input, missing target, anything
//! else) so callers can branch without matching on message text.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Coarse failure category of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input dataset path does not resolve.
    DatasetNotFound,
    /// The target column is absent after preprocessing.
    TargetColumnMissing,
    /// Any other failure (malformed data, numeric problems, serialization).
    Generic,
}

/// Errors that can occur while training a model.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist.
    #[error("The specified file was not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// Input file exists but could not be parsed into a table.
    #[error("Failed to load dataset {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// The configured target column is not present in the dataset.
    #[error("Target column '{target}' not found in the dataset.")]
    TargetColumnMissing { target: String },

    /// None of the candidate features survived selection.
    #[error("No usable feature columns: none of {candidates:?} are present in the dataset")]
    NoUsableFeatures { candidates: Vec<String> },

    /// Too few rows to form both a training and an evaluation partition.
    #[error("Dataset has {rows} row(s); at least 2 are required to split into train and test")]
    InsufficientRows { rows: usize },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// One-hot encoding could not produce its indicator columns.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Numeric extraction or model fitting failed.
    #[error("Numeric error: {0}")]
    Numeric(String),

    /// The model artifact could not be written or read back.
    #[error("Model artifact error at {}: {message}", path.display())]
    Artifact { path: PathBuf, message: String },

    #[error("Dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Map this error onto its coarse category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::DatasetNotFound { .. } => ErrorKind::DatasetNotFound,
            PipelineError::TargetColumnMissing { .. } => ErrorKind::TargetColumnMissing,
            _ => ErrorKind::Generic,
        }
    }
}

/// Convenience alias used throughout the pipeline modules.
pub type PipelineResult<T> = Result<T, PipelineError>;
