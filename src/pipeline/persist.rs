//! Model artifact persistence

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::evaluate::EvaluationReport;
use super::model::LinearModel;
use super::scale::ColumnScaling;

/// Artifact layout version written by this build.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// On-disk form of a trained model and the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    pub tool_version: String,
    pub target: String,
    pub model: LinearModel,
    pub metrics: EvaluationReport,
    pub train_rows: usize,
    pub test_rows: usize,
    pub seed: u64,
    pub test_size: f64,
    /// Standardization applied to the selected features and target before fitting
    #[serde(default)]
    pub scaling: Vec<ColumnScaling>,
}

/// Run details recorded next to the model.
#[derive(Debug, Clone)]
pub struct ArtifactParams<'a> {
    pub target: &'a str,
    pub train_rows: usize,
    pub test_rows: usize,
    pub seed: u64,
    pub test_size: f64,
    pub scaling: Vec<ColumnScaling>,
}

impl ModelArtifact {
    pub fn new(model: LinearModel, metrics: EvaluationReport, params: ArtifactParams<'_>) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            target: params.target.to_string(),
            model,
            metrics,
            train_rows: params.train_rows,
            test_rows: params.test_rows,
            seed: params.seed,
            test_size: params.test_size,
            scaling: params.scaling,
        }
    }

    /// The fitted model, ready for prediction.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

fn artifact_error(path: &Path, message: impl std::fmt::Display) -> PipelineError {
    PipelineError::Artifact {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Write `artifact` as pretty JSON, replacing any existing file at `path`.
pub fn save_model(artifact: &ModelArtifact, path: &Path) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| artifact_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, artifact).map_err(|e| artifact_error(path, e))?;
    writer.flush().map_err(|e| artifact_error(path, e))?;
    Ok(())
}

/// Read an artifact previously written by [`save_model`].
pub fn load_model(path: &Path) -> PipelineResult<ModelArtifact> {
    let content = std::fs::read_to_string(path).map_err(|e| artifact_error(path, e))?;
    let artifact: ModelArtifact =
        serde_json::from_str(&content).map_err(|e| artifact_error(path, e))?;

    if artifact.format_version > ARTIFACT_FORMAT_VERSION {
        return Err(artifact_error(
            path,
            format!(
                "unsupported artifact format version {} (this build reads up to {})",
                artifact.format_version, ARTIFACT_FORMAT_VERSION
            ),
        ));
    }

    Ok(artifact)
}
