//! Dataset loader for CSV, TSV and Parquet files

use std::path::Path;

use polars::prelude::*;

use super::config::LoadOptions;
use super::error::{PipelineError, PipelineResult};

/// Supported input layouts, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    Parquet,
}

impl InputFormat {
    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> PipelineResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "tsv" => Ok(InputFormat::Tsv),
            "parquet" => Ok(InputFormat::Parquet),
            _ => Err(PipelineError::Load {
                path: path.to_path_buf(),
                message: format!(
                    "Unsupported file format: '{}'. Supported formats: csv, tsv, parquet",
                    extension
                ),
            }),
        }
    }
}

fn load_error(path: &Path, err: PolarsError) -> PipelineError {
    PipelineError::Load {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Build a lazy scan over `path` without reading any rows.
fn scan(path: &Path, options: &LoadOptions) -> PipelineResult<LazyFrame> {
    if !path.exists() {
        return Err(PipelineError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = InputFormat::from_path(path)?;

    let lf = match format {
        InputFormat::Csv | InputFormat::Tsv => {
            // 0 means full table scan
            let schema_length = if options.infer_schema_length == 0 {
                None
            } else {
                Some(options.infer_schema_length)
            };
            let null_values = if options.null_values.is_empty() {
                None
            } else {
                Some(NullValues::AllColumns(
                    options.null_values.iter().map(|v| v.as_str().into()).collect(),
                ))
            };
            let separator = if format == InputFormat::Tsv { b'\t' } else { b',' };

            LazyCsvReader::new(path)
                .with_has_header(true)
                .with_separator(separator)
                .with_infer_schema_length(schema_length)
                .with_null_values(null_values)
                .finish()
                .map_err(|e| load_error(path, e))?
        }
        InputFormat::Parquet => LazyFrame::scan_parquet(path, Default::default())
            .map_err(|e| load_error(path, e))?,
    };

    Ok(lf)
}

/// Load a dataset fully into memory.
///
/// Returns the DataFrame together with its row count, column count and
/// estimated size in megabytes.
pub fn load_dataset(
    path: &Path,
    options: &LoadOptions,
) -> PipelineResult<(DataFrame, usize, usize, f64)> {
    let df = scan(path, options)?
        .collect()
        .map_err(|e| load_error(path, e))?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}
