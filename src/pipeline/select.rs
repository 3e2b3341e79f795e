//! Feature selection and design matrix extraction

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Pick the candidate features present in `df`.
///
/// Candidates missing from the dataset are skipped; the target is never
/// selected. Order follows `candidates`, without duplicates.
pub fn select_features(
    df: &DataFrame,
    candidates: &[String],
    target: &str,
) -> PipelineResult<Vec<String>> {
    if df.get_column_index(target).is_none() {
        return Err(PipelineError::TargetColumnMissing {
            target: target.to_string(),
        });
    }

    let mut selected: Vec<String> = Vec::new();
    for candidate in candidates {
        if candidate == target || selected.contains(candidate) {
            continue;
        }
        if df.get_column_index(candidate).is_some() {
            selected.push(candidate.clone());
        }
    }

    Ok(selected)
}

fn numeric_column(df: &DataFrame, name: &str) -> PipelineResult<Vec<f64>> {
    let column = df.column(name)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(PipelineError::Numeric(format!(
            "column '{}' has non-numeric type {}",
            name,
            column.dtype()
        )));
    }

    let float_col = column.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;
    if ca.null_count() > 0 {
        return Err(PipelineError::Numeric(format!(
            "column '{}' has {} missing value(s)",
            name,
            ca.null_count()
        )));
    }
    Ok(ca.into_no_null_iter().collect())
}

/// Extract the row-major feature matrix and the target vector.
pub fn extract_design(
    df: &DataFrame,
    features: &[String],
    target: &str,
) -> PipelineResult<(Vec<Vec<f64>>, Vec<f64>)> {
    let y = numeric_column(df, target)?;

    let columns: Vec<Vec<f64>> = features
        .iter()
        .map(|name| numeric_column(df, name))
        .collect::<PipelineResult<_>>()?;

    let x: Vec<Vec<f64>> = (0..df.height())
        .map(|row| columns.iter().map(|col| col[row]).collect())
        .collect();

    Ok((x, y))
}
