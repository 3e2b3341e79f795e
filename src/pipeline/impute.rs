//! Missing value imputation
//!
//! Numeric columns are filled with their median, categorical columns with
//! their most frequent value. Statistics are computed over every row of the
//! dataset, before any train/test split takes place.

use std::cmp::Ordering;
use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;
use super::schema::{ColumnKind, ColumnPartition};

/// Fill used for a categorical column that has no observed values.
pub const MISSING_CATEGORY: &str = "MISSING";

/// Fill used for a numeric column that has no observed values.
pub const EMPTY_NUMERIC_FILL: f64 = 0.0;

/// Value written into the missing cells of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FillValue {
    Number(f64),
    Category(String),
}

impl std::fmt::Display for FillValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillValue::Number(v) => write!(f, "{}", v),
            FillValue::Category(s) => write!(f, "{}", s),
        }
    }
}

/// Imputation outcome for a single column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnFill {
    pub column: String,
    pub kind: ColumnKind,
    /// Median (numeric) or mode (categorical) of the observed values
    pub fill_value: FillValue,
    /// Number of cells that were filled
    pub filled: usize,
    /// True when the column had no observed values and a default was used
    pub all_missing: bool,
}

/// Per-column record of what the imputer did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImputationReport {
    pub fills: Vec<ColumnFill>,
}

impl ImputationReport {
    /// Total number of cells filled across all columns.
    pub fn total_filled(&self) -> usize {
        self.fills.iter().map(|f| f.filled).sum()
    }

    /// Columns that had at least one missing cell.
    pub fn imputed_columns(&self) -> Vec<&str> {
        self.fills
            .iter()
            .filter(|f| f.filled > 0)
            .map(|f| f.column.as_str())
            .collect()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnFill> {
        self.fills.iter().find(|f| f.column == column)
    }
}

/// Median of `values`, averaging the two middle elements for even counts.
///
/// Sorts `values` in place. Returns `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        Some((values[n / 2 - 1] + values[n / 2]) / 2.0)
    } else {
        Some(values[n / 2])
    }
}

/// Most frequent value; ties resolve to the lexicographically smallest.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(value, _)| value.to_string())
}

fn impute_numeric(df: &mut DataFrame, name: &str) -> PipelineResult<ColumnFill> {
    let float_col = df.column(name)?.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;

    // NaN counts as missing alongside null
    let mut observed: Vec<f64> = ca.iter().flatten().filter(|v| !v.is_nan()).collect();
    let filled = ca.len() - observed.len();
    let stat = median(&mut observed);
    let fill = stat.unwrap_or(EMPTY_NUMERIC_FILL);

    if filled > 0 {
        let values: Vec<f64> = ca
            .iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => x,
                _ => fill,
            })
            .collect();
        df.with_column(Column::new(name.into(), values))?;
    }

    Ok(ColumnFill {
        column: name.to_string(),
        kind: ColumnKind::Numeric,
        fill_value: FillValue::Number(fill),
        filled,
        all_missing: stat.is_none(),
    })
}

fn impute_categorical(df: &mut DataFrame, name: &str) -> PipelineResult<ColumnFill> {
    let ca = df.column(name)?.str()?;

    let filled = ca.null_count();
    let stat = mode(ca.iter().flatten());
    let fill = stat.clone().unwrap_or_else(|| MISSING_CATEGORY.to_string());

    if filled > 0 {
        let values: Vec<String> = ca
            .iter()
            .map(|v| v.unwrap_or(fill.as_str()).to_string())
            .collect();
        df.with_column(Column::new(name.into(), values))?;
    }

    Ok(ColumnFill {
        column: name.to_string(),
        kind: ColumnKind::Categorical,
        fill_value: FillValue::Category(fill),
        filled,
        all_missing: stat.is_none(),
    })
}

/// Fill every missing cell of the partitioned columns in place.
pub fn impute_missing(
    df: &mut DataFrame,
    partition: &ColumnPartition,
) -> PipelineResult<ImputationReport> {
    let mut report = ImputationReport::default();

    for name in &partition.numeric {
        report.fills.push(impute_numeric(df, name)?);
    }
    for name in &partition.categorical {
        report.fills.push(impute_categorical(df, name)?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn test_mode_tie_breaks_lexicographically() {
        assert_eq!(mode(["b", "a", "b", "a"]), Some("a".to_string()));
        assert_eq!(mode(["Gd", "TA", "TA"]), Some("TA".to_string()));
        assert_eq!(mode(std::iter::empty()), None);
    }

    #[test]
    fn test_all_missing_columns_use_defaults() {
        let mut df = df! {
            "empty_num" => [None::<f64>, None, None],
            "empty_cat" => [None::<&str>, None, None],
        }
        .unwrap();
        let partition = ColumnPartition {
            numeric: vec!["empty_num".to_string()],
            categorical: vec!["empty_cat".to_string()],
        };

        let report = impute_missing(&mut df, &partition).unwrap();

        let num = report.get("empty_num").unwrap();
        assert!(num.all_missing);
        assert_eq!(num.fill_value, FillValue::Number(EMPTY_NUMERIC_FILL));
        let cat = report.get("empty_cat").unwrap();
        assert!(cat.all_missing);
        assert_eq!(cat.fill_value, FillValue::Category(MISSING_CATEGORY.to_string()));
        assert_eq!(df.column("empty_num").unwrap().null_count(), 0);
        assert_eq!(df.column("empty_cat").unwrap().null_count(), 0);
    }

    #[test]
    fn test_nan_treated_as_missing() {
        let mut df = df! {
            "Lot Frontage" => [1.0f64, f64::NAN, 3.0],
        }
        .unwrap();
        let partition = ColumnPartition {
            numeric: vec!["Lot Frontage".to_string()],
            categorical: Vec::new(),
        };

        let report = impute_missing(&mut df, &partition).unwrap();

        assert_eq!(report.total_filled(), 1);
        let values: Vec<f64> = df
            .column("Lot Frontage")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
