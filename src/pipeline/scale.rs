//! Standardization of numeric columns

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};

/// Learned statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScaling {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation (ddof = 0)
    pub std: f64,
}

impl ColumnScaling {
    /// Divisor applied to centered values. Constant columns divide by 1.
    pub fn scale(&self) -> f64 {
        if self.std == 0.0 {
            1.0
        } else {
            self.std
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale()
    }
}

/// Fitted standard scaler: `(x - mean) / std` per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<ColumnScaling>,
}

/// True when `var` is indistinguishable from zero given the rounding error
/// of accumulating `n_samples` values around `mean`.
pub fn is_zero_variance(var: f64, mean: f64, n_samples: usize) -> bool {
    let n = n_samples as f64;
    let eps = f64::EPSILON;
    let upper_bound = n * eps * var + (n * mean * eps).powi(2);
    var <= upper_bound
}

/// Mean and population standard deviation of `values`.
///
/// A variance within rounding error of zero is reported as exactly zero.
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    if is_zero_variance(var, mean, values.len()) {
        return Some((mean, 0.0));
    }
    Some((mean, var.sqrt()))
}

fn column_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<f64>> {
    let float_col = df.column(name)?.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;
    if ca.null_count() > 0 {
        return Err(PipelineError::Numeric(format!(
            "column '{}' still has {} missing value(s) at scaling time",
            name,
            ca.null_count()
        )));
    }
    Ok(ca.into_no_null_iter().collect())
}

impl StandardScaler {
    /// Learn mean and standard deviation for each of `columns` over every row.
    pub fn fit(df: &DataFrame, columns: &[String]) -> PipelineResult<Self> {
        let mut fitted = Vec::with_capacity(columns.len());

        for name in columns {
            let values = column_values(df, name)?;
            let (mean, std) = mean_std(&values).ok_or_else(|| {
                PipelineError::Numeric(format!("cannot scale empty column '{}'", name))
            })?;
            fitted.push(ColumnScaling {
                column: name.clone(),
                mean,
                std,
            });
        }

        Ok(Self { columns: fitted })
    }

    /// Rewrite the fitted columns of `df` in place as `Float64`.
    pub fn transform(&self, df: &mut DataFrame) -> PipelineResult<()> {
        for scaling in &self.columns {
            let values: Vec<f64> = column_values(df, &scaling.column)?
                .into_iter()
                .map(|v| scaling.apply(v))
                .collect();
            df.with_column(Column::new(scaling.column.as_str().into(), values))?;
        }
        Ok(())
    }

    pub fn fit_transform(df: &mut DataFrame, columns: &[String]) -> PipelineResult<Self> {
        let scaler = Self::fit(df, columns)?;
        scaler.transform(df)?;
        Ok(scaler)
    }

    pub fn get(&self, column: &str) -> Option<&ColumnScaling> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Columns whose variance was zero at fit time.
    pub fn constant_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.std == 0.0)
            .map(|c| c.column.as_str())
            .collect()
    }
}
