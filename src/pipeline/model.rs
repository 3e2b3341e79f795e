//! Ordinary least squares linear regression
//!
//! The model is fit on centered data so the intercept falls out of the
//! training means:
//!
//! 1. Center X and y on their training means
//! 2. Solve `min ||X_c b - y_c||²` with a Householder QR (faer)
//! 3. `intercept = mean(y) - Σ b_j * mean(x_j)`
//!
//! Features that are constant over the training rows carry no information
//! and receive a zero coefficient instead of entering the solve. So does a
//! feature that is a linear combination of features listed before it; the
//! fitted predictions are the same as with the full least squares solution.

use faer::prelude::*;
use faer::Mat;
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::scale::is_zero_variance;

/// Relative residual norm below which a centered feature column counts as
/// dependent on the columns before it.
const RANK_TOLERANCE: f64 = 1e-10;

/// A fitted linear model: `y = intercept + Σ coefficients[j] * x[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    /// Predict every row of `x`. Rows must have `n_features()` values.
    pub fn predict(&self, x: &[Vec<f64>]) -> PipelineResult<Vec<f64>> {
        x.iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.n_features() {
                    Err(PipelineError::Numeric(format!(
                        "row {} has {} value(s), model expects {}",
                        i,
                        row.len(),
                        self.n_features()
                    )))
                } else {
                    Ok(self.predict_row(row))
                }
            })
            .collect()
    }

    /// Coefficient of a named feature.
    pub fn coefficient(&self, feature: &str) -> Option<f64> {
        self.features
            .iter()
            .position(|f| f == feature)
            .map(|i| self.coefficients[i])
    }
}

fn column_means(x: &[Vec<f64>], n_features: usize) -> Vec<f64> {
    let n = x.len() as f64;
    let mut means = vec![0.0; n_features];
    for row in x {
        for (m, v) in means.iter_mut().zip(row.iter()) {
            *m += v;
        }
    }
    means.iter_mut().for_each(|m| *m /= n);
    means
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(u, v)| u * v).sum()
}

/// Positions of the columns that are not a linear combination of the
/// columns kept before them, in input order.
///
/// Gram-Schmidt with one reorthogonalization pass; a column is dependent
/// when its residual norm falls below `RANK_TOLERANCE` of its own norm.
fn independent_columns(columns: &[Vec<f64>]) -> Vec<usize> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
    let mut kept = Vec::with_capacity(columns.len());

    for (k, column) in columns.iter().enumerate() {
        let norm = dot(column, column).sqrt();
        if norm == 0.0 {
            continue;
        }

        let mut residual = column.clone();
        for _ in 0..2 {
            for q in &basis {
                let projection = dot(q, &residual);
                for (r, qv) in residual.iter_mut().zip(q.iter()) {
                    *r -= projection * qv;
                }
            }
        }

        let residual_norm = dot(&residual, &residual).sqrt();
        if residual_norm <= RANK_TOLERANCE * norm {
            continue;
        }
        residual.iter_mut().for_each(|r| *r /= residual_norm);
        basis.push(residual);
        kept.push(k);
    }

    kept
}

/// Fit an ordinary least squares model with intercept.
pub fn fit_ols(x: &[Vec<f64>], y: &[f64], features: &[String]) -> PipelineResult<LinearModel> {
    let n_rows = x.len();
    let n_features = features.len();

    if n_rows == 0 {
        return Err(PipelineError::Numeric(
            "cannot fit a model on zero training rows".to_string(),
        ));
    }
    if y.len() != n_rows {
        return Err(PipelineError::Numeric(format!(
            "feature matrix has {} row(s) but target has {}",
            n_rows,
            y.len()
        )));
    }
    if let Some((i, row)) = x.iter().enumerate().find(|(_, row)| row.len() != n_features) {
        return Err(PipelineError::Numeric(format!(
            "row {} has {} value(s), expected {}",
            i,
            row.len(),
            n_features
        )));
    }

    let x_mean = column_means(x, n_features);
    let y_mean = y.iter().sum::<f64>() / n_rows as f64;

    let active: Vec<usize> = (0..n_features)
        .filter(|&j| {
            let var = x
                .iter()
                .map(|row| (row[j] - x_mean[j]) * (row[j] - x_mean[j]))
                .sum::<f64>()
                / n_rows as f64;
            !is_zero_variance(var, x_mean[j], n_rows)
        })
        .collect();

    let mut coefficients = vec![0.0; n_features];

    if !active.is_empty() {
        if n_rows < active.len() {
            return Err(PipelineError::Numeric(format!(
                "{} training row(s) cannot determine {} coefficient(s)",
                n_rows,
                active.len()
            )));
        }

        let centered: Vec<Vec<f64>> = active
            .iter()
            .map(|&j| x.iter().map(|row| row[j] - x_mean[j]).collect())
            .collect();
        let solved: Vec<usize> = independent_columns(&centered)
            .into_iter()
            .map(|k| active[k])
            .collect();

        let mut a = Mat::<f64>::zeros(n_rows, solved.len());
        let mut b = Mat::<f64>::zeros(n_rows, 1);
        for (i, row) in x.iter().enumerate() {
            for (k, &j) in solved.iter().enumerate() {
                a[(i, k)] = row[j] - x_mean[j];
            }
            b[(i, 0)] = y[i] - y_mean;
        }

        let solution = a.qr().solve_lstsq(b.as_ref());

        for (k, &j) in solved.iter().enumerate() {
            let value = solution[(k, 0)];
            if !value.is_finite() {
                return Err(PipelineError::Numeric(format!(
                    "least squares solution for '{}' is not finite",
                    features[j]
                )));
            }
            coefficients[j] = value;
        }
    }

    let intercept = y_mean
        - coefficients
            .iter()
            .zip(x_mean.iter())
            .map(|(c, m)| c * m)
            .sum::<f64>();

    Ok(LinearModel {
        features: features.to_vec(),
        coefficients,
        intercept,
    })
}
