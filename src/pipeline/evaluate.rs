//! Hold-out evaluation metrics

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::model::LinearModel;

/// Metrics computed on the evaluation partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub mse: f64,
    pub rmse: f64,
    /// Coefficient of determination; 0.0 when the actual values are constant.
    pub r2: f64,
    pub n_samples: usize,
}

/// Mean of squared differences between `actual` and `predicted`.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> PipelineResult<f64> {
    check_lengths(actual, predicted)?;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> PipelineResult<f64> {
    check_lengths(actual, predicted)?;
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum();

    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 - ss_res / ss_tot)
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> PipelineResult<()> {
    if actual.is_empty() {
        return Err(PipelineError::Numeric(
            "cannot score an empty evaluation partition".to_string(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(PipelineError::Numeric(format!(
            "{} actual value(s) but {} prediction(s)",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Score `model` on the held-out rows.
pub fn evaluate(
    model: &LinearModel,
    x_test: &[Vec<f64>],
    y_test: &[f64],
) -> PipelineResult<EvaluationReport> {
    let predicted = model.predict(x_test)?;
    let mse = mean_squared_error(y_test, &predicted)?;

    Ok(EvaluationReport {
        mse,
        rmse: mse.sqrt(),
        r2: r2_score(y_test, &predicted)?,
        n_samples: y_test.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse() {
        let mse = mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
        assert!((mse - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_prediction() {
        let actual = [1.0, 2.0, 3.0];
        assert_eq!(mean_squared_error(&actual, &actual).unwrap(), 0.0);
        assert_eq!(r2_score(&actual, &actual).unwrap(), 1.0);
    }

    #[test]
    fn test_r2_constant_actual() {
        assert_eq!(r2_score(&[2.0, 2.0], &[1.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch_and_empty() {
        assert!(mean_squared_error(&[1.0], &[1.0, 2.0]).is_err());
        assert!(mean_squared_error(&[], &[]).is_err());
    }

    #[test]
    fn test_evaluate_report() {
        let model = LinearModel {
            features: vec!["x".to_string()],
            coefficients: vec![2.0],
            intercept: 1.0,
        };
        let report = evaluate(&model, &[vec![0.0], vec![1.0]], &[1.0, 5.0]).unwrap();

        assert_eq!(report.n_samples, 2);
        assert!((report.mse - 2.0).abs() < 1e-12);
        assert!((report.rmse - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
