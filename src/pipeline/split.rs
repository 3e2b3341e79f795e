//! Seeded train/test splitting

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::{PipelineError, PipelineResult};

/// Row indices of the training and evaluation partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    pub fn n_train(&self) -> usize {
        self.train.len()
    }

    pub fn n_test(&self) -> usize {
        self.test.len()
    }
}

/// Partition `n_rows` row indices into train and test sets.
///
/// The test partition holds `ceil(test_size * n_rows)` rows. Membership is a
/// pure function of `(n_rows, test_size, seed)`.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> PipelineResult<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidConfig(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            test_size
        )));
    }
    if n_rows < 2 {
        return Err(PipelineError::InsufficientRows { rows: n_rows });
    }

    let n_test = ((test_size * n_rows as f64).ceil() as usize).clamp(1, n_rows - 1);

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(Split {
        train,
        test: indices,
    })
}

/// Materialize the rows of one partition.
pub fn take_rows(x: &[Vec<f64>], y: &[f64], indices: &[usize]) -> (Vec<Vec<f64>>, Vec<f64>) {
    let x_part = indices.iter().map(|&i| x[i].clone()).collect();
    let y_part = indices.iter().map(|&i| y[i]).collect();
    (x_part, y_part)
}
