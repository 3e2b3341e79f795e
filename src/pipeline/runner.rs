//! Stage sequencing for a training run
//!
//! Stages run exactly once, in order: load, impute, encode, scale,
//! select/split, fit, evaluate, persist. The first failing stage aborts the
//! run; since persisting is the last stage, an aborted run never leaves an
//! artifact behind.

use std::path::PathBuf;
use std::time::Instant;

use indicatif::ProgressBar;

use super::config::PipelineConfig;
use super::encode::one_hot_encode;
use super::error::{PipelineError, PipelineResult};
use super::evaluate::{evaluate, EvaluationReport};
use super::impute::impute_missing;
use super::loader::load_dataset;
use super::model::{fit_ols, LinearModel};
use super::persist::{save_model, ArtifactParams, ModelArtifact};
use super::scale::StandardScaler;
use super::schema::partition_columns;
use super::select::{extract_design, select_features};
use super::split::{take_rows, train_test_split};
use crate::report::TrainingSummary;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_info,
    print_step_header, print_step_time, print_success,
};

/// Everything a successful run produces.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifact_path: PathBuf,
    pub model: LinearModel,
    pub evaluation: EvaluationReport,
    pub summary: TrainingSummary,
}

/// Close a spinner according to the stage result.
fn finish_stage<T>(pb: &ProgressBar, result: PipelineResult<T>, done: &str) -> PipelineResult<T> {
    match &result {
        Ok(_) => finish_with_success(pb, done),
        Err(_) => finish_with_warning(pb, "Stage failed"),
    }
    result
}

/// Run the full training pipeline described by `config`.
pub fn run_pipeline(config: &PipelineConfig) -> PipelineResult<TrainingOutcome> {
    config.validate()?;
    let verbose = !config.quiet;

    // Step 1: Load dataset
    if verbose {
        print_step_header(1, "Load Dataset");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...", verbose);
    let (mut df, rows, cols, memory_mb) = finish_stage(
        &spinner,
        load_dataset(&config.input, &config.load),
        "Dataset loaded",
    )?;
    let partition = partition_columns(&df);

    let mut summary = TrainingSummary::new(rows, cols);
    summary.numeric_columns = partition.numeric.len();
    summary.categorical_columns = partition.categorical.len();
    summary.record_stage_time("load", step_start.elapsed());
    if verbose {
        println!("      Rows: {}", rows);
        println!(
            "      Columns: {} ({} numeric, {} categorical)",
            cols,
            partition.numeric.len(),
            partition.categorical.len()
        );
        println!("      Estimated memory: {:.2} MB", memory_mb);
        print_step_time(step_start.elapsed());
    }

    // Step 2: Impute missing values
    if verbose {
        print_step_header(2, "Impute Missing Values");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Filling missing values...", verbose);
    let imputation = finish_stage(
        &spinner,
        impute_missing(&mut df, &partition),
        "Missing values filled",
    )?;
    summary.record_imputation(&imputation);
    summary.record_stage_time("impute", step_start.elapsed());
    if verbose {
        if imputation.total_filled() == 0 {
            print_info("No missing values found");
        } else {
            print_count(
                "missing cell(s)",
                imputation.total_filled(),
                Some(&format!(
                    "across {} column(s)",
                    imputation.imputed_columns().len()
                )),
            );
        }
        print_step_time(step_start.elapsed());
    }

    // Step 3: One-hot encode categoricals
    if verbose {
        print_step_header(3, "Encode Categorical Columns");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Building indicator columns...", verbose);
    let indicators = finish_stage(
        &spinner,
        one_hot_encode(&mut df, &partition.categorical),
        "Categorical columns encoded",
    )?;
    summary.encoded_columns = indicators.len();
    summary.record_stage_time("encode", step_start.elapsed());
    if verbose {
        print_count(
            "indicator column(s)",
            indicators.len(),
            Some(&format!("from {} categorical", partition.categorical.len())),
        );
        print_step_time(step_start.elapsed());
    }

    // Step 4: Standardize numeric columns
    if verbose {
        print_step_header(4, "Standardize Numeric Columns");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Scaling numeric columns...", verbose);
    let scaler = finish_stage(
        &spinner,
        StandardScaler::fit_transform(&mut df, &partition.numeric),
        "Numeric columns standardized",
    )?;
    summary.constant_columns = scaler
        .constant_columns()
        .into_iter()
        .map(String::from)
        .collect();
    summary.record_stage_time("scale", step_start.elapsed());
    if verbose {
        if !summary.constant_columns.is_empty() {
            print_count(
                "zero-variance column(s)",
                summary.constant_columns.len(),
                Some("(left at 0.0)"),
            );
        }
        print_step_time(step_start.elapsed());
    }

    // Step 5: Select features and split
    if verbose {
        print_step_header(5, "Select Features & Split");
    }
    let step_start = Instant::now();
    let features = select_features(&df, &config.features, &config.target)?;
    summary.skipped_candidates = config
        .features
        .iter()
        .filter(|c| !features.contains(c) && **c != config.target)
        .cloned()
        .collect();
    if features.is_empty() {
        return Err(PipelineError::NoUsableFeatures {
            candidates: config.features.clone(),
        });
    }

    let (x, y) = extract_design(&df, &features, &config.target)?;
    let scaling: Vec<_> = features
        .iter()
        .chain(std::iter::once(&config.target))
        .filter_map(|name| scaler.get(name).cloned())
        .collect();
    drop(df);

    let split = train_test_split(x.len(), config.test_size, config.seed)?;
    let (x_train, y_train) = take_rows(&x, &y, &split.train);
    let (x_test, y_test) = take_rows(&x, &y, &split.test);
    summary.selected_features = features.clone();
    summary.train_rows = split.n_train();
    summary.test_rows = split.n_test();
    summary.record_stage_time("split", step_start.elapsed());
    if verbose {
        print_success(&format!("Selected features: {}", features.join(", ")));
        if !summary.skipped_candidates.is_empty() {
            print_info(&format!(
                "Not in dataset: {}",
                summary.skipped_candidates.join(", ")
            ));
        }
        println!(
            "      Train rows: {}  Test rows: {}",
            split.n_train(),
            split.n_test()
        );
        print_step_time(step_start.elapsed());
    }

    // Step 6: Fit
    if verbose {
        print_step_header(6, "Fit Linear Model");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Solving least squares...", verbose);
    let model = finish_stage(
        &spinner,
        fit_ols(&x_train, &y_train, &features),
        "Model fitted",
    )?;
    summary.record_stage_time("fit", step_start.elapsed());
    if verbose {
        let unused: Vec<&str> = features
            .iter()
            .filter(|f| model.coefficient(f) == Some(0.0))
            .map(String::as_str)
            .collect();
        if !unused.is_empty() {
            print_info(&format!(
                "Constant or redundant in training, coefficient 0: {}",
                unused.join(", ")
            ));
        }
        print_step_time(step_start.elapsed());
    }

    // Step 7: Evaluate on held-out rows
    if verbose {
        print_step_header(7, "Evaluate");
    }
    let step_start = Instant::now();
    let evaluation = evaluate(&model, &x_test, &y_test)?;
    summary.evaluation = Some(evaluation);
    summary.record_stage_time("evaluate", step_start.elapsed());
    if verbose {
        println!("      RMSE: {:.6}", evaluation.rmse);
        println!("      R²:   {:.4}", evaluation.r2);
        print_step_time(step_start.elapsed());
    }

    // Step 8: Persist
    if verbose {
        print_step_header(8, "Save Model");
    }
    let step_start = Instant::now();
    let spinner = create_spinner("Writing model artifact...", verbose);
    let artifact = ModelArtifact::new(
        model.clone(),
        evaluation,
        ArtifactParams {
            target: &config.target,
            train_rows: split.n_train(),
            test_rows: split.n_test(),
            seed: config.seed,
            test_size: config.test_size,
            scaling,
        },
    );
    finish_stage(
        &spinner,
        save_model(&artifact, &config.output),
        &format!("Saved to {}", config.output.display()),
    )?;
    summary.artifact_path = Some(config.output.clone());
    summary.record_stage_time("save", step_start.elapsed());
    if verbose {
        print_step_time(step_start.elapsed());
    }

    Ok(TrainingOutcome {
        artifact_path: config.output.clone(),
        model,
        evaluation,
        summary,
    })
}
