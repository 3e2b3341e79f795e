//! Pricefit: House Price Training CLI
//!
//! Trains a linear regression model that predicts sale price from a small
//! set of housing features and saves it as a JSON artifact.

use anyhow::Result;
use clap::Parser;

use pricefit::cli::{run_inspect, Cli, Commands};
use pricefit::pipeline::{run_pipeline, ErrorKind, PipelineError};
use pricefit::report::display_coefficients;
use pricefit::utils::{print_banner, print_completion, print_config, print_failure};

// A failed run is reported with one line and still ends normally.
fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        print_failure(&failure_line(&err));
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(Commands::Inspect { model }) = &cli.command {
        return run_inspect(model);
    }

    let config = cli.to_config();

    if !config.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&config);
    }

    let outcome = run_pipeline(&config)?;

    println!("Mean Squared Error: {}", outcome.evaluation.mse);

    if !config.quiet {
        outcome.summary.display();
        display_coefficients(&outcome.model);
    }

    println!("Model training and saving completed successfully.");

    if !config.quiet {
        print_completion();
    }

    Ok(())
}

/// One descriptive line for a failed run.
fn failure_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PipelineError>() {
        Some(pipeline_err) if pipeline_err.kind() == ErrorKind::DatasetNotFound => {
            pipeline_err.to_string()
        }
        Some(pipeline_err) => format!("An error occurred: {}", pipeline_err),
        None => format!("An error occurred: {:#}", err),
    }
}
