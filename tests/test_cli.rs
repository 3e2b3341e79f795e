//! Tests for CLI argument parsing and the binary's console output

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use pricefit::cli::{Cli, Commands};
use std::path::PathBuf;
use tempfile::TempDir;

mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["pricefit"]);

    assert_eq!(cli.input, PathBuf::from("AmesHousing.csv"));
    assert_eq!(cli.target, "SalePrice");
    assert_eq!(cli.output, PathBuf::from("house_price_model.json"));
    assert_eq!(cli.test_size, 0.2, "Default test size should be 0.2");
    assert_eq!(cli.seed, 42, "Default seed should be 42");
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
    assert!(!cli.quiet);
    assert!(cli.command.is_none());
    assert_eq!(cli.feature_list(), common::FEATURES.to_vec());
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "pricefit",
        "-i",
        "homes.parquet",
        "-t",
        "Price",
        "-f",
        "Lot Area, Fireplaces",
        "-o",
        "out/model.json",
        "--test-size",
        "0.3",
        "--seed",
        "7",
        "-q",
    ]);

    let config = cli.to_config();

    assert_eq!(config.input, PathBuf::from("homes.parquet"));
    assert_eq!(config.target, "Price");
    assert_eq!(config.features, vec!["Lot Area", "Fireplaces"]);
    assert_eq!(config.output, PathBuf::from("out/model.json"));
    assert_eq!(config.test_size, 0.3);
    assert_eq!(config.seed, 7);
    assert!(config.quiet);
}

#[test]
fn test_cli_null_values() {
    let default_cli = Cli::parse_from(["pricefit"]);
    assert!(default_cli
        .to_config()
        .load
        .null_values
        .contains(&"NA".to_string()));

    let cli = Cli::parse_from(["pricefit", "--null-values", "?,-"]);
    assert_eq!(cli.to_config().load.null_values, vec!["?", "-"]);
}

#[test]
fn test_cli_rejects_bad_test_size() {
    assert!(Cli::try_parse_from(["pricefit", "--test-size", "1.0"]).is_err());
    assert!(Cli::try_parse_from(["pricefit", "--test-size", "0"]).is_err());
    assert!(Cli::try_parse_from(["pricefit", "--test-size", "half"]).is_err());
}

#[test]
fn test_cli_inspect_subcommand() {
    let cli = Cli::parse_from(["pricefit", "inspect", "model.json"]);

    match cli.command {
        Some(Commands::Inspect { model }) => assert_eq!(model, PathBuf::from("model.json")),
        other => panic!("Expected inspect subcommand, got {:?}", other),
    }
}

#[test]
fn test_binary_missing_dataset_reports_one_line() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("model.json");

    Command::cargo_bin("pricefit")
        .unwrap()
        .arg("-i")
        .arg(temp_dir.path().join("AmesHousing.csv"))
        .arg("-o")
        .arg(&output)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("The specified file was not found"))
        .stdout(predicate::str::contains("Mean Squared Error").not())
        .stdout(predicate::str::contains("completed successfully").not());

    assert!(!output.exists());
}

#[test]
fn test_binary_missing_target_reports_generic_failure() {
    let mut df = common::create_housing_dataframe(20, 1);
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let output = temp_dir.path().join("model.json");

    Command::cargo_bin("pricefit")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("-t")
        .arg("Price")
        .arg("-o")
        .arg(&output)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "An error occurred: Target column 'Price' not found in the dataset.",
        ));

    assert!(!output.exists());
}

#[test]
fn test_binary_quiet_success_and_inspect() {
    let mut df = common::create_housing_dataframe(100, 42);
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let output = temp_dir.path().join("model.json");

    Command::cargo_bin("pricefit")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("-o")
        .arg(&output)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean Squared Error: "))
        .stdout(predicate::str::contains(
            "Model training and saving completed successfully.",
        ));

    assert!(output.exists());

    Command::cargo_bin("pricefit")
        .unwrap()
        .arg("inspect")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gr Liv Area"));
}
