//! Coefficient table for a fitted model

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{LinearModel, ModelArtifact};

/// One row per feature plus the intercept.
pub fn coefficient_table(model: &LinearModel) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Coefficient").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("(intercept)").add_attribute(Attribute::Italic),
        Cell::new(format!("{:+.6}", model.intercept)).set_alignment(CellAlignment::Right),
    ]);

    for (feature, coefficient) in model.features.iter().zip(model.coefficients.iter()) {
        let color = if *coefficient > 0.0 {
            Color::Green
        } else if *coefficient < 0.0 {
            Color::Red
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(feature),
            Cell::new(format!("{:+.6}", coefficient))
                .fg(color)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print the coefficients of `model` under a section title.
pub fn display_coefficients(model: &LinearModel) {
    println!();
    println!(
        "    {} {}",
        style("📐").cyan(),
        style("MODEL COEFFICIENTS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();
    for line in coefficient_table(model).to_string().lines() {
        println!("    {}", line);
    }
}

/// Print the metadata, metrics and coefficients stored in an artifact.
pub fn display_artifact(artifact: &ModelArtifact) {
    println!();
    println!(
        "    {} {}",
        style("📦").cyan(),
        style("MODEL ARTIFACT").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!("      Format version: {}", artifact.format_version);
    println!("      Created:        {}", artifact.created_at);
    println!("      Tool version:   {}", artifact.tool_version);
    println!("      Target:         {}", style(&artifact.target).cyan());
    println!(
        "      Rows:           {} train / {} test (seed {}, test size {})",
        artifact.train_rows, artifact.test_rows, artifact.seed, artifact.test_size
    );
    println!(
        "      Test MSE:       {}",
        style(format!("{:.6}", artifact.metrics.mse)).yellow().bold()
    );
    println!("      Test RMSE:      {:.6}", artifact.metrics.rmse);
    println!("      Test R²:        {:.4}", artifact.metrics.r2);

    display_coefficients(artifact.model());

    if !artifact.scaling.is_empty() {
        println!();
        println!("      {}:", style("Standardization").yellow());
        for scaling in &artifact.scaling {
            println!(
                "        {} {} (mean {:.4}, std {:.4})",
                style("•").dim(),
                scaling.column,
                scaling.mean,
                scaling.std
            );
        }
    }
}
