//! Training run summary

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{EvaluationReport, ImputationReport};

/// Facts collected while a training run progresses.
#[derive(Debug, Default, Clone)]
pub struct TrainingSummary {
    pub rows: usize,
    pub initial_columns: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub imputed_cells: usize,
    pub imputed_columns: Vec<String>,
    pub encoded_columns: usize,
    pub constant_columns: Vec<String>,
    pub selected_features: Vec<String>,
    pub skipped_candidates: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub evaluation: Option<EvaluationReport>,
    pub artifact_path: Option<PathBuf>,
    pub stage_times: Vec<(String, Duration)>,
}

impl TrainingSummary {
    pub fn new(rows: usize, initial_columns: usize) -> Self {
        Self {
            rows,
            initial_columns,
            ..Default::default()
        }
    }

    pub fn record_imputation(&mut self, report: &ImputationReport) {
        self.imputed_cells = report.total_filled();
        self.imputed_columns = report
            .imputed_columns()
            .into_iter()
            .map(String::from)
            .collect();
    }

    pub fn record_stage_time(&mut self, stage: &str, elapsed: Duration) {
        self.stage_times.push((stage.to_string(), elapsed));
    }

    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }

    /// Build the summary table without printing it.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new("🧮 Columns (numeric / categorical)"),
            Cell::new(format!(
                "{} ({} / {})",
                self.initial_columns, self.numeric_columns, self.categorical_columns
            )),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Imputed cells"),
            Cell::new(self.imputed_cells).fg(if self.imputed_cells == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🔤 Indicator columns"),
            Cell::new(self.encoded_columns),
        ]);
        table.add_row(vec![
            Cell::new("🎯 Selected features"),
            Cell::new(self.selected_features.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("✂️  Train / test rows"),
            Cell::new(format!("{} / {}", self.train_rows, self.test_rows)),
        ]);

        if let Some(evaluation) = &self.evaluation {
            table.add_row(vec![
                Cell::new("📉 Test MSE"),
                Cell::new(format!("{:.6}", evaluation.mse))
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("📈 Test R²"),
                Cell::new(format!("{:.4}", evaluation.r2)).fg(if evaluation.r2 > 0.5 {
                    Color::Green
                } else {
                    Color::Yellow
                }),
            ]);
        }

        table.add_row(vec![
            Cell::new("⏱  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("TRAINING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.skipped_candidates.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Candidates not in dataset").yellow(),
                style(format!("({})", self.skipped_candidates.len())).dim()
            );
            for feature in &self.skipped_candidates {
                println!("        {} {}", style("•").dim(), feature);
            }
        }

        if !self.constant_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Zero-variance columns").yellow(),
                style(format!("({})", self.constant_columns.len())).dim()
            );
            for column in &self.constant_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }

        if let Some(path) = &self.artifact_path {
            println!();
            println!("      Model saved to {}", style(path.display()).cyan());
        }
    }
}
