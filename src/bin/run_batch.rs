//! Run lifetime projections for every row of a scenarios CSV
//!
//! Outputs one summary row per scenario

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use account_projection::scenario::{load_scenarios, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Project every scenario in a CSV file")]
struct Cli {
    #[arg(long, default_value = "data/scenarios.csv")]
    scenarios: PathBuf,

    #[arg(long, default_value = "data/reference")]
    reference: PathBuf,

    #[arg(short = 'o', long, default_value = "batch_projection_output.csv")]
    output: PathBuf,
}

/// Flattened summary row for CSV output
#[derive(Debug, Serialize)]
struct SummaryRow {
    scenario_id: u32,
    years_simulated: u32,
    seed: f64,
    total_contributions: f64,
    total_earnings: f64,
    total_expenses: f64,
    balance_at_conversion: Option<f64>,
    final_age: Option<u32>,
    final_balance: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", cli.scenarios.display());

    let scenarios = load_scenarios(&cli.scenarios)
        .with_context(|| format!("loading {}", cli.scenarios.display()))?;
    let runner = ScenarioRunner::from_csv_path(&cli.reference)
        .with_context(|| format!("loading reference data from {}", cli.reference.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let outcomes = runner.run_rows(&scenarios);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    for outcome in &outcomes {
        let s = &outcome.summary;
        writer.serialize(SummaryRow {
            scenario_id: outcome.scenario_id,
            years_simulated: s.years_simulated,
            seed: s.seed,
            total_contributions: s.total_contributions,
            total_earnings: s.total_earnings,
            total_expenses: s.total_expenses,
            balance_at_conversion: s.balance_at_conversion,
            final_age: s.final_age,
            final_balance: s.final_balance,
        })?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    println!("\nBatch Summary:");
    for outcome in &outcomes {
        println!(
            "  Scenario {:>3}: at conversion ${:>12.2}, final ${:>14.2}",
            outcome.scenario_id,
            outcome.summary.balance_at_conversion.unwrap_or(0.0),
            outcome.summary.final_balance
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
