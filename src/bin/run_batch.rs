//! Evaluate every loan scenario in a CSV file
//!
//! Usage: run_batch <scenarios.csv> [--output batch_output.csv] [--clamp]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use emi_calculator::loan::load_scenarios;
use emi_calculator::scenario::{total_monthly_outflow, write_batch_csv};
use emi_calculator::ScenarioRunner;

#[derive(Parser)]
#[command(name = "run_batch", version, about = "Evaluate loan scenarios from a CSV file")]
struct BatchArgs {
    /// Scenario CSV (ScenarioID,LoanAmount,InterestRate,LoanDuration[,CourseDuration,GracePeriod])
    input: PathBuf,
    /// Output CSV path
    #[arg(long, default_value = "batch_output.csv")]
    output: PathBuf,
    /// Clamp amount, rate and duration to the calculator's slider ranges
    #[arg(long)]
    clamp: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = BatchArgs::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = if args.clamp { ScenarioRunner::clamped() } else { ScenarioRunner::new() };

    let run_start = Instant::now();
    let outcomes = runner.run_batch(&scenarios);
    println!("Computed in {:?}", run_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_batch_csv(file, &outcomes)?;
    println!("Output written to {}", args.output.display());

    let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    println!("\nBatch Summary:");
    println!("  Scenarios:             {}", outcomes.len());
    println!("  Failed:                {}", failed.len());
    println!("  Total monthly outflow: {:.2}", total_monthly_outflow(&outcomes));
    for outcome in failed.iter().take(10) {
        if let Err(e) = &outcome.result {
            println!("    scenario {}: {}", outcome.scenario_id, e);
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
