//! EMI Calculator CLI
//!
//! Command-line front end for the loan repayment calculator

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use emi_calculator::config::AppConfig;
use emi_calculator::emi::output::{write_chart_csv_file, write_schedule_csv_file};
use emi_calculator::emi::{DisplayedResult, ScheduleSummary};
use emi_calculator::preferences::JsonFileStore;
use emi_calculator::{
    compute_emi, AmortizationResult, AmortizationSchedule, ChartPoint, LoanCalculator,
    LoanParameters, SliderField, ThemeMode, ThemePreference,
};

/// Loan repayment (EMI) calculator
#[derive(Parser)]
#[command(name = "emi", version, about = "Loan repayment (EMI) calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the monthly installment and repayment totals
    Calc(CalcArgs),
    /// Show or change the stored dark/light preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Args)]
struct CalcArgs {
    /// Loan amount
    #[arg(long, default_value = "100000")]
    amount: String,
    /// Annual interest rate in percent
    #[arg(long, default_value = "1")]
    rate: String,
    /// Loan duration in years
    #[arg(long, default_value = "1")]
    years: String,
    /// Course duration (informational)
    #[arg(long, default_value = "0")]
    course_duration: String,
    /// Grace period in months (informational)
    #[arg(long, default_value = "0")]
    grace_period: String,
    /// Pass values to the engine as given instead of clamping to slider ranges
    #[arg(long)]
    no_clamp: bool,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Write the month-by-month chart series to this CSV file
    #[arg(long)]
    chart_csv: Option<PathBuf>,
    /// Write the amortization schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,
    /// First due date of the schedule (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current mode
    Show,
    /// Switch between dark and light
    Toggle,
    /// Set a specific mode
    Set { mode: ModeArg },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Dark,
    Light,
}

impl From<ModeArg> for ThemeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dark => ThemeMode::Dark,
            ModeArg::Light => ThemeMode::Light,
        }
    }
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    params: &'a LoanParameters,
    result: &'a AmortizationResult,
    displayed: DisplayedResult,
    chart: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule_summary: Option<ScheduleSummary>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Calc(args) => run_calc(&config, args),
        Commands::Theme { action } => run_theme(&config, action),
    }
}

/// Build parameters through the slider boundary (parse + clamp)
fn clamped_params(args: &CalcArgs) -> Result<LoanParameters> {
    let mut calc = LoanCalculator::new()?;
    let inputs = [
        (SliderField::LoanAmount, &args.amount),
        (SliderField::InterestRate, &args.rate),
        (SliderField::LoanDuration, &args.years),
        (SliderField::CourseDuration, &args.course_duration),
        (SliderField::GracePeriod, &args.grace_period),
    ];
    for (field, raw) in inputs {
        calc.set_input(field, raw)
            .with_context(|| format!("invalid {}", field.label()))?;
    }
    Ok(calc.params())
}

/// Build parameters exactly as given
fn raw_params(args: &CalcArgs) -> Result<LoanParameters> {
    let principal: f64 = args.amount.trim().parse().context("invalid loan amount")?;
    let rate: f64 = args.rate.trim().parse().context("invalid interest rate")?;
    let years: u32 = args.years.trim().parse().context("loan duration must be a whole number of years")?;
    let course: u32 = args.course_duration.trim().parse().context("invalid course duration")?;
    let grace: u32 = args.grace_period.trim().parse().context("invalid grace period")?;
    Ok(LoanParameters::new(principal, rate, years).with_study_terms(course, grace))
}

fn run_calc(config: &AppConfig, args: CalcArgs) -> Result<()> {
    let params = if args.no_clamp {
        raw_params(&args)?
    } else {
        clamped_params(&args)?
    };

    let result = compute_emi(&params).context("EMI computation failed")?;

    if args.start_date.is_some() && args.schedule_csv.is_none() && !args.json {
        bail!("--start-date only applies with --schedule-csv or --json");
    }

    let schedule = if args.schedule_csv.is_some() || args.start_date.is_some() {
        Some(AmortizationSchedule::build(&params, args.start_date)?)
    } else {
        None
    };

    if let Some(path) = &args.chart_csv {
        write_chart_csv_file(path, result.chart_series()?)
            .with_context(|| format!("writing chart to {}", path.display()))?;
        log::info!("chart series written to {}", path.display());
    }

    if let (Some(path), Some(schedule)) = (&args.schedule_csv, &schedule) {
        write_schedule_csv_file(path, &schedule.rows)
            .with_context(|| format!("writing schedule to {}", path.display()))?;
        log::info!("schedule written to {}", path.display());
    }

    if args.json {
        let output = CalcOutput {
            params: &params,
            result: &result,
            displayed: result.displayed(),
            chart: result.chart_series()?,
            schedule_summary: schedule.as_ref().map(|s| s.summary()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Loan Repayment Calculator");
    println!("=========================");
    println!("The displayed EMI amount is approximate & is subject to change based on various factors.\n");

    println!("Inputs:");
    println!("  Loan Amount:     {}", params.principal);
    println!("  Interest Rate:   {}%", params.annual_rate_percent);
    println!("  Loan Duration:   {} years ({} months)", params.duration_years, result.total_months);
    if let Some(course) = params.course_duration_months {
        println!("  Course Duration: {}", course);
    }
    if let Some(grace) = params.grace_period_months {
        println!("  Grace Period:    {}", grace);
    }
    println!();

    println!("Result:");
    for (label, value) in result.summary_lines(&config.currency_symbol) {
        println!("  {:<17} {}", format!("{}:", label), value);
    }

    if let Some(path) = &args.chart_csv {
        println!("\nChart: {} monthly points written to {}", result.total_months, path.display());
    }
    if let Some(path) = &args.schedule_csv {
        println!("Schedule written to {}", path.display());
    }

    Ok(())
}

fn run_theme(config: &AppConfig, action: ThemeAction) -> Result<()> {
    let store = JsonFileStore::new(&config.prefs_path);
    let mut preference = ThemePreference::load(store, config.system_theme);

    let mode = match action {
        ThemeAction::Show => preference.mode(),
        ThemeAction::Toggle => preference
            .toggle()
            .with_context(|| format!("saving preference to {}", config.prefs_path.display()))?,
        ThemeAction::Set { mode } => preference
            .set(mode.into())
            .with_context(|| format!("saving preference to {}", config.prefs_path.display()))?,
    };

    println!("Theme: {}", mode.as_str());
    println!("  ({})", mode.toggle_label());
    Ok(())
}
