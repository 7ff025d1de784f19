//! Scenario runner for batch EMI evaluations
//!
//! Evaluates many independent loans in parallel. A failing scenario produces an
//! `Err` outcome instead of aborting the batch.

use rayon::prelude::*;
use std::io::Write;

use crate::emi::{compute_emi, AmortizationResult};
use crate::error::EmiResult;
use crate::loan::{LoanParameters, LoanScenario, SliderField};

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario_id: u32,
    pub params: LoanParameters,
    pub result: EmiResult<AmortizationResult>,
}

/// Batch runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let outcomes = runner.run_batch(&load_scenarios("loans.csv")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    /// Clamp amount, rate and duration to the slider ranges before computing
    clamp_to_sliders: bool,
}

impl ScenarioRunner {
    /// Runner that passes parameters straight to the engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that applies the calculator's slider ranges first
    pub fn clamped() -> Self {
        Self { clamp_to_sliders: true }
    }

    fn prepare(&self, params: &LoanParameters) -> LoanParameters {
        if !self.clamp_to_sliders {
            return params.clone();
        }
        let clamp_f64 = |field: SliderField, value: f64| {
            let bounds = field.bounds();
            value.clamp(bounds.min as f64, bounds.max as f64)
        };
        let duration = SliderField::LoanDuration
            .bounds()
            .clamp(i64::from(params.duration_years));

        LoanParameters {
            principal: clamp_f64(SliderField::LoanAmount, params.principal),
            annual_rate_percent: clamp_f64(SliderField::InterestRate, params.annual_rate_percent),
            duration_years: u32::try_from(duration).unwrap_or(0),
            ..params.clone()
        }
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &LoanScenario) -> ScenarioOutcome {
        let params = self.prepare(&scenario.params);
        let result = compute_emi(&params);
        if let Err(e) = &result {
            log::warn!("scenario {} failed: {}", scenario.scenario_id, e);
        }
        ScenarioOutcome {
            scenario_id: scenario.scenario_id,
            params,
            result,
        }
    }

    /// Run all scenarios in parallel, preserving input order
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<_> = scenarios.par_iter().map(|s| self.run(s)).collect();
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        log::info!("evaluated {} scenarios ({} failed)", outcomes.len(), failed);
        outcomes
    }

    /// Evaluate one loan at several annual rates
    pub fn run_rate_sweep(&self, base: &LoanParameters, rates: &[f64]) -> Vec<ScenarioOutcome> {
        let scenarios: Vec<_> = rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| LoanScenario {
                scenario_id: i as u32 + 1,
                params: LoanParameters {
                    annual_rate_percent: rate,
                    ..base.clone()
                },
            })
            .collect();
        self.run_batch(&scenarios)
    }
}

/// Write one CSV row per outcome; failed scenarios carry the error text
pub fn write_batch_csv<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> EmiResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "ScenarioID",
        "LoanAmount",
        "InterestRate",
        "LoanDuration",
        "MonthlyEMI",
        "PrincipalAmount",
        "TotalInterest",
        "TotalAmount",
        "Error",
    ])?;

    for outcome in outcomes {
        let p = &outcome.params;
        let mut record = vec![
            outcome.scenario_id.to_string(),
            p.principal.to_string(),
            p.annual_rate_percent.to_string(),
            p.duration_years.to_string(),
        ];
        match &outcome.result {
            Ok(r) => {
                let shown = r.displayed();
                record.extend([
                    shown.monthly_emi,
                    shown.principal_amount,
                    shown.total_interest,
                    shown.total_amount,
                    String::new(),
                ]);
            }
            Err(e) => {
                record.extend(std::iter::repeat(String::new()).take(4));
                record.push(e.to_string());
            }
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Sum of monthly installments across successful outcomes
pub fn total_monthly_outflow(outcomes: &[ScenarioOutcome]) -> f64 {
    outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|r| r.monthly_payment)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emi::format::to_fixed_2;
    use approx::assert_abs_diff_eq;

    fn scenario(id: u32, principal: f64, rate: f64, years: u32) -> LoanScenario {
        LoanScenario {
            scenario_id: id,
            params: LoanParameters::new(principal, rate, years),
        }
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let scenarios = vec![
            scenario(1, 100_000.0, 1.0, 1),
            scenario(2, 100_000.0, 1.0, 0),
            scenario(3, 6_600_000.0, 15.0, 10),
        ];
        let outcomes = ScenarioRunner::new().run_batch(&scenarios);

        let ids: Vec<_> = outcomes.iter().map(|o| o.scenario_id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert_eq!(outcomes[2].result.as_ref().unwrap().total_months, 120);
    }

    #[test]
    fn test_clamped_runner_applies_slider_ranges() {
        let outcome = ScenarioRunner::clamped().run(&scenario(9, 5_000.0, 0.0, 0));
        assert_eq!(outcome.params.principal, 100_000.0);
        assert_eq!(outcome.params.annual_rate_percent, 1.0);
        assert_eq!(outcome.params.duration_years, 1);
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn test_rate_sweep_is_monotonic() {
        let base = LoanParameters::new(500_000.0, 0.0, 20);
        let outcomes = ScenarioRunner::new().run_rate_sweep(&base, &[3.0, 6.0, 9.0]);
        let payments: Vec<_> = outcomes
            .iter()
            .map(|o| o.result.as_ref().unwrap().monthly_payment)
            .collect();
        assert!(payments[0] < payments[1] && payments[1] < payments[2]);
    }

    #[test]
    fn test_write_batch_csv() {
        let outcomes = ScenarioRunner::new().run_batch(&[
            scenario(1, 100_000.0, 1.0, 1),
            scenario(2, -5.0, 1.0, 1),
        ]);
        let mut buf = Vec::new();
        write_batch_csv(&mut buf, &outcomes).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,100000,1,1,8378.54,100542.49,542.49,101084.99,"));
        assert!(lines[2].contains("Invalid input: principal"));
    }

    #[test]
    fn test_total_monthly_outflow_skips_failures() {
        let outcomes = ScenarioRunner::new().run_batch(&[
            scenario(1, 120_000.0, 0.0, 1),
            scenario(2, 120_000.0, 0.0, 0),
            scenario(3, 240_000.0, 0.0, 2),
        ]);
        assert_abs_diff_eq!(total_monthly_outflow(&outcomes), 20_000.0);
        assert_eq!(to_fixed_2(total_monthly_outflow(&outcomes)), "20000.00");
    }
}
