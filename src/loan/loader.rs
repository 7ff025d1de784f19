//! Load loan scenarios from CSV
//!
//! Expected header: `ScenarioID,LoanAmount,InterestRate,LoanDuration` with optional
//! `CourseDuration` and `GracePeriod` columns.

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::LoanParameters;
use crate::error::{EmiError, EmiResult};

/// A loan to evaluate, tagged with a caller-supplied identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub scenario_id: u32,
    pub params: LoanParameters,
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "LoanAmount")]
    loan_amount: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "LoanDuration")]
    loan_duration: i64,
    #[serde(rename = "CourseDuration", default)]
    course_duration: Option<u32>,
    #[serde(rename = "GracePeriod", default)]
    grace_period: Option<u32>,
}

impl CsvRow {
    fn into_scenario(self) -> EmiResult<LoanScenario> {
        let duration_years = u32::try_from(self.loan_duration).map_err(|_| {
            EmiError::invalid(
                "LoanDuration",
                format!("scenario {}: {} is not a whole number of years", self.scenario_id, self.loan_duration),
            )
        })?;

        Ok(LoanScenario {
            scenario_id: self.scenario_id,
            params: LoanParameters {
                principal: self.loan_amount,
                annual_rate_percent: self.interest_rate,
                duration_years,
                course_duration_months: self.course_duration,
                grace_period_months: self.grace_period,
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> EmiResult<Vec<LoanScenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g. stdin, a string buffer)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> EmiResult<Vec<LoanScenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> EmiResult<Vec<LoanScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    log::debug!("loaded {} loan scenarios", scenarios.len());
    Ok(scenarios)
}
