//! AWS Lambda handler for EMI calculations
//!
//! Accepts the calculator inputs as a JSON event and returns the repayment figures,
//! the display strings and, on request, the chart series and amortization schedule.
//! Invalid inputs produce a response with `error` set rather than a failed invocation.

use chrono::NaiveDate;
use emi_calculator::emi::{DisplayedResult, ScheduleRow, ScheduleSummary};
use emi_calculator::{
    compute_emi, AmortizationResult, AmortizationSchedule, ChartPoint, EmiError, EmiResult,
    LoanParameters, SliderField,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct EmiRequest {
    /// Loan amount (default: 100000)
    #[serde(default = "default_loan_amount")]
    pub loan_amount: f64,

    /// Annual interest rate in percent (default: 1)
    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,

    /// Loan duration in years (default: 1)
    #[serde(default = "default_loan_duration")]
    pub loan_duration: i64,

    #[serde(default)]
    pub course_duration: Option<u32>,

    #[serde(default)]
    pub grace_period: Option<u32>,

    /// Clamp inputs to the calculator's slider ranges (default: true)
    #[serde(default = "default_true")]
    pub clamp: bool,

    /// Include the per-month chart series (default: true)
    #[serde(default = "default_true")]
    pub include_chart: bool,

    #[serde(default)]
    pub include_schedule: bool,

    /// First due date for the schedule
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_loan_amount() -> f64 { SliderField::LoanAmount.bounds().default as f64 }
fn default_interest_rate() -> f64 { SliderField::InterestRate.bounds().default as f64 }
fn default_loan_duration() -> i64 { SliderField::LoanDuration.bounds().default }
fn default_true() -> bool { true }

/// Output of one calculation
#[derive(Debug, Serialize, Default)]
pub struct EmiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<LoanParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AmortizationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed: Option<DisplayedResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chart: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_summary: Option<ScheduleSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleRow>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmiRequest {
    fn to_params(&self) -> EmiResult<LoanParameters> {
        let (principal, rate, years) = if self.clamp {
            let amount = SliderField::LoanAmount.bounds();
            let rate = SliderField::InterestRate.bounds();
            (
                self.loan_amount.clamp(amount.min as f64, amount.max as f64),
                self.interest_rate.clamp(rate.min as f64, rate.max as f64),
                SliderField::LoanDuration.bounds().clamp(self.loan_duration),
            )
        } else {
            (self.loan_amount, self.interest_rate, self.loan_duration)
        };

        let duration_years = u32::try_from(years).map_err(|_| {
            EmiError::invalid("loan_duration", format!("{} is not a valid number of years", years))
        })?;

        Ok(LoanParameters {
            principal,
            annual_rate_percent: rate,
            duration_years,
            course_duration_months: self.course_duration,
            grace_period_months: self.grace_period,
        })
    }
}

fn calculate(request: &EmiRequest, response: &mut EmiResponse) -> EmiResult<()> {
    let params = request.to_params()?;
    let result = compute_emi(&params)?;

    if request.include_chart {
        response.chart = result.chart_series()?;
    }
    if request.include_schedule {
        let schedule = AmortizationSchedule::build(&params, request.start_date)?;
        response.schedule_summary = Some(schedule.summary());
        response.schedule = schedule.rows;
    }

    response.displayed = Some(result.displayed());
    response.result = Some(result);
    response.params = Some(params);
    Ok(())
}

/// Lambda handler function
async fn handler(event: LambdaEvent<EmiRequest>) -> Result<EmiResponse, Error> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();
    log::debug!("request: {:?}", request);

    let mut response = EmiResponse::default();
    if let Err(e) = calculate(&request, &mut response) {
        log::warn!("calculation failed: {}", e);
        response = EmiResponse {
            error: Some(e.to_string()),
            ..Default::default()
        };
    }

    response.execution_time_ms = start.elapsed().as_millis() as u64;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
