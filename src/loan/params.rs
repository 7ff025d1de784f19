//! Loan parameter record fed to the EMI engine

use serde::{Deserialize, Serialize};

use crate::error::{EmiError, EmiResult};

/// Months per year used when converting the duration
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest loan, in months, for which per-month series are materialised
pub const MAX_SERIES_MONTHS: u32 = 100 * MONTHS_PER_YEAR;

/// Inputs to a single EMI computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: f64,

    /// Annual interest rate as a percentage (e.g. 8.5 for 8.5%)
    pub annual_rate_percent: f64,

    /// Loan duration in whole years
    pub duration_years: u32,

    /// Length of the course being financed. Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_duration_months: Option<u32>,

    /// Grace period before repayment starts. Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_period_months: Option<u32>,
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, duration_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            duration_years,
            course_duration_months: None,
            grace_period_months: None,
        }
    }

    /// Attach the informational course duration and grace period
    pub fn with_study_terms(mut self, course_duration_months: u32, grace_period_months: u32) -> Self {
        self.course_duration_months = Some(course_duration_months);
        self.grace_period_months = Some(grace_period_months);
        self
    }

    /// Number of monthly installments
    pub fn total_months(&self) -> EmiResult<u32> {
        self.duration_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
            EmiError::invalid(
                "duration_years",
                format!("{} years is too many monthly installments to count", self.duration_years),
            )
        })
    }

    /// Periodic (monthly) rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / (12.0 * 100.0)
    }

    /// Reject inputs that would make the formula degenerate
    pub fn validate(&self) -> EmiResult<()> {
        if !self.principal.is_finite() {
            return Err(EmiError::invalid("principal", "must be a finite number"));
        }
        if self.principal <= 0.0 {
            return Err(EmiError::invalid("principal", "must be greater than zero"));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(EmiError::invalid("annual_rate_percent", "must be a finite number"));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(EmiError::invalid("annual_rate_percent", "must not be negative"));
        }
        if self.total_months()? == 0 {
            return Err(EmiError::ZeroDuration);
        }
        Ok(())
    }
}
