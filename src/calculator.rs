//! Interactive calculator state
//!
//! Holds the current slider values and the most recent result. Every input
//! change is parsed, clamped to the slider's range, and the EMI is recomputed
//! immediately, so `result()` always reflects the current inputs.

use serde::Serialize;

use crate::emi::{compute_emi, AmortizationResult, ChartPoint};
use crate::error::EmiResult;
use crate::loan::{LoanParameters, SliderField};

/// Current value of every slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliderValues {
    pub loan_amount: i64,
    pub interest_rate: i64,
    pub loan_duration: i64,
    pub course_duration: i64,
    pub grace_period: i64,
}

impl Default for SliderValues {
    fn default() -> Self {
        Self {
            loan_amount: SliderField::LoanAmount.bounds().default,
            interest_rate: SliderField::InterestRate.bounds().default,
            loan_duration: SliderField::LoanDuration.bounds().default,
            course_duration: SliderField::CourseDuration.bounds().default,
            grace_period: SliderField::GracePeriod.bounds().default,
        }
    }
}

impl SliderValues {
    pub fn get(&self, field: SliderField) -> i64 {
        match field {
            SliderField::LoanAmount => self.loan_amount,
            SliderField::InterestRate => self.interest_rate,
            SliderField::LoanDuration => self.loan_duration,
            SliderField::CourseDuration => self.course_duration,
            SliderField::GracePeriod => self.grace_period,
        }
    }

    fn set(&mut self, field: SliderField, value: i64) {
        match field {
            SliderField::LoanAmount => self.loan_amount = value,
            SliderField::InterestRate => self.interest_rate = value,
            SliderField::LoanDuration => self.loan_duration = value,
            SliderField::CourseDuration => self.course_duration = value,
            SliderField::GracePeriod => self.grace_period = value,
        }
    }

    /// Engine parameters for the current values. Clamping keeps every field non-negative.
    pub fn to_params(&self) -> LoanParameters {
        LoanParameters {
            principal: self.loan_amount as f64,
            annual_rate_percent: self.interest_rate as f64,
            duration_years: u32::try_from(self.loan_duration).unwrap_or(0),
            course_duration_months: u32::try_from(self.course_duration).ok(),
            grace_period_months: u32::try_from(self.grace_period).ok(),
        }
    }
}

/// Calculator that recomputes eagerly on every input change
#[derive(Debug, Clone)]
pub struct LoanCalculator {
    values: SliderValues,
    result: AmortizationResult,
}

impl LoanCalculator {
    /// Start from the slider defaults
    pub fn new() -> EmiResult<Self> {
        Self::with_values(SliderValues::default())
    }

    /// Start from explicit values, clamping each into its slider range
    pub fn with_values(values: SliderValues) -> EmiResult<Self> {
        let mut clamped = values;
        for field in SliderField::ALL {
            clamped.set(field, field.bounds().clamp(values.get(field)));
        }
        let result = compute_emi(&clamped.to_params())?;
        Ok(Self { values: clamped, result })
    }

    /// Apply raw slider input. On a parse failure the previous state is kept.
    pub fn set_input(&mut self, field: SliderField, raw: &str) -> EmiResult<&AmortizationResult> {
        let value = field.parse_clamped(raw)?;
        self.set_value(field, value)
    }

    /// Apply an already-parsed value, clamping it to the slider range
    pub fn set_value(&mut self, field: SliderField, value: i64) -> EmiResult<&AmortizationResult> {
        let mut next = self.values;
        next.set(field, field.bounds().clamp(value));
        let result = compute_emi(&next.to_params())?;

        log::debug!("{} set to {}, EMI now {:.2}", field.label(), next.get(field), result.monthly_payment);
        self.values = next;
        self.result = result;
        Ok(&self.result)
    }

    pub fn values(&self) -> &SliderValues {
        &self.values
    }

    pub fn params(&self) -> LoanParameters {
        self.values.to_params()
    }

    pub fn result(&self) -> &AmortizationResult {
        &self.result
    }

    pub fn chart(&self) -> EmiResult<Vec<ChartPoint>> {
        self.result.chart_series()
    }
}
