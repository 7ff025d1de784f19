//! Month-by-month amortization schedule
//!
//! Splits each level installment into its interest and principal portions and rolls
//! the outstanding balance forward. The EMI figures themselves come from
//! [`compute_emi`](super::compute_emi); this is the detailed view behind them.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EmiError, EmiResult};
use crate::loan::LoanParameters;
use super::engine::compute_emi;
use super::result::ensure_series_len;

/// A single row of the schedule for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Complete schedule for a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub params: LoanParameters,
    pub monthly_payment: f64,
    pub rows: Vec<ScheduleRow>,
}

/// Totals over the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

impl AmortizationSchedule {
    /// Build the schedule. When `start_date` is given, month `k` falls due
    /// `k - 1` calendar months after it.
    pub fn build(params: &LoanParameters, start_date: Option<NaiveDate>) -> EmiResult<Self> {
        let emi = compute_emi(params)?;
        ensure_series_len(emi.total_months)?;
        let monthly_rate = params.monthly_rate();
        let mut balance = params.principal;
        let mut rows = Vec::with_capacity(emi.total_months as usize);

        for month in 1..=emi.total_months {
            let due_date = match start_date {
                Some(start) => Some(start.checked_add_months(Months::new(month - 1)).ok_or_else(|| {
                    EmiError::invalid("start_date", format!("due date of month {} is out of range", month))
                })?),
                None => None,
            };

            let opening_balance = balance;
            let interest = opening_balance * monthly_rate;
            let (payment, principal) = if month == emi.total_months {
                // last installment clears whatever floating residue is left
                (opening_balance + interest, opening_balance)
            } else {
                (emi.monthly_payment, emi.monthly_payment - interest)
            };
            balance = opening_balance - principal;

            rows.push(ScheduleRow {
                month,
                due_date,
                opening_balance,
                payment,
                interest,
                principal,
                closing_balance: balance,
            });
        }

        Ok(Self {
            params: params.clone(),
            monthly_payment: emi.monthly_payment,
            rows,
        })
    }

    pub fn summary(&self) -> ScheduleSummary {
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_principal: f64 = self.rows.iter().map(|r| r.principal).sum();

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            total_paid,
            total_interest,
            total_principal,
        }
    }

    /// Outstanding balance after `month` installments
    pub fn balance_after(&self, month: u32) -> Option<f64> {
        match month {
            0 => Some(self.params.principal),
            m => self.rows.get(m as usize - 1).map(|r| r.closing_balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_schedule_clears_balance() {
        let params = LoanParameters::new(6_600_000.0, 15.0, 10);
        let schedule = AmortizationSchedule::build(&params, None).unwrap();

        assert_eq!(schedule.rows.len(), 120);
        assert_eq!(schedule.rows.last().unwrap().closing_balance, 0.0);
        assert_abs_diff_eq!(schedule.rows.last().unwrap().payment, schedule.monthly_payment, epsilon = 1e-3);
    }

    #[test]
    fn test_schedule_interest_matches_engine() {
        let params = LoanParameters::new(500_000.0, 8.5, 20);
        let schedule = AmortizationSchedule::build(&params, None).unwrap();
        let emi = compute_emi(&params).unwrap();
        let summary = schedule.summary();

        assert_abs_diff_eq!(summary.total_principal, 500_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.total_interest, emi.total_interest_paid, epsilon = 1e-6 * 500_000.0);
        assert_abs_diff_eq!(summary.total_paid, emi.total_principal_paid, epsilon = 1e-6 * 500_000.0);
    }

    #[test]
    fn test_interest_share_declines() {
        let schedule = AmortizationSchedule::build(&LoanParameters::new(1_000_000.0, 12.0, 5), None).unwrap();
        let first = &schedule.rows[0];
        let last = &schedule.rows[59];
        assert_abs_diff_eq!(first.interest, 10_000.0, epsilon = 1e-9);
        assert!(last.interest < first.interest);
        assert!(last.principal > first.principal);
    }

    #[test]
    fn test_zero_rate_schedule_is_flat() {
        let schedule = AmortizationSchedule::build(&LoanParameters::new(120_000.0, 0.0, 1), None).unwrap();
        assert!(schedule.rows.iter().all(|r| r.interest == 0.0));
        assert!(schedule.rows.iter().all(|r| r.payment == 10_000.0));
        assert_eq!(schedule.balance_after(6), Some(60_000.0));
        assert_eq!(schedule.balance_after(0), Some(120_000.0));
        assert_eq!(schedule.balance_after(13), None);
    }

    #[test]
    fn test_due_dates_follow_calendar_months() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let schedule = AmortizationSchedule::build(&LoanParameters::new(100_000.0, 1.0, 1), Some(start)).unwrap();

        assert_eq!(schedule.rows[0].due_date, Some(start));
        // clamped to month end
        assert_eq!(schedule.rows[1].due_date, NaiveDate::from_ymd_opt(2026, 2, 28));
        assert_eq!(schedule.rows[11].due_date, NaiveDate::from_ymd_opt(2026, 12, 31));
    }

    #[test]
    fn test_invalid_params_propagate() {
        assert!(AmortizationSchedule::build(&LoanParameters::new(100_000.0, 1.0, 0), None).is_err());
    }

    #[test]
    fn test_oversized_schedule_is_refused() {
        let params = LoanParameters::new(1e6, 0.0, 300_000_000);
        assert!(compute_emi(&params).is_ok());
        let err = AmortizationSchedule::build(&params, None).unwrap_err();
        assert!(matches!(err, EmiError::InvalidInput { .. }));
    }
}
