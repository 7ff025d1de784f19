//! Output structures for an EMI computation

use serde::{Deserialize, Serialize};

use super::format::{format_currency, to_fixed_2};
use crate::error::{EmiError, EmiResult};
use crate::loan::MAX_SERIES_MONTHS;

/// Figures derived from one set of loan parameters
///
/// `total_principal_paid` is the sum of all installments (EMI x months), and
/// `total_amount_paid` adds the interest on top of that again. Both follow the
/// calculator's published figures rather than a textbook principal/interest split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: f64,
    pub total_principal_paid: f64,
    pub total_interest_paid: f64,
    pub total_amount_paid: f64,
    pub total_months: u32,
}

/// A single point of the repayment chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// 1-based month index
    pub month: u32,
    /// Installment due that month
    pub emi: f64,
}

/// The four figures rounded to two decimals, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedResult {
    pub principal_amount: String,
    pub total_interest: String,
    pub total_amount: String,
    pub monthly_emi: String,
}

impl AmortizationResult {
    /// Chart series, one point per month, regenerated on every call
    pub fn chart_points(&self) -> impl ExactSizeIterator<Item = ChartPoint> + '_ {
        (0..self.total_months).map(move |i| ChartPoint {
            month: i + 1,
            emi: self.monthly_payment,
        })
    }

    /// Collected chart series. Refuses loans longer than [`MAX_SERIES_MONTHS`].
    pub fn chart_series(&self) -> EmiResult<Vec<ChartPoint>> {
        ensure_series_len(self.total_months)?;
        Ok(self.chart_points().collect())
    }

    /// Round every figure for display
    pub fn displayed(&self) -> DisplayedResult {
        DisplayedResult {
            principal_amount: to_fixed_2(self.total_principal_paid),
            total_interest: to_fixed_2(self.total_interest_paid),
            total_amount: to_fixed_2(self.total_amount_paid),
            monthly_emi: to_fixed_2(self.monthly_payment),
        }
    }

    /// Labelled, currency-formatted lines in display order
    pub fn summary_lines(&self, currency_symbol: &str) -> Vec<(&'static str, String)> {
        vec![
            ("Principal Amount", format_currency(currency_symbol, self.total_principal_paid)),
            ("Total Interest", format_currency(currency_symbol, self.total_interest_paid)),
            ("Total Amount", format_currency(currency_symbol, self.total_amount_paid)),
            ("Monthly EMI", format_currency(currency_symbol, self.monthly_payment)),
        ]
    }
}

/// Reject month counts too large to hold one entry per month
pub(crate) fn ensure_series_len(total_months: u32) -> EmiResult<()> {
    if total_months > MAX_SERIES_MONTHS {
        return Err(EmiError::invalid(
            "duration_years",
            format!(
                "{} months exceeds the {} month limit for per-month series",
                total_months, MAX_SERIES_MONTHS
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AmortizationResult {
        AmortizationResult {
            monthly_payment: 8378.54115558053,
            total_principal_paid: 100542.49386696635,
            total_interest_paid: 542.4938669663534,
            total_amount_paid: 101084.9877339327,
            total_months: 12,
        }
    }

    #[test]
    fn test_chart_points_is_exact_size() {
        let result = sample();
        let points = result.chart_points();
        assert_eq!(points.len(), 12);
        let series: Vec<_> = points.collect();
        assert_eq!(series.first().map(|p| p.month), Some(1));
        assert_eq!(series.last().map(|p| p.month), Some(12));
    }

    #[test]
    fn test_chart_series_refuses_oversized_loans() {
        let mut result = sample();
        result.total_months = MAX_SERIES_MONTHS;
        assert_eq!(result.chart_series().unwrap().len(), MAX_SERIES_MONTHS as usize);

        result.total_months = 4_000_000_000;
        let err = result.chart_series().unwrap_err();
        assert!(matches!(err, EmiError::InvalidInput { .. }));
        // the lazy iterator stays available
        assert_eq!(result.chart_points().len(), 4_000_000_000);
    }

    #[test]
    fn test_displayed_rounds_to_cents() {
        let shown = sample().displayed();
        assert_eq!(shown.monthly_emi, "8378.54");
        assert_eq!(shown.principal_amount, "100542.49");
        assert_eq!(shown.total_interest, "542.49");
        assert_eq!(shown.total_amount, "101084.99");
    }

    #[test]
    fn test_summary_lines_order() {
        let lines = sample().summary_lines("₹");
        let labels: Vec<_> = lines.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Principal Amount", "Total Interest", "Total Amount", "Monthly EMI"]);
        assert_eq!(lines[3].1, "₹8378.54");
    }
}
