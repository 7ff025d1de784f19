//! Closed-form EMI computation

use crate::error::{EmiError, EmiResult};
use crate::loan::LoanParameters;
use super::result::AmortizationResult;

/// Level installment that repays `principal` over `months` periods at `monthly_rate`.
///
/// EMI = P x r x (1 + r)^n / ((1 + r)^n - 1), or P / n when r is zero.
/// Callers must ensure `months > 0`.
pub fn level_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return principal / n;
    }
    // (1 + r)^n - 1 via ln_1p/exp_m1 so tiny rates keep their precision
    let growth_minus_1 = (n * monthly_rate.ln_1p()).exp_m1();
    let growth = growth_minus_1 + 1.0;
    principal * monthly_rate * growth / growth_minus_1
}

/// Compute the monthly installment and the reported totals for `params`
pub fn compute_emi(params: &LoanParameters) -> EmiResult<AmortizationResult> {
    params.validate()?;

    let total_months = params.total_months()?;
    let monthly_payment = level_payment(params.principal, params.monthly_rate(), total_months);

    if !monthly_payment.is_finite() || monthly_payment <= 0.0 {
        return Err(EmiError::NonFiniteResult {
            context: format!(
                "monthly payment for principal {} at {}% over {} months",
                params.principal, params.annual_rate_percent, total_months
            ),
        });
    }

    let total_principal_paid = monthly_payment * f64::from(total_months);
    let total_interest_paid = total_principal_paid - params.principal;
    let total_amount_paid = total_principal_paid + total_interest_paid;

    if !total_amount_paid.is_finite() {
        return Err(EmiError::NonFiniteResult {
            context: "total amount paid".to_string(),
        });
    }

    log::debug!(
        "EMI {:.2} over {} months (P={}, R={}%)",
        monthly_payment,
        total_months,
        params.principal,
        params.annual_rate_percent
    );

    Ok(AmortizationResult {
        monthly_payment,
        total_principal_paid,
        total_interest_paid,
        total_amount_paid,
        total_months,
    })
}
