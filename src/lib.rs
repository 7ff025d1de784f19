//! EMI Calculator - loan repayment engine
//!
//! This library provides:
//! - Equated monthly installment (EMI) and repayment totals for a loan
//! - Per-month chart series and a detailed amortization schedule
//! - Slider-style input parsing and clamping with eager recomputation
//! - A persisted dark/light theme preference
//! - Parallel batch evaluation of loan scenarios

pub mod error;
pub mod config;
pub mod loan;
pub mod emi;
pub mod calculator;
pub mod preferences;
pub mod scenario;

// Re-export commonly used types
pub use error::{EmiError, EmiResult};
pub use loan::{LoanParameters, LoanScenario, SliderField};
pub use emi::{compute_emi, AmortizationResult, AmortizationSchedule, ChartPoint};
pub use calculator::LoanCalculator;
pub use preferences::{ThemeMode, ThemePreference};
pub use scenario::ScenarioRunner;
