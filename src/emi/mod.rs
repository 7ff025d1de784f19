//! EMI engine: installment, totals, chart series and amortization schedule

mod engine;
mod result;
mod schedule;
pub mod format;
pub mod output;

pub use engine::{compute_emi, level_payment};
pub use result::{AmortizationResult, ChartPoint, DisplayedResult};
pub use schedule::{AmortizationSchedule, ScheduleRow, ScheduleSummary};
