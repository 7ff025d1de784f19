//! Loan inputs: parameters, slider bounds, and scenario loading

mod params;
mod slider;
pub mod loader;

pub use params::{LoanParameters, MAX_SERIES_MONTHS, MONTHS_PER_YEAR};
pub use slider::{SliderBounds, SliderField, parse_integer_prefix};
pub use loader::{LoanScenario, load_scenarios, load_scenarios_from_reader};
