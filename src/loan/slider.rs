//! Slider definitions and the parse/clamp rules applied at the input boundary

use serde::{Deserialize, Serialize};

use crate::error::{EmiError, EmiResult};

/// One of the calculator's input sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliderField {
    LoanAmount,
    InterestRate,
    LoanDuration,
    CourseDuration,
    GracePeriod,
}

/// Inclusive range and starting value of a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl SliderBounds {
    /// Clamp a parsed value into `[min, max]`
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl SliderField {
    pub const ALL: [SliderField; 5] = [
        SliderField::LoanAmount,
        SliderField::InterestRate,
        SliderField::LoanDuration,
        SliderField::CourseDuration,
        SliderField::GracePeriod,
    ];

    /// Label shown next to the slider
    pub fn label(&self) -> &'static str {
        match self {
            SliderField::LoanAmount => "Loan Amount",
            SliderField::InterestRate => "Interest Rate",
            SliderField::LoanDuration => "Loan Duration",
            SliderField::CourseDuration => "Course Duration",
            SliderField::GracePeriod => "Grace Period",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    pub fn bounds(&self) -> SliderBounds {
        match self {
            SliderField::LoanAmount => SliderBounds { min: 100_000, max: 10_000_000, default: 100_000 },
            SliderField::InterestRate => SliderBounds { min: 1, max: 30, default: 1 },
            SliderField::LoanDuration => SliderBounds { min: 1, max: 30, default: 1 },
            SliderField::CourseDuration => SliderBounds { min: 0, max: 30, default: 0 },
            SliderField::GracePeriod => SliderBounds { min: 0, max: 24, default: 0 },
        }
    }

    /// Whether the field feeds the EMI formula
    pub fn drives_formula(&self) -> bool {
        matches!(
            self,
            SliderField::LoanAmount | SliderField::InterestRate | SliderField::LoanDuration
        )
    }

    /// Parse raw input and clamp it to this slider's range
    pub fn parse_clamped(&self, raw: &str) -> EmiResult<i64> {
        let value = parse_integer_prefix(raw).ok_or_else(|| EmiError::NotANumber {
            field: self.label().to_string(),
            raw: raw.to_string(),
        })?;
        let bounds = self.bounds();
        let clamped = bounds.clamp(value);
        if clamped != value {
            log::warn!(
                "{} value {} outside [{}, {}], clamped to {}",
                self.label(),
                value,
                bounds.min,
                bounds.max,
                clamped
            );
        }
        Ok(clamped)
    }
}

/// Parse the leading base-10 integer of `raw`.
///
/// Leading whitespace is skipped, one optional sign is accepted, and parsing stops
/// at the first non-digit, so `"12.9"` gives 12 and `"7 years"` gives 7. Returns
/// `None` when no digit follows. Values beyond `i64` saturate.
pub fn parse_integer_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}
