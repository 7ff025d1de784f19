//! Two-decimal display formatting

/// Render `value` with exactly two decimals, the way `Number.toFixed(2)` does.
///
/// Rounding works on the exact binary value, so `10.235` (stored just below the
/// midpoint) shows as `10.23`. Only values that sit exactly on a half cent are
/// rounded away from zero. A result that rounds to zero never carries a minus sign.
pub fn to_fixed_2(value: f64) -> String {
    let magnitude = value.abs();
    let digits = if is_half_cent(magnitude) {
        // magnitude = k / 8 with k odd, so 100 * magnitude = 12.5 * k
        let eighths = (magnitude * 8.0) as u64;
        let cents = (eighths * 25 + 1) / 2;
        format!("{}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{:.2}", magnitude)
    };

    let is_zero = digits.bytes().all(|b| matches!(b, b'0' | b'.'));
    if value.is_sign_negative() && !is_zero {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// True when `magnitude` lies exactly halfway between two cents
fn is_half_cent(magnitude: f64) -> bool {
    // past 2^50 a double cannot hold a fraction of 1/8
    if !(magnitude < (1u64 << 50) as f64) {
        return false;
    }
    let eighths = magnitude * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, to_fixed_2(value))
}
