//! Percentage math for comparing two profiles.
//!
//! Handles the edge cases like division by zero so callers never see
//! NaN or infinity.

/// Change relative to a baseline, in percent
///
/// # Arguments
/// * `change` - Target minus baseline
/// * `baseline` - Baseline value
///
/// # Returns
/// The percentage change, or 0.0 when the baseline is zero
pub fn safe_percentage(change: i64, baseline: u64) -> f64 {
    if baseline == 0 {
        0.0
    } else {
        (change as f64 / baseline as f64) * 100.0
    }
}

/// Share of `part` in `whole`, in percent rounded to two decimals
pub fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    ratio_to_percent(part as f64 / whole as f64)
}

/// `0.123456` becomes `12.35`
pub fn ratio_to_percent(ratio: f64) -> f64 {
    (10000.0 * ratio).round() / 100.0
}

/// Relative change between two percentages: `(right - left) / left * 100`
///
/// Returns 0.0 when `left` is zero.
pub fn diff_percent(left: f64, right: f64) -> f64 {
    if left == 0.0 {
        return 0.0;
    }
    (right - left) / left * 100.0
}
