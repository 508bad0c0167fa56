//! Numeric helpers shared by the calculators and the ranking table.

use ndarray::ArrayView1;

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Arithmetic mean, or `None` for an empty slice.
///
/// `None` stands in for the not-a-number an empty mean would otherwise
/// produce, so callers decide explicitly what "no observations" means.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    ArrayView1::from(values).mean()
}

/// Round to `decimals` places, halves away from zero.
///
/// Non-finite inputs are returned unchanged.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::round_to;
///
/// assert_eq!(round_to(0.123_56, 3), 0.124);
/// assert_eq!(round_to(-1.005_1, 2), -1.01);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Z-score standardization result containing computed statistics.
#[derive(Debug, Clone, Copy)]
pub struct StandardizeResult {
    /// The computed mean of the finite input values.
    pub mean: f64,
    /// The computed sample standard deviation (N-1 denominator).
    pub std: f64,
    /// Whether the standardization was applied (false if variance was too low).
    pub applied: bool,
}

/// Standardize optional values to z-scores (mean=0, std=1).
///
/// Missing and non-finite entries are excluded from the statistics and stay
/// `None` in the output. If fewer than two values are present, or the spread
/// is below [`MIN_STD_THRESHOLD`], present values map to `0.0`.
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::standardize;
///
/// let (z, result) = standardize(&[Some(1.0), None, Some(3.0)]);
/// assert!(result.applied);
/// assert_eq!(z[1], None);
/// assert!(z[0].unwrap() < 0.0 && z[2].unwrap() > 0.0);
/// ```
pub fn standardize(values: &[Option<f64>]) -> (Vec<Option<f64>>, StandardizeResult) {
    let finite: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| x.is_finite())
        .collect();

    let Some(mean) = mean(&finite) else {
        return (
            vec![None; values.len()],
            StandardizeResult {
                mean: f64::NAN,
                std: f64::NAN,
                applied: false,
            },
        );
    };

    // Sample variance with N-1 denominator (Bessel's correction)
    let n = finite.len();
    let std = if n > 1 {
        ArrayView1::from(finite.as_slice()).std(1.0)
    } else {
        0.0
    };
    let applied = std > MIN_STD_THRESHOLD;

    let standardized = values
        .iter()
        .map(|v| {
            v.filter(|x| x.is_finite())
                .map(|x| if applied { (x - mean) / std } else { 0.0 })
        })
        .collect();

    (standardized, StandardizeResult { mean, std, applied })
}
