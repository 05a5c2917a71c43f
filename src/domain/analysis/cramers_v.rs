//! Cramér's V - Bias-corrected strength of association between two categorical variables.

use super::ChiSquareTest;

/// Computes the bias-corrected Cramér's V (Bergsma, 2013).
///
/// ```text
/// φ²     = χ² / n
/// φ²corr = max(0, φ² - (k-1)(r-1)/(n-1))
/// rcorr  = r - (r-1)²/(n-1)
/// kcorr  = k - (k-1)²/(n-1)
/// V      = sqrt(φ²corr / min(kcorr-1, rcorr-1))
/// ```
///
/// Returns `None` when the correction is undefined: fewer than two
/// respondents, or a non-positive denominator.
pub fn cramers_v(chi_square: f64, n: u64, rows: usize, columns: usize) -> Option<f64> {
    if n < 2 {
        return None;
    }

    let n_minus_one = (n - 1) as f64;
    let r = rows as f64;
    let k = columns as f64;

    let phi2 = chi_square / n as f64;
    let phi2_corrected = (phi2 - (k - 1.0) * (r - 1.0) / n_minus_one).max(0.0);
    let r_corrected = r - (r - 1.0).powi(2) / n_minus_one;
    let k_corrected = k - (k - 1.0).powi(2) / n_minus_one;

    let denominator = (k_corrected - 1.0).min(r_corrected - 1.0);
    if denominator <= 0.0 || !denominator.is_finite() {
        return None;
    }

    Some((phi2_corrected / denominator).sqrt())
}

/// Computes Cramér's V from a finished chi-square test.
pub fn cramers_v_for(test: &ChiSquareTest) -> Option<f64> {
    cramers_v(test.statistic, test.sample_size, test.shape.0, test.shape.1)
}
