//! Statistical kernel for trend analysis.
//!
//! Series are treated as evenly spaced observations indexed 0..n; dates only
//! matter for ordering, which the caller has already done.

/// Arithmetic mean; 0 for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for series shorter than 2.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary-least-squares fit of value against index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fit `values[i] ~ slope * i + intercept`.
pub fn linear_regression(values: &[f64]) -> Regression {
    let n = values.len();
    if n < 2 {
        return Regression {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            r_squared: 0.0,
        };
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = mean(values);

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    for (i, value) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = value - mean_y;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    let slope = if ss_xx > 0.0 { ss_xy / ss_xx } else { 0.0 };
    let intercept = mean_y - slope * mean_x;
    let r_squared = if ss_yy > 0.0 {
        (ss_xy * ss_xy) / (ss_xx * ss_yy)
    } else {
        // a perfectly flat series is perfectly predicted by its mean
        1.0
    };

    Regression {
        slope,
        intercept,
        r_squared,
    }
}

/// OLS slope of value against index; convenience over [`linear_regression`].
pub fn ols_slope(values: &[f64]) -> f64 {
    linear_regression(values).slope
}

/// Percentage change from the first to the last value of the window.
/// A zero baseline is defined as no change rather than a division error.
pub fn percent_change(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first.abs() > f64::EPSILON => {
            (last - first) / first * 100.0
        }
        _ => 0.0,
    }
}

/// Mean-centered autocorrelation at the given lag, in [-1, 1].
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag == 0 || lag >= n {
        return 0.0;
    }
    let m = mean(values);
    let denominator: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if denominator <= f64::EPSILON {
        return 0.0;
    }
    let numerator: f64 = (0..n - lag)
        .map(|i| (values[i] - m) * (values[i + lag] - m))
        .sum();
    numerator / denominator
}

/// Minimum points before cycle detection is attempted.
const CYCLE_MIN_POINTS: usize = 10;
/// Autocorrelation magnitude that declares a cycle.
const CYCLE_THRESHOLD: f64 = 0.3;

/// Heuristic periodicity check over lags `2..=min(n/4, 30)`.
pub fn detect_cycle(values: &[f64]) -> bool {
    let n = values.len();
    if n < CYCLE_MIN_POINTS {
        return false;
    }
    let max_lag = (n / 4).min(30);
    (2..=max_lag)
        .map(|lag| autocorrelation(values, lag).abs())
        .fold(0.0_f64, f64::max)
        > CYCLE_THRESHOLD
}

/// Z-score threshold beyond which a point is an outlier.
const OUTLIER_Z_SCORE: f64 = 2.5;

/// Indexes and deviations of points more than 2.5 standard deviations from
/// the window mean.
pub fn z_score_outliers(values: &[f64]) -> Vec<(usize, f64)> {
    let std_dev = population_std_dev(values);
    if std_dev <= f64::EPSILON {
        return Vec::new();
    }
    let m = mean(values);
    values
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| {
            let deviation = (v - m).abs() / std_dev;
            (deviation > OUTLIER_Z_SCORE).then_some((i, deviation))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn regression_recovers_a_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = linear_regression(&values);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 3.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let values = [5.0; 12];
        let fit = linear_regression(&values);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn percent_change_handles_zero_baseline() {
        assert_eq!(percent_change(&[0.0, 10.0]), 0.0);
        assert!((percent_change(&[50.0, 75.0]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn alternating_series_has_strong_negative_lag1_autocorrelation() {
        let values: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 90.0 } else { 50.0 })
            .collect();
        assert!(autocorrelation(&values, 1) < -0.5);
        // lag-2 correlation is strongly positive: the cycle detector fires
        assert!(detect_cycle(&values));
    }

    #[test]
    fn outliers_need_extreme_deviation() {
        let mut values = vec![50.0; 29];
        values.push(95.0);
        let outliers = z_score_outliers(&values);
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].0, 29);
        assert!(outliers[0].1 > 2.5);

        assert!(z_score_outliers(&[50.0, 51.0, 49.0, 50.0]).is_empty());
    }

    #[test]
    fn short_series_never_cycles() {
        let values = [1.0, 9.0, 1.0, 9.0, 1.0];
        assert!(!detect_cycle(&values));
    }
}
