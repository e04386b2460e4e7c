//! Numeric helpers shared by every scoring formula.
//!
//! Rounding and clamping live here so that downstream equality checks see one
//! consistent behavior instead of ad-hoc math scattered through the analyzers.

/// Map `value` from `[min, max]` onto a 0-100 scale, clamped at both ends.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min) * 100.0).clamp(0.0, 100.0)
}

/// Like [`normalize`], but inverted: `min` maps to 100 and `max` to 0.
/// Used for metrics where lower raw values are better (complexity, debt ratio).
pub fn normalize_inverse(value: f64, min: f64, max: f64) -> f64 {
    100.0 - normalize(value, min, max)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_to_band() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 50.0);
        assert_eq!(normalize(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(25.0, 0.0, 10.0), 100.0);
    }

    #[test]
    fn normalize_inverse_flips_direction() {
        assert_eq!(normalize_inverse(0.0, 0.0, 20.0), 100.0);
        assert_eq!(normalize_inverse(20.0, 0.0, 20.0), 0.0);
        assert_eq!(normalize_inverse(10.0, 0.0, 20.0), 50.0);
    }

    #[test]
    fn degenerate_range_yields_zero() {
        assert_eq!(normalize(5.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn round2_behavior() {
        assert_eq!(round2(72.456), 72.46);
        assert_eq!(round2(72.454), 72.45);
    }
}
