//! Quality threshold configuration.
//!
//! Each analyzer instance owns its own threshold snapshot: defaults merged
//! shallowly with caller overrides. There is no process-wide threshold state.

use serde::{Deserialize, Serialize};

/// Banded threshold values for one metric, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBands {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl ThresholdBands {
    pub fn new(excellent: f64, good: f64, fair: f64, poor: f64) -> Self {
        Self {
            excellent,
            good,
            fair,
            poor,
        }
    }
}

/// Configurable quality thresholds, banded per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    pub cyclomatic_complexity: ThresholdBands,
    pub cognitive_complexity: ThresholdBands,
    pub maintainability_index: ThresholdBands,
    pub technical_debt_ratio: ThresholdBands,
    pub duplication_ratio: ThresholdBands,
    pub test_coverage: ThresholdBands,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            cyclomatic_complexity: ThresholdBands::new(5.0, 10.0, 20.0, 30.0),
            cognitive_complexity: ThresholdBands::new(7.0, 15.0, 25.0, 40.0),
            maintainability_index: ThresholdBands::new(85.0, 70.0, 50.0, 30.0),
            technical_debt_ratio: ThresholdBands::new(5.0, 10.0, 20.0, 30.0),
            duplication_ratio: ThresholdBands::new(3.0, 5.0, 10.0, 20.0),
            test_coverage: ThresholdBands::new(90.0, 80.0, 60.0, 40.0),
        }
    }
}

/// Partial threshold update; `None` fields keep the current bands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub cyclomatic_complexity: Option<ThresholdBands>,
    pub cognitive_complexity: Option<ThresholdBands>,
    pub maintainability_index: Option<ThresholdBands>,
    pub technical_debt_ratio: Option<ThresholdBands>,
    pub duplication_ratio: Option<ThresholdBands>,
    pub test_coverage: Option<ThresholdBands>,
}

impl QualityThresholds {
    /// Shallow merge: each override replaces the whole band for that metric.
    pub fn merge(&mut self, overrides: ThresholdOverrides) {
        if let Some(bands) = overrides.cyclomatic_complexity {
            self.cyclomatic_complexity = bands;
        }
        if let Some(bands) = overrides.cognitive_complexity {
            self.cognitive_complexity = bands;
        }
        if let Some(bands) = overrides.maintainability_index {
            self.maintainability_index = bands;
        }
        if let Some(bands) = overrides.technical_debt_ratio {
            self.technical_debt_ratio = bands;
        }
        if let Some(bands) = overrides.duplication_ratio {
            self.duplication_ratio = bands;
        }
        if let Some(bands) = overrides.test_coverage {
            self.test_coverage = bands;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_only_supplied_bands() {
        let mut thresholds = QualityThresholds::default();
        thresholds.merge(ThresholdOverrides {
            cyclomatic_complexity: Some(ThresholdBands::new(3.0, 6.0, 12.0, 24.0)),
            ..Default::default()
        });

        assert_eq!(thresholds.cyclomatic_complexity.excellent, 3.0);
        assert_eq!(thresholds.cyclomatic_complexity.poor, 24.0);
        // untouched bands keep their defaults
        assert_eq!(thresholds.test_coverage, QualityThresholds::default().test_coverage);
    }
}
