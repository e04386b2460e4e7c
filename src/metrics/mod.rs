//! Metric extraction: raw source text to a [`QualityMetrics`] record.

pub mod complexity;
pub mod halstead;
pub mod style;

use crate::config::{QualityThresholds, ThresholdOverrides};
use crate::core::normalize::{normalize_inverse, round2};
use crate::core::{QualityGrade, QualityMetrics, TrendDirection};
use crate::patterns;

/// Dead band, in points, before a score delta counts as a trend.
const TREND_DEAD_BAND: f64 = 2.0;

/// Turns source text plus a language tag into a flat [`QualityMetrics`]
/// record. Total over its input domain: malformed or empty text produces a
/// degenerate-but-defined result, never an error.
#[derive(Debug, Clone, Default)]
pub struct MetricExtractor {
    thresholds: QualityThresholds,
}

impl MetricExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    /// Current threshold snapshot for this extractor instance.
    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Shallow-merge caller overrides into this instance's thresholds.
    pub fn update_thresholds(&mut self, overrides: ThresholdOverrides) {
        self.thresholds.merge(overrides);
    }

    /// Compute all metrics for one source unit.
    ///
    /// `previous` biases `quality_trend` only; it never changes any measured
    /// value.
    pub fn calculate(
        &self,
        code: &str,
        language: &str,
        path: &str,
        previous: Option<&QualityMetrics>,
    ) -> QualityMetrics {
        log::debug!("extracting metrics for {path} ({language})");

        if code.trim().is_empty() {
            let score = self.empty_input_score();
            return QualityMetrics {
                overall_quality_score: score,
                quality_grade: QualityGrade::from_score(score),
                ..QualityMetrics::default()
            };
        }

        let patterns = patterns::for_language(language);

        let lines_of_code = code.lines().filter(|l| !l.trim().is_empty()).count();
        let comment_lines = style::count_comment_lines(code, patterns);
        let comment_percentage = if lines_of_code > 0 {
            comment_lines as f64 / lines_of_code as f64 * 100.0
        } else {
            0.0
        };

        let complexity = complexity::basic_complexity(code, patterns);
        let cyclomatic_complexity = complexity::cyclomatic_complexity(code, patterns);
        let cognitive_complexity = complexity::cognitive_complexity(code, patterns);
        let halstead = halstead::calculate(code);

        let function_count = patterns.function.find_iter(code).count();
        let avg_function_length = lines_of_code as f64 / function_count.max(1) as f64;
        let maintainability_index =
            maintainability_index(halstead.volume, cyclomatic_complexity, avg_function_length);

        let coupling = patterns.import.find_iter(code).count() as f64;
        let cohesion = (halstead::operand_reuse_ratio(code) * 100.0).round().clamp(0.0, 100.0);
        let depth_of_inheritance = patterns.inheritance.find_iter(code).count().min(10) as u32;

        let line_length = style::line_length_metrics(code, style::LINE_LENGTH_LIMIT);
        let naming_convention_score = style::naming_convention_score(code);
        let comment_quality_score = style::comment_quality_score(comment_percentage);

        let code_smells = style::code_smell_count(code, patterns);
        let technical_debt_ratio = if lines_of_code > 0 {
            (code_smells as f64 / lines_of_code as f64 * 100.0).min(100.0)
        } else {
            0.0
        };
        let duplication_ratio = style::duplication_ratio(code);

        let algorithmic_complexity = complexity::classify_algorithmic_complexity(code, patterns);
        let memory_usage = style::memory_usage_score(code, lines_of_code);

        let security_issues = style::security_issue_count(code);
        let vulnerability_score = style::vulnerability_score(security_issues);

        let (test_coverage, test_quality_score) = style::test_scores(code, patterns);
        let error_handling_score = style::error_handling_score(code);
        let resource_management_score = style::resource_management_score(code);

        let overall_quality_score = overall_score(
            maintainability_index,
            cyclomatic_complexity,
            technical_debt_ratio,
            naming_convention_score,
            comment_quality_score,
            test_coverage,
            vulnerability_score,
            memory_usage,
            &self.thresholds,
        );
        let quality_grade = QualityGrade::from_score(overall_quality_score);
        let quality_trend = match previous {
            Some(prev) => {
                let delta = overall_quality_score - prev.overall_quality_score;
                if delta > TREND_DEAD_BAND {
                    TrendDirection::Improving
                } else if delta < -TREND_DEAD_BAND {
                    TrendDirection::Declining
                } else {
                    TrendDirection::Stable
                }
            }
            None => TrendDirection::Stable,
        };

        QualityMetrics {
            lines_of_code,
            comment_lines,
            comment_percentage,
            complexity,
            cyclomatic_complexity,
            cognitive_complexity,
            halstead,
            maintainability_index,
            coupling,
            cohesion,
            depth_of_inheritance,
            line_length,
            naming_convention_score,
            comment_quality_score,
            technical_debt_ratio,
            code_smells,
            duplication_ratio,
            algorithmic_complexity,
            memory_usage,
            security_issues,
            vulnerability_score,
            test_coverage,
            test_quality_score,
            error_handling_score,
            resource_management_score,
            overall_quality_score,
            quality_grade,
            quality_trend,
        }
    }

    /// The weighted score an empty file earns from its default components.
    fn empty_input_score(&self) -> f64 {
        let defaults = QualityMetrics::default();
        overall_score(
            defaults.maintainability_index,
            defaults.cyclomatic_complexity,
            defaults.technical_debt_ratio,
            defaults.naming_convention_score,
            defaults.comment_quality_score,
            defaults.test_coverage,
            defaults.vulnerability_score,
            defaults.memory_usage,
            &self.thresholds,
        )
    }
}

/// Maintainability Index, rescaled onto 0-100:
/// `(171 - 5.2 ln(volume) - 0.23 cc - 16.2 ln(avg function length) + 100) / 2`.
fn maintainability_index(volume: f64, cyclomatic: f64, avg_function_length: f64) -> f64 {
    let raw = 171.0 - 5.2 * volume.max(1.0).ln() - 0.23 * cyclomatic
        - 16.2 * avg_function_length.max(1.0).ln();
    ((raw + 100.0) / 2.0).clamp(0.0, 100.0)
}

/// Fixed-weight composite over the extractor's component scores. The
/// configured `fair` bands set where the complexity and debt components
/// bottom out.
#[allow(clippy::too_many_arguments)]
fn overall_score(
    maintainability: f64,
    cyclomatic: f64,
    technical_debt_ratio: f64,
    naming_score: f64,
    comment_quality: f64,
    test_coverage: f64,
    vulnerability_score: f64,
    memory_usage: f64,
    thresholds: &QualityThresholds,
) -> f64 {
    let complexity_floor = thresholds.cyclomatic_complexity.fair.max(2.0);
    let debt_floor = thresholds.technical_debt_ratio.fair.max(1.0);
    let complexity_component =
        normalize_inverse(cyclomatic.clamp(1.0, complexity_floor), 1.0, complexity_floor);
    let debt_component =
        normalize_inverse(technical_debt_ratio.clamp(0.0, debt_floor), 0.0, debt_floor);
    let code_quality = (naming_score + comment_quality) / 2.0;
    let security = 100.0 - vulnerability_score;
    let performance = 100.0 - memory_usage;

    round2(
        maintainability * 0.25
            + complexity_component * 0.20
            + debt_component * 0.15
            + code_quality * 0.15
            + test_coverage * 0.10
            + security * 0.10
            + performance * 0.05,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintainability_index_is_bounded() {
        assert_eq!(maintainability_index(0.0, 1.0, 0.0), 100.0);
        let mi = maintainability_index(50_000.0, 80.0, 400.0);
        assert!((0.0..=100.0).contains(&mi));
    }

    #[test]
    fn empty_input_scores_above_zero() {
        assert!(MetricExtractor::new().empty_input_score() > 0.0);
    }
}
