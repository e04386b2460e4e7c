//! Composite quality scoring.
//!
//! Each of the seven dimensions starts at 100 and loses points per threshold
//! band; the composite is a fixed-weight sum. Scoring never fails: absent
//! inputs lower the confidence, not the availability of a result.

use crate::core::normalize::round2;
use crate::core::{AlgorithmicComplexity, QualityGrade, QualityMetrics, TrendDirection};
use crate::debt::{DebtType, TechnicalDebtAnalysis};
use serde::{Deserialize, Serialize};

/// Weights of the seven breakdown dimensions; they sum to 1.
const WEIGHT_MAINTAINABILITY: f64 = 0.25;
const WEIGHT_COMPLEXITY: f64 = 0.20;
const WEIGHT_SECURITY: f64 = 0.20;
const WEIGHT_PERFORMANCE: f64 = 0.15;
const WEIGHT_RELIABILITY: f64 = 0.10;
const WEIGHT_TESTABILITY: f64 = 0.05;
const WEIGHT_DOCUMENTATION: f64 = 0.05;

/// Dead band, in points, before a score delta counts as a trend.
const TREND_DEAD_BAND: f64 = 2.0;

/// Fixed reference baselines the score is compared against.
const INDUSTRY_BASELINE: f64 = 75.0;
const PROJECT_BASELINE: f64 = 70.0;
const TEAM_BASELINE: f64 = 72.0;

/// Seven-dimension quality breakdown, each 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub maintainability: f64,
    pub complexity: f64,
    pub security: f64,
    pub performance: f64,
    pub reliability: f64,
    pub testability: f64,
    pub documentation: f64,
}

impl Default for ScoreBreakdown {
    fn default() -> Self {
        Self {
            maintainability: 100.0,
            complexity: 100.0,
            security: 100.0,
            performance: 100.0,
            reliability: 100.0,
            testability: 100.0,
            documentation: 100.0,
        }
    }
}

impl ScoreBreakdown {
    fn dimensions(&self) -> [(&'static str, f64); 7] {
        [
            ("maintainability", self.maintainability),
            ("complexity", self.complexity),
            ("security", self.security),
            ("performance", self.performance),
            ("reliability", self.reliability),
            ("testability", self.testability),
            ("documentation", self.documentation),
        ]
    }
}

/// Deltas against fixed reference baselines; positive means above baseline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub industry: f64,
    pub project: f64,
    pub team: f64,
}

/// The scored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall_score: f64,
    pub grade: QualityGrade,
    pub breakdown: ScoreBreakdown,
    /// Pre-rounding weighted composite.
    pub weighted_score: f64,
    /// 0-100; reflects completeness and size of the input.
    pub confidence: f64,
    pub benchmark: BenchmarkComparison,
    pub trend: TrendDirection,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

impl Default for QualityScore {
    fn default() -> Self {
        Self {
            overall_score: 0.0,
            grade: QualityGrade::F,
            breakdown: ScoreBreakdown::default(),
            weighted_score: 0.0,
            confidence: 0.0,
            benchmark: BenchmarkComparison::default(),
            trend: TrendDirection::Stable,
            recommendations: Vec::new(),
            next_steps: Vec::new(),
        }
    }
}

/// Result of comparing a batch of scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComparison {
    pub comparison: Vec<ScoreSummary>,
    pub trend: TrendDirection,
    pub average: f64,
    pub best: f64,
    pub worst: f64,
}

/// One entry in a score comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub overall_score: f64,
    pub grade: QualityGrade,
    pub confidence: f64,
}

/// Converts extracted metrics (plus an optional debt analysis) into a
/// [`QualityScore`].
#[derive(Debug, Clone, Default)]
pub struct Scorer;

impl Scorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        metrics: &QualityMetrics,
        debt: Option<&TechnicalDebtAnalysis>,
        previous: Option<&QualityScore>,
    ) -> QualityScore {
        let breakdown = ScoreBreakdown {
            maintainability: maintainability_score(metrics),
            complexity: complexity_score(metrics),
            security: security_score(metrics, debt),
            performance: performance_score(metrics),
            reliability: reliability_score(metrics, debt),
            testability: testability_score(metrics),
            documentation: documentation_score(metrics),
        };

        let weighted_score = breakdown.maintainability * WEIGHT_MAINTAINABILITY
            + breakdown.complexity * WEIGHT_COMPLEXITY
            + breakdown.security * WEIGHT_SECURITY
            + breakdown.performance * WEIGHT_PERFORMANCE
            + breakdown.reliability * WEIGHT_RELIABILITY
            + breakdown.testability * WEIGHT_TESTABILITY
            + breakdown.documentation * WEIGHT_DOCUMENTATION;
        let overall_score = round2(weighted_score);
        let grade = QualityGrade::from_score(overall_score);

        let confidence = confidence(metrics, debt);
        let trend = match previous {
            Some(prev) => {
                let delta = overall_score - prev.overall_score;
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

        let recommendations = build_recommendations(&breakdown, overall_score);
        let next_steps = build_next_steps(&breakdown, metrics);

        QualityScore {
            overall_score,
            grade,
            breakdown,
            weighted_score,
            confidence,
            benchmark: BenchmarkComparison {
                industry: round2(overall_score - INDUSTRY_BASELINE),
                project: round2(overall_score - PROJECT_BASELINE),
                team: round2(overall_score - TEAM_BASELINE),
            },
            trend,
            recommendations,
            next_steps,
        }
    }
}

/// Compare a batch of scores: per-score summaries, first-to-last trend,
/// and the average/best/worst overall values.
pub fn compare_quality_scores(scores: &[QualityScore]) -> ScoreComparison {
    if scores.is_empty() {
        return ScoreComparison {
            comparison: Vec::new(),
            trend: TrendDirection::Stable,
            average: 0.0,
            best: 0.0,
            worst: 0.0,
        };
    }

    let comparison: Vec<ScoreSummary> = scores
        .iter()
        .map(|s| ScoreSummary {
            overall_score: s.overall_score,
            grade: s.grade,
            confidence: s.confidence,
        })
        .collect();

    let values: Vec<f64> = scores.iter().map(|s| s.overall_score).collect();
    let average = round2(values.iter().sum::<f64>() / values.len() as f64);
    let best = values.iter().cloned().fold(f64::MIN, f64::max);
    let worst = values.iter().cloned().fold(f64::MAX, f64::min);

    let trend = if scores.len() < 2 {
        TrendDirection::Stable
    } else {
        let delta = values[values.len() - 1] - values[0];
        if delta > TREND_DEAD_BAND {
            TrendDirection::Improving
        } else if delta < -TREND_DEAD_BAND {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    };

    ScoreComparison {
        comparison,
        trend,
        average,
        best,
        worst,
    }
}

fn maintainability_score(metrics: &QualityMetrics) -> f64 {
    let mut score: f64 = 100.0;
    if metrics.maintainability_index < 40.0 {
        score -= 40.0;
    } else if metrics.maintainability_index < 60.0 {
        score -= 20.0;
    } else if metrics.maintainability_index < 80.0 {
        score -= 10.0;
    }
    if metrics.duplication_ratio > 20.0 {
        score -= 15.0;
    } else if metrics.duplication_ratio > 10.0 {
        score -= 5.0;
    }
    score.clamp(0.0, 100.0)
}

fn complexity_score(metrics: &QualityMetrics) -> f64 {
    let mut score: f64 = 100.0;
    if metrics.cyclomatic_complexity > 30.0 {
        score -= 40.0;
    } else if metrics.cyclomatic_complexity > 20.0 {
        score -= 25.0;
    } else if metrics.cyclomatic_complexity > 10.0 {
        score -= 10.0;
    }
    if metrics.cognitive_complexity > 40.0 {
        score -= 25.0;
    } else if metrics.cognitive_complexity > 25.0 {
        score -= 15.0;
    } else if metrics.cognitive_complexity > 15.0 {
        score -= 5.0;
    }
    if metrics.coupling > 15.0 {
        score -= 15.0;
    } else if metrics.coupling > 8.0 {
        score -= 5.0;
    }
    if metrics.depth_of_inheritance > 5 {
        score -= 10.0;
    } else if metrics.depth_of_inheritance > 3 {
        score -= 5.0;
    }
    score.clamp(0.0, 100.0)
}

fn security_score(metrics: &QualityMetrics, debt: Option<&TechnicalDebtAnalysis>) -> f64 {
    let mut score: f64 = 100.0;
    if metrics.security_issues >= 5 {
        score -= 50.0;
    } else if metrics.security_issues >= 3 {
        score -= 35.0;
    } else if metrics.security_issues >= 1 {
        score -= 20.0;
    }
    if metrics.vulnerability_score >= 50.0 {
        score -= 30.0;
    } else if metrics.vulnerability_score >= 25.0 {
        score -= 15.0;
    }
    if let Some(analysis) = debt {
        let vulnerabilities = analysis
            .items
            .iter()
            .filter(|i| i.debt_type == DebtType::Vulnerability)
            .count();
        score -= (vulnerabilities as f64 * 10.0).min(30.0);
    }
    score.clamp(0.0, 100.0)
}

fn performance_score(metrics: &QualityMetrics) -> f64 {
    let mut score: f64 = 100.0;
    score -= match metrics.algorithmic_complexity {
        AlgorithmicComplexity::Factorial => 50.0,
        AlgorithmicComplexity::Cubic => 40.0,
        AlgorithmicComplexity::Quadratic => 25.0,
        AlgorithmicComplexity::Linearithmic => 10.0,
        AlgorithmicComplexity::Linear => 5.0,
        AlgorithmicComplexity::Constant => 0.0,
    };
    if metrics.memory_usage > 70.0 {
        score -= 20.0;
    } else if metrics.memory_usage > 40.0 {
        score -= 10.0;
    }
    if metrics.lines_of_code > 1000 {
        score -= 10.0;
    } else if metrics.lines_of_code > 500 {
        score -= 5.0;
    }
    score.clamp(0.0, 100.0)
}

fn reliability_score(metrics: &QualityMetrics, debt: Option<&TechnicalDebtAnalysis>) -> f64 {
    let mut score: f64 = 100.0;

    let mut bug_indicators = metrics.halstead.bugs.ceil() as usize;
    if let Some(analysis) = debt {
        bug_indicators += analysis
            .items
            .iter()
            .filter(|i| i.debt_type == DebtType::Bug)
            .count();
    }
    score -= (bug_indicators as f64 * 8.0).min(40.0);

    if metrics.error_handling_score < 50.0 {
        score -= 20.0;
    } else if metrics.error_handling_score < 70.0 {
        score -= 10.0;
    }
    if metrics.resource_management_score < 50.0 {
        score -= 15.0;
    } else if metrics.resource_management_score < 70.0 {
        score -= 5.0;
    }
    score.clamp(0.0, 100.0)
}

fn testability_score(metrics: &QualityMetrics) -> f64 {
    let mut score: f64 = 100.0;
    if metrics.test_coverage < 20.0 {
        score -= 40.0;
    } else if metrics.test_coverage < 50.0 {
        score -= 25.0;
    } else if metrics.test_coverage < 80.0 {
        score -= 10.0;
    }
    if metrics.test_quality_score < 50.0 {
        score -= 15.0;
    }
    if metrics.cyclomatic_complexity > 20.0 {
        score -= 15.0;
    } else if metrics.cyclomatic_complexity > 10.0 {
        score -= 5.0;
    }
    score.clamp(0.0, 100.0)
}

fn documentation_score(metrics: &QualityMetrics) -> f64 {
    let mut score: f64 = 100.0;
    if metrics.comment_percentage < 5.0 {
        score -= 30.0;
    } else if metrics.comment_percentage < 10.0 {
        score -= 15.0;
    } else if metrics.comment_percentage < 15.0 {
        score -= 5.0;
    }
    if metrics.comment_quality_score < 50.0 {
        score -= 15.0;
    } else if metrics.comment_quality_score < 70.0 {
        score -= 5.0;
    }
    if metrics.naming_convention_score < 60.0 {
        score -= 20.0;
    } else if metrics.naming_convention_score < 80.0 {
        score -= 10.0;
    }
    score.clamp(0.0, 100.0)
}

fn confidence(metrics: &QualityMetrics, debt: Option<&TechnicalDebtAnalysis>) -> f64 {
    let mut confidence: f64 = 100.0;

    // a zero derived field means the measurement never happened
    if metrics.maintainability_index == 0.0 {
        confidence -= 10.0;
    }
    if metrics.cyclomatic_complexity == 0.0 {
        confidence -= 5.0;
    }
    if metrics.cognitive_complexity == 0.0 {
        confidence -= 5.0;
    }
    if debt.is_none() {
        confidence -= 10.0;
    }
    if metrics.lines_of_code < 50 {
        confidence -= 30.0;
    } else if metrics.lines_of_code < 100 {
        confidence -= 15.0;
    }

    confidence.clamp(0.0, 100.0)
}

fn dimension_recommendation(dimension: &str) -> &'static str {
    match dimension {
        "maintainability" => "Refactor toward smaller, single-purpose units to raise maintainability.",
        "complexity" => "Extract deeply nested branches into named functions to reduce complexity.",
        "security" => "Remove risky constructs and audit input handling for injection paths.",
        "performance" => "Rework hot paths with better algorithms or data structures.",
        "reliability" => "Strengthen error handling and close resource leaks.",
        "testability" => "Add tests around the least-covered units and simplify entangled logic.",
        "documentation" => "Document public behavior and improve naming consistency.",
        _ => "Review this dimension for improvement opportunities.",
    }
}

fn build_recommendations(breakdown: &ScoreBreakdown, overall: f64) -> Vec<String> {
    let mut dimensions = breakdown.dimensions();
    dimensions.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut recommendations: Vec<String> = dimensions
        .iter()
        .take(3)
        .filter(|(_, value)| *value < 70.0)
        .map(|(name, _)| dimension_recommendation(name).to_string())
        .collect();

    if overall < 60.0 {
        recommendations.push(
            "Overall quality is critically low; plan a dedicated remediation effort.".to_string(),
        );
    } else if overall < 80.0 {
        recommendations
            .push("Overall quality has room to improve; fold fixes into regular work.".to_string());
    }

    recommendations
}

fn build_next_steps(breakdown: &ScoreBreakdown, metrics: &QualityMetrics) -> Vec<String> {
    let mut steps = Vec::new();
    let mut dimensions = breakdown.dimensions();
    dimensions.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((name, value)) = dimensions.first() {
        if *value < 70.0 {
            steps.push(format!(
                "Start with {name}: it is the weakest dimension at {value:.0}."
            ));
        }
    }
    if metrics.code_smells > 0 {
        steps.push(format!(
            "Clear the {} flagged smell(s) as quick wins.",
            metrics.code_smells
        ));
    }
    if steps.is_empty() {
        steps.push("Maintain current standards and re-run analysis on the next change.".to_string());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_score_is_bounded() {
        let scorer = Scorer::new();
        let score = scorer.score(&QualityMetrics::default(), None, None);
        assert!((0.0..=100.0).contains(&score.overall_score));
        for (_, value) in score.breakdown.dimensions() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn trend_uses_two_point_dead_band() {
        let scorer = Scorer::new();
        let metrics = QualityMetrics::default();
        let baseline = scorer.score(&metrics, None, None);

        let previous_close = QualityScore {
            overall_score: baseline.overall_score - 1.0,
            ..QualityScore::default()
        };
        assert_eq!(
            scorer.score(&metrics, None, Some(&previous_close)).trend,
            TrendDirection::Stable
        );

        let previous_far = QualityScore {
            overall_score: baseline.overall_score - 10.0,
            ..QualityScore::default()
        };
        assert_eq!(
            scorer.score(&metrics, None, Some(&previous_far)).trend,
            TrendDirection::Improving
        );
    }
}
