//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize};

/// Letter grade derived from an overall quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
    D,
    F,
}

impl QualityGrade {
    /// Grade thresholds: >=90 A, >=80 B, >=70 C, >=60 D, else F.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            QualityGrade::A
        } else if score >= 80.0 {
            QualityGrade::B
        } else if score >= 70.0 {
            QualityGrade::C
        } else if score >= 60.0 {
            QualityGrade::D
        } else {
            QualityGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
            QualityGrade::D => "D",
            QualityGrade::F => "F",
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Big-O classification produced by the nested-loop heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmicComplexity {
    #[serde(rename = "O(1)")]
    Constant,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n log n)")]
    Linearithmic,
    #[serde(rename = "O(n²)")]
    Quadratic,
    #[serde(rename = "O(n³)")]
    Cubic,
    #[serde(rename = "O(n!)")]
    Factorial,
}

impl AlgorithmicComplexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmicComplexity::Constant => "O(1)",
            AlgorithmicComplexity::Linear => "O(n)",
            AlgorithmicComplexity::Linearithmic => "O(n log n)",
            AlgorithmicComplexity::Quadratic => "O(n²)",
            AlgorithmicComplexity::Cubic => "O(n³)",
            AlgorithmicComplexity::Factorial => "O(n!)",
        }
    }
}

impl std::fmt::Display for AlgorithmicComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a quality metric over time or between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    }
}

/// Coarse risk classification used by debt and trend assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Classical software-science measures derived from operator/operand counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    pub vocabulary: usize,
    pub length: usize,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
    /// Estimated implementation time in seconds (effort / 18).
    pub time: f64,
    /// Delivered-bug estimate (volume / 3000).
    pub bugs: f64,
}

impl Default for HalsteadMetrics {
    fn default() -> Self {
        Self {
            vocabulary: 0,
            length: 0,
            volume: 0.0,
            difficulty: 0.0,
            effort: 0.0,
            time: 0.0,
            bugs: 0.0,
        }
    }
}

/// Line-length distribution for one source unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineLengthMetrics {
    pub average: f64,
    pub max: usize,
    pub lines_over_limit: usize,
}

/// One snapshot's measurements for a single source unit.
///
/// Every bounded sub-score lies in [0, 100]; `quality_grade` is a
/// deterministic function of `overall_quality_score`. Instances are created
/// fresh per analysis call and never mutated after being returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub lines_of_code: usize,
    pub comment_lines: usize,
    pub comment_percentage: f64,
    /// Basic decision-point count.
    pub complexity: f64,
    pub cyclomatic_complexity: f64,
    pub cognitive_complexity: f64,
    pub halstead: HalsteadMetrics,
    /// 0-100, higher is easier to maintain.
    pub maintainability_index: f64,
    pub coupling: f64,
    pub cohesion: f64,
    pub depth_of_inheritance: u32,
    pub line_length: LineLengthMetrics,
    pub naming_convention_score: f64,
    pub comment_quality_score: f64,
    /// Debt-worthy findings per line, as a percentage.
    pub technical_debt_ratio: f64,
    pub code_smells: usize,
    pub duplication_ratio: f64,
    pub algorithmic_complexity: AlgorithmicComplexity,
    /// Allocation density, 0-100 where higher means more memory pressure.
    pub memory_usage: f64,
    pub security_issues: usize,
    pub vulnerability_score: f64,
    pub test_coverage: f64,
    pub test_quality_score: f64,
    pub error_handling_score: f64,
    pub resource_management_score: f64,
    pub overall_quality_score: f64,
    pub quality_grade: QualityGrade,
    pub quality_trend: TrendDirection,
}

impl Default for QualityMetrics {
    /// The degenerate-but-defined result for empty input.
    fn default() -> Self {
        Self {
            lines_of_code: 0,
            comment_lines: 0,
            comment_percentage: 0.0,
            complexity: 1.0,
            cyclomatic_complexity: 1.0,
            cognitive_complexity: 0.0,
            halstead: HalsteadMetrics::default(),
            maintainability_index: 100.0,
            coupling: 0.0,
            cohesion: 100.0,
            depth_of_inheritance: 0,
            line_length: LineLengthMetrics::default(),
            naming_convention_score: 100.0,
            comment_quality_score: 40.0,
            technical_debt_ratio: 0.0,
            code_smells: 0,
            duplication_ratio: 0.0,
            algorithmic_complexity: AlgorithmicComplexity::Constant,
            memory_usage: 0.0,
            security_issues: 0,
            vulnerability_score: 0.0,
            test_coverage: 0.0,
            test_quality_score: 0.0,
            error_handling_score: 70.0,
            resource_management_score: 100.0,
            overall_quality_score: 0.0,
            quality_grade: QualityGrade::F,
            quality_trend: TrendDirection::Stable,
        }
    }
}
