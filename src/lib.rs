// Export modules for library usage
pub mod config;
pub mod core;
pub mod debt;
pub mod metrics;
pub mod patterns;
pub mod scoring;
pub mod trends;

// Re-export commonly used types
pub use crate::core::{
    AlgorithmicComplexity, Error, HalsteadMetrics, LineLengthMetrics, QualityGrade,
    QualityMetrics, Result, RiskLevel, TrendDirection,
};

pub use crate::config::{QualityThresholds, ThresholdBands, ThresholdOverrides};

pub use crate::metrics::MetricExtractor;

pub use crate::debt::{
    DebtImpact, DebtLocation, DebtModeler, DebtSeverity, DebtType, RiskAssessment,
    TechnicalDebtAnalysis, TechnicalDebtItem,
};

pub use crate::scoring::{
    compare_quality_scores, BenchmarkComparison, QualityScore, ScoreBreakdown, ScoreComparison,
    ScoreSummary, Scorer,
};

pub use crate::trends::{
    add_data_point, export_trend_data, import_trend_data, MetricTrend, OutlierPoint,
    PeriodSummary, PredictionPoint, TrendAnalysis, TrendAnalyzer, TrendDataPoint, TrendExport,
    TrendInsights, TrendMetrics, TrendOptions, TrendPatterns, TrendPredictions,
};
