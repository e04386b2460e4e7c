//! Longitudinal trend analysis over a history of scored snapshots.
//!
//! The analyzer is a pure function over the supplied history: it sorts,
//! windows, and derives, but never retains state between calls. History
//! ownership and persistence stay with the caller.

pub mod export;
pub mod insights;
pub mod statistics;

pub use export::{export_trend_data, import_trend_data, TrendExport, SUPPORTED_EXPORT_FORMATS};

use crate::core::{Error, QualityMetrics, Result, RiskLevel, TrendDirection};
use crate::debt::TechnicalDebtAnalysis;
use crate::scoring::QualityScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points analyzed when no period is requested.
const DEFAULT_PERIOD: usize = 30;
/// Fewer points than this cannot form a trend, whatever the requested period.
const MIN_POINTS: usize = 2;
/// Points needed before regression-based forecasting is attempted.
const MIN_PREDICTION_POINTS: usize = 3;
/// Points needed before the seasonal-variation flag can be raised.
const SEASONAL_MIN_POINTS: usize = 90;
/// Slope magnitude below which a series counts as stable.
const STABLE_SLOPE: f64 = 0.1;

/// The atomic unit of history, supplied by the caller in arbitrary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub date: DateTime<Utc>,
    pub metrics: QualityMetrics,
    pub score: QualityScore,
    pub debt_analysis: Option<TechnicalDebtAnalysis>,
}

/// Options for [`TrendAnalyzer::analyze_trends`].
#[derive(Debug, Clone)]
pub struct TrendOptions {
    /// Number of most recent points to analyze; defaults to 30, minimum 2.
    pub period: Option<usize>,
    pub include_predictions: bool,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            period: None,
            include_predictions: true,
        }
    }
}

/// Derived series data for one tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTrend {
    pub values: Vec<f64>,
    pub trend: TrendDirection,
    /// Percentage change from the first to the last value of the window.
    pub change: f64,
    /// Population standard deviation over the window.
    pub volatility: f64,
}

/// Per-metric trends for the tracked series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendMetrics {
    pub quality_score: MetricTrend,
    pub maintainability: MetricTrend,
    pub complexity: MetricTrend,
    pub technical_debt: MetricTrend,
    pub test_coverage: MetricTrend,
}

/// One flagged outlier observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierPoint {
    pub date: DateTime<Utc>,
    pub metric: String,
    pub value: f64,
    /// Deviation from the window mean in standard-deviation units.
    pub deviation: f64,
}

/// Structural patterns detected in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPatterns {
    pub cyclic_behavior: bool,
    pub seasonal_variation: bool,
    pub outliers: Vec<OutlierPoint>,
}

/// One forecast with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub quality_score: f64,
    /// In [0, 1].
    pub confidence: f64,
}

/// Forecasts at one week, one month, and one quarter out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPredictions {
    pub next_week: PredictionPoint,
    pub next_month: PredictionPoint,
    pub next_quarter: PredictionPoint,
}

/// Natural-language reading of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsights {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskLevel,
}

/// The analyzed window itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Number of points in the window.
    pub duration: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything derived over one ordered window of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub period: PeriodSummary,
    pub metrics: TrendMetrics,
    pub patterns: TrendPatterns,
    pub predictions: Option<TrendPredictions>,
    pub insights: TrendInsights,
}

/// Computes trend direction, volatility, patterns, forecasts, and insights
/// from an ordered history of `(metrics, score)` pairs.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the most recent `period` points of the supplied history.
    ///
    /// Fails with [`Error::InsufficientData`] when fewer than two usable
    /// points remain after sorting and windowing.
    pub fn analyze_trends(
        &self,
        history: &[TrendDataPoint],
        options: &TrendOptions,
    ) -> Result<TrendAnalysis> {
        let period = options.period.unwrap_or(DEFAULT_PERIOD).max(MIN_POINTS);

        let mut sorted: Vec<&TrendDataPoint> = history.iter().collect();
        sorted.sort_by_key(|p| p.date);
        let window: Vec<&TrendDataPoint> = if sorted.len() > period {
            sorted[sorted.len() - period..].to_vec()
        } else {
            sorted
        };

        if window.len() < MIN_POINTS {
            return Err(Error::InsufficientData {
                required: MIN_POINTS,
                actual: window.len(),
            });
        }
        log::debug!("analyzing trends over {} points", window.len());

        let quality_values: Vec<f64> = window.iter().map(|p| p.score.overall_score).collect();
        let maintainability_values: Vec<f64> = window
            .iter()
            .map(|p| p.metrics.maintainability_index)
            .collect();
        let complexity_values: Vec<f64> = window
            .iter()
            .map(|p| p.metrics.cyclomatic_complexity)
            .collect();
        let debt_values: Vec<f64> = window
            .iter()
            .map(|p| match &p.debt_analysis {
                Some(analysis) => analysis.total_debt,
                None => p.metrics.technical_debt_ratio,
            })
            .collect();
        let coverage_values: Vec<f64> = window.iter().map(|p| p.metrics.test_coverage).collect();

        let metrics = TrendMetrics {
            quality_score: metric_trend(&quality_values, false),
            maintainability: metric_trend(&maintainability_values, false),
            complexity: metric_trend(&complexity_values, true),
            technical_debt: metric_trend(&debt_values, true),
            test_coverage: metric_trend(&coverage_values, false),
        };

        let patterns = detect_patterns(
            &window,
            &[
                ("qualityScore", &quality_values),
                ("maintainability", &maintainability_values),
                ("complexity", &complexity_values),
                ("technicalDebt", &debt_values),
                ("testCoverage", &coverage_values),
            ],
        );

        let predictions = options
            .include_predictions
            .then(|| forecast(&quality_values));

        let insights = insights::generate_insights(&metrics, &patterns);

        Ok(TrendAnalysis {
            period: PeriodSummary {
                duration: window.len(),
                start: window.first().map(|p| p.date).unwrap_or_else(Utc::now),
                end: window.last().map(|p| p.date).unwrap_or_else(Utc::now),
            },
            metrics,
            patterns,
            predictions,
            insights,
        })
    }
}

/// Derive direction, change, and volatility for one series. Inverted series
/// (complexity, debt) are negated before the slope test since lower is better.
fn metric_trend(values: &[f64], inverted: bool) -> MetricTrend {
    let directional: Vec<f64> = if inverted {
        values.iter().map(|v| -v).collect()
    } else {
        values.to_vec()
    };
    let slope = statistics::ols_slope(&directional);

    let trend = if slope.abs() < STABLE_SLOPE {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Improving
    } else {
        TrendDirection::Declining
    };

    MetricTrend {
        values: values.to_vec(),
        trend,
        change: statistics::percent_change(values),
        volatility: statistics::population_std_dev(values),
    }
}

fn detect_patterns(
    window: &[&TrendDataPoint],
    series: &[(&str, &Vec<f64>)],
) -> TrendPatterns {
    let mut outliers = Vec::new();
    for (name, values) in series {
        for (index, deviation) in statistics::z_score_outliers(values) {
            outliers.push(OutlierPoint {
                date: window[index].date,
                metric: (*name).to_string(),
                value: values[index],
                deviation,
            });
        }
    }

    let quality_values = series
        .first()
        .map(|(_, values)| values.as_slice())
        .unwrap_or(&[]);

    TrendPatterns {
        cyclic_behavior: statistics::detect_cycle(quality_values),
        seasonal_variation: window.len() >= SEASONAL_MIN_POINTS,
        outliers,
    }
}

/// Linear-regression forecast of the quality-score series at +7, +30, and
/// +90 index steps. Short series fall back to fixed defaults.
fn forecast(quality_values: &[f64]) -> TrendPredictions {
    if quality_values.len() < MIN_PREDICTION_POINTS {
        return TrendPredictions {
            next_week: PredictionPoint {
                quality_score: 75.0,
                confidence: 0.5,
            },
            next_month: PredictionPoint {
                quality_score: 75.0,
                confidence: 0.4,
            },
            next_quarter: PredictionPoint {
                quality_score: 75.0,
                confidence: 0.3,
            },
        };
    }

    let fit = statistics::linear_regression(quality_values);
    let volatility = statistics::population_std_dev(quality_values);
    let confidence = (fit.r_squared - volatility / 100.0).clamp(0.1, 0.9);
    let last_index = (quality_values.len() - 1) as f64;

    let predict = |steps: f64| PredictionPoint {
        quality_score: (fit.intercept + fit.slope * (last_index + steps)).clamp(0.0, 100.0),
        confidence,
    };

    TrendPredictions {
        next_week: predict(7.0),
        next_month: predict(30.0),
        next_quarter: predict(90.0),
    }
}

/// Append a point to a caller-owned history, keeping it date-sorted and
/// bounded: the oldest points fall off once `max_points` is exceeded.
pub fn add_data_point(
    mut history: Vec<TrendDataPoint>,
    point: TrendDataPoint,
    max_points: usize,
) -> Vec<TrendDataPoint> {
    history.push(point);
    history.sort_by_key(|p| p.date);
    if history.len() > max_points {
        let excess = history.len() - max_points;
        history.drain(..excess);
    }
    history
}
