//! Natural-language insight generation over a computed trend window.

use super::{TrendInsights, TrendMetrics, TrendPatterns};
use crate::core::{RiskLevel, TrendDirection};

/// Percentage change that counts as significant in the findings.
const SIGNIFICANT_CHANGE: f64 = 5.0;
/// Volatility above this is called out and drives a standardization nudge.
const HIGH_VOLATILITY: f64 = 15.0;
/// Volatility above this alone raises the risk level.
const RISK_VOLATILITY: f64 = 20.0;
/// A decline steeper than this is high risk.
const SEVERE_DECLINE: f64 = 10.0;

pub fn generate_insights(metrics: &TrendMetrics, patterns: &TrendPatterns) -> TrendInsights {
    let quality = &metrics.quality_score;
    let current = quality.values.last().copied().unwrap_or(0.0);

    let summary = format!(
        "Quality score is {} with a current value of {:.1}.",
        quality.trend.as_str(),
        current
    );

    let mut key_findings = Vec::new();
    for (name, trend) in [
        ("Quality score", &metrics.quality_score),
        ("Maintainability", &metrics.maintainability),
        ("Complexity", &metrics.complexity),
        ("Technical debt", &metrics.technical_debt),
        ("Test coverage", &metrics.test_coverage),
    ] {
        if trend.change.abs() > SIGNIFICANT_CHANGE {
            key_findings.push(format!(
                "{name} changed by {:.1}% over the analyzed window.",
                trend.change
            ));
        }
    }
    if quality.volatility > HIGH_VOLATILITY {
        key_findings.push(format!(
            "Quality is highly volatile (standard deviation {:.1}).",
            quality.volatility
        ));
    }
    if !patterns.outliers.is_empty() {
        key_findings.push(format!(
            "{} outlier data point(s) detected.",
            patterns.outliers.len()
        ));
    }
    if metrics.technical_debt.trend == TrendDirection::Declining {
        key_findings.push("Technical debt is accumulating faster than it is repaid.".to_string());
    }

    let mut recommendations = Vec::new();
    match quality.trend {
        TrendDirection::Declining => recommendations
            .push("Investigate root causes of the quality decline before it compounds.".to_string()),
        TrendDirection::Improving => recommendations
            .push("Keep reinforcing the practices driving the improvement.".to_string()),
        TrendDirection::Stable => {}
    }
    if quality.volatility > HIGH_VOLATILITY {
        recommendations
            .push("Standardize development processes to reduce quality volatility.".to_string());
    }
    if patterns.cyclic_behavior {
        recommendations.push(
            "Quality moves in cycles; review release cadence and crunch periods.".to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push("Continue monitoring; no corrective action needed.".to_string());
    }

    let risk_assessment = if quality.trend == TrendDirection::Declining
        && quality.change.abs() > SEVERE_DECLINE
    {
        RiskLevel::High
    } else if quality.trend == TrendDirection::Declining || quality.volatility > RISK_VOLATILITY {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    TrendInsights {
        summary,
        key_findings,
        recommendations,
        risk_assessment,
    }
}
