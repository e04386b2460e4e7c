//! Technical debt identification and financial modeling.

pub mod detectors;
pub mod item;

pub use item::{DebtImpact, DebtLocation, DebtSeverity, DebtType, TechnicalDebtItem};

use crate::core::normalize::round2;
use crate::core::{QualityMetrics, RiskLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Assumed repayment budget, in fix-hours per month, for payoff estimates.
const MONTHLY_REPAYMENT_HOURS: f64 = 20.0;

/// At most this many items appear in the priority list.
const MAX_PRIORITY_ITEMS: usize = 10;

/// Per-dimension and overall risk classification for one snapshot's debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub maintainability: RiskLevel,
    pub performance: RiskLevel,
    pub security: RiskLevel,
    pub reliability: RiskLevel,
    pub overall: RiskLevel,
}

/// Aggregate debt picture for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDebtAnalysis {
    pub items: Vec<TechnicalDebtItem>,
    /// Sum of item principals.
    pub total_debt: f64,
    /// Principal totals keyed by debt type.
    pub category_totals: BTreeMap<String, f64>,
    /// Item counts keyed by severity.
    pub severity_counts: BTreeMap<String, usize>,
    /// Debt per line of code, as a percentage.
    pub debt_ratio: f64,
    /// Months to clear all items at the assumed repayment budget.
    pub estimated_payoff_time: u32,
    /// Sum of principal × interest rate across items.
    pub monthly_interest: f64,
    /// High/critical items, highest priority first, capped.
    pub priority_items: Vec<TechnicalDebtItem>,
    pub recommendations: Vec<String>,
    pub risk_assessment: RiskAssessment,
}

/// Scans source text and extracted metrics for debt-worthy patterns and
/// prices what it finds.
#[derive(Debug, Clone, Default)]
pub struct DebtModeler;

impl DebtModeler {
    pub fn new() -> Self {
        Self
    }

    /// Run all five issue-family detectors and aggregate the results.
    pub fn analyze(
        &self,
        code: &str,
        language: &str,
        path: &str,
        metrics: &QualityMetrics,
    ) -> TechnicalDebtAnalysis {
        log::debug!("modeling technical debt for {path} ({language})");

        let mut items = Vec::new();
        items.extend(detectors::detect_code_smells(code, path));
        items.extend(detectors::detect_design_issues(metrics, path));
        items.extend(detectors::detect_bugs(code, path));
        items.extend(detectors::detect_vulnerabilities(code, path));
        items.extend(detectors::detect_performance_issues(code, path, metrics));

        aggregate(items, metrics.lines_of_code)
    }
}

fn aggregate(items: Vec<TechnicalDebtItem>, lines_of_code: usize) -> TechnicalDebtAnalysis {
    let total_debt: f64 = items.iter().map(|i| i.principal).sum();
    let monthly_interest: f64 = items.iter().map(|i| i.principal * i.interest_rate).sum();
    let total_fix_hours: f64 = items.iter().map(|i| i.estimated_fix_time).sum();

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut severity_counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in &items {
        *category_totals
            .entry(item.debt_type.as_str().to_string())
            .or_insert(0.0) += item.principal;
        *severity_counts
            .entry(item.severity.as_str().to_string())
            .or_insert(0) += 1;
    }

    let debt_ratio = if lines_of_code > 0 {
        round2(total_debt / lines_of_code as f64 * 100.0)
    } else {
        0.0
    };
    let estimated_payoff_time = (total_fix_hours / MONTHLY_REPAYMENT_HOURS).ceil() as u32;

    let mut priority_items: Vec<TechnicalDebtItem> = items
        .iter()
        .filter(|i| matches!(i.severity, DebtSeverity::High | DebtSeverity::Critical))
        .cloned()
        .collect();
    priority_items.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    priority_items.truncate(MAX_PRIORITY_ITEMS);

    let risk_assessment = assess_risk(&items, total_debt, debt_ratio);
    let recommendations = build_recommendations(&items, &category_totals, monthly_interest);

    TechnicalDebtAnalysis {
        total_debt,
        category_totals,
        severity_counts,
        debt_ratio,
        estimated_payoff_time,
        monthly_interest: round2(monthly_interest),
        priority_items,
        recommendations,
        risk_assessment,
        items,
    }
}

fn dimension_risk(impact_total: f64) -> RiskLevel {
    if impact_total >= 20.0 {
        RiskLevel::High
    } else if impact_total >= 8.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn assess_risk(items: &[TechnicalDebtItem], total_debt: f64, debt_ratio: f64) -> RiskAssessment {
    let critical_count = items
        .iter()
        .filter(|i| i.severity == DebtSeverity::Critical)
        .count();
    let vulnerability_count = items
        .iter()
        .filter(|i| i.debt_type == DebtType::Vulnerability)
        .count();

    let overall = if critical_count > 2
        || vulnerability_count > 1
        || total_debt > 1000.0
        || debt_ratio > 15.0
    {
        RiskLevel::High
    } else if critical_count >= 1 || vulnerability_count >= 1 || total_debt > 500.0 || debt_ratio > 8.0
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let (mut maint, mut perf, mut sec, mut rel) = (0.0, 0.0, 0.0, 0.0);
    for item in items {
        maint += item.impact.maintainability;
        perf += item.impact.performance;
        sec += item.impact.security;
        rel += item.impact.reliability;
    }

    RiskAssessment {
        maintainability: dimension_risk(maint),
        performance: dimension_risk(perf),
        security: dimension_risk(sec),
        reliability: dimension_risk(rel),
        overall,
    }
}

fn build_recommendations(
    items: &[TechnicalDebtItem],
    category_totals: &BTreeMap<String, f64>,
    monthly_interest: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if items.is_empty() {
        recommendations.push("No technical debt detected; keep current practices.".to_string());
        return recommendations;
    }

    if items.iter().any(|i| i.debt_type == DebtType::Vulnerability) {
        recommendations
            .push("Address security vulnerabilities before any other debt.".to_string());
    }
    if items.iter().any(|i| i.debt_type == DebtType::Bug) {
        recommendations.push("Schedule bug-pattern fixes into the next iteration.".to_string());
    }
    if let Some((category, total)) = category_totals
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
    {
        recommendations.push(format!(
            "Largest debt category is {category} at {total:.0} cost units; start repayment there."
        ));
    }
    if monthly_interest > 100.0 {
        recommendations.push(format!(
            "Debt accrues {monthly_interest:.0} cost units of interest per month; deferring fixes is expensive."
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QualityMetrics;

    #[test]
    fn empty_code_yields_empty_analysis() {
        let modeler = DebtModeler::new();
        let metrics = QualityMetrics::default();
        let analysis = modeler.analyze("", "javascript", "empty.js", &metrics);

        assert!(analysis.items.is_empty());
        assert_eq!(analysis.total_debt, 0.0);
        assert_eq!(analysis.estimated_payoff_time, 0);
        assert_eq!(analysis.risk_assessment.overall, RiskLevel::Low);
    }

    #[test]
    fn payoff_time_rounds_up_to_whole_months() {
        let items = vec![
            TechnicalDebtItem::new(
                DebtType::DesignIssue,
                DebtSeverity::Critical,
                "tangled module",
                DebtLocation::whole_file("big.js"),
            ),
            TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::High,
                "swallowed error",
                DebtLocation::at_line("big.js", 10),
            ),
        ];
        // 2.0 * 5 + 1.5 * 3 = 14.5 hours -> 1 month at 20h/month
        let analysis = aggregate(items, 100);
        assert_eq!(analysis.estimated_payoff_time, 1);
    }
}
