//! The priced debt item model.
//!
//! Every financial field is derived from the (type, severity) pair at
//! construction time: `principal = base_principal(type) × multiplier(severity)`
//! and `priority = type_weight(type) × severity_weight(severity)`. Items are
//! facts about a snapshot and are never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories of technical debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CodeSmell,
    DesignIssue,
    Bug,
    Vulnerability,
    PerformanceIssue,
}

impl DebtType {
    pub const ALL: [DebtType; 5] = [
        DebtType::CodeSmell,
        DebtType::DesignIssue,
        DebtType::Bug,
        DebtType::Vulnerability,
        DebtType::PerformanceIssue,
    ];

    /// One-time fix cost before severity scaling.
    pub fn base_principal(&self) -> f64 {
        match self {
            DebtType::CodeSmell => 50.0,
            DebtType::DesignIssue => 100.0,
            DebtType::Bug => 150.0,
            DebtType::Vulnerability => 300.0,
            DebtType::PerformanceIssue => 120.0,
        }
    }

    /// Default monthly fractional cost growth for an unfixed item.
    pub fn default_interest_rate(&self) -> f64 {
        match self {
            DebtType::CodeSmell => 0.05,
            DebtType::DesignIssue => 0.08,
            DebtType::Bug => 0.15,
            DebtType::Vulnerability => 0.25,
            DebtType::PerformanceIssue => 0.10,
        }
    }

    /// Estimated fix hours before severity scaling.
    pub fn base_fix_hours(&self) -> f64 {
        match self {
            DebtType::CodeSmell => 0.5,
            DebtType::DesignIssue => 2.0,
            DebtType::Bug => 1.5,
            DebtType::Vulnerability => 3.0,
            DebtType::PerformanceIssue => 2.0,
        }
    }

    pub fn priority_weight(&self) -> f64 {
        match self {
            DebtType::CodeSmell => 1.0,
            DebtType::DesignIssue => 1.5,
            DebtType::Bug => 2.0,
            DebtType::Vulnerability => 3.0,
            DebtType::PerformanceIssue => 1.8,
        }
    }

    /// Per-dimension impact vector before severity scaling, each 0-10.
    fn base_impact(&self) -> DebtImpact {
        match self {
            DebtType::CodeSmell => DebtImpact::new(6.0, 1.0, 0.0, 2.0),
            DebtType::DesignIssue => DebtImpact::new(8.0, 3.0, 1.0, 4.0),
            DebtType::Bug => DebtImpact::new(4.0, 2.0, 2.0, 9.0),
            DebtType::Vulnerability => DebtImpact::new(2.0, 1.0, 10.0, 7.0),
            DebtType::PerformanceIssue => DebtImpact::new(3.0, 9.0, 0.0, 3.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CodeSmell => "code_smell",
            DebtType::DesignIssue => "design_issue",
            DebtType::Bug => "bug",
            DebtType::Vulnerability => "vulnerability",
            DebtType::PerformanceIssue => "performance_issue",
        }
    }
}

impl std::fmt::Display for DebtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity levels for debt items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DebtSeverity {
    pub const ALL: [DebtSeverity; 4] = [
        DebtSeverity::Low,
        DebtSeverity::Medium,
        DebtSeverity::High,
        DebtSeverity::Critical,
    ];

    /// Multiplier applied to principal, fix time, and priority alike.
    pub fn multiplier(&self) -> f64 {
        match self {
            DebtSeverity::Low => 1.0,
            DebtSeverity::Medium => 2.0,
            DebtSeverity::High => 3.0,
            DebtSeverity::Critical => 5.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebtSeverity::Low => "low",
            DebtSeverity::Medium => "medium",
            DebtSeverity::High => "high",
            DebtSeverity::Critical => "critical",
        }
    }
}

/// Where a debt item was found.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebtLocation {
    pub file: String,
    pub line: Option<usize>,
    pub function: Option<String>,
    pub class: Option<String>,
}

impl DebtLocation {
    pub fn at_line(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            function: None,
            class: None,
        }
    }

    pub fn whole_file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            function: None,
            class: None,
        }
    }
}

/// Impact of one item on each quality dimension, 0-10 per axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebtImpact {
    pub maintainability: f64,
    pub performance: f64,
    pub security: f64,
    pub reliability: f64,
}

impl DebtImpact {
    fn new(maintainability: f64, performance: f64, security: f64, reliability: f64) -> Self {
        Self {
            maintainability,
            performance,
            security,
            reliability,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            maintainability: (self.maintainability * factor).min(10.0),
            performance: (self.performance * factor).min(10.0),
            security: (self.security * factor).min(10.0),
            reliability: (self.reliability * factor).min(10.0),
        }
    }
}

/// One discrete, priced defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDebtItem {
    pub id: String,
    pub debt_type: DebtType,
    pub severity: DebtSeverity,
    pub description: String,
    pub location: DebtLocation,
    /// Hours to fix.
    pub estimated_fix_time: f64,
    /// Monthly fractional cost growth.
    pub interest_rate: f64,
    /// One-time fix cost.
    pub principal: f64,
    pub impact: DebtImpact,
    /// Derived scalar used for ranking; higher fixes first.
    pub priority: f64,
    pub created_at: DateTime<Utc>,
}

impl TechnicalDebtItem {
    /// Build an item with all derived fields computed from the fixed tables.
    pub fn new(
        debt_type: DebtType,
        severity: DebtSeverity,
        description: impl Into<String>,
        location: DebtLocation,
    ) -> Self {
        let description = description.into();
        let multiplier = severity.multiplier();
        let id = match location.line {
            Some(line) => format!("{}-{}-{}", debt_type, location.file, line),
            None => format!("{}-{}", debt_type, location.file),
        };

        Self {
            id,
            debt_type,
            severity,
            principal: debt_type.base_principal() * multiplier,
            interest_rate: debt_type.default_interest_rate(),
            estimated_fix_time: debt_type.base_fix_hours() * multiplier,
            impact: debt_type.base_impact().scaled(multiplier / 5.0),
            priority: debt_type.priority_weight() * multiplier,
            description,
            location,
            created_at: Utc::now(),
        }
    }

    /// Cost of this item after `months` of accrued interest.
    pub fn cost_after(&self, months: u32) -> f64 {
        self.principal * (1.0 + self.interest_rate).powi(months as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_follows_the_pricing_table() {
        let item = TechnicalDebtItem::new(
            DebtType::Vulnerability,
            DebtSeverity::Critical,
            "SQL injection",
            DebtLocation::at_line("db.js", 42),
        );
        assert_eq!(item.principal, 1500.0);
        assert_eq!(item.interest_rate, 0.25);
        assert_eq!(item.priority, 15.0);
    }

    #[test]
    fn interest_compounds_monthly() {
        let item = TechnicalDebtItem::new(
            DebtType::CodeSmell,
            DebtSeverity::Low,
            "long line",
            DebtLocation::at_line("main.js", 1),
        );
        assert_eq!(item.cost_after(0), 50.0);
        assert!((item.cost_after(2) - 50.0 * 1.05 * 1.05).abs() < 1e-9);
    }
}
