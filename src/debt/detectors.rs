//! Scanners for the five debt families.
//!
//! Line-by-line regex scans for textual findings, plus threshold checks
//! against the already-extracted metrics for design and performance issues.
//! Detectors only ever append; nothing removes an item once matched.

use super::item::{DebtLocation, DebtSeverity, DebtType, TechnicalDebtItem};
use crate::core::{AlgorithmicComplexity, QualityMetrics};
use once_cell::sync::Lazy;
use regex::Regex;

static TODO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(TODO|FIXME|HACK|XXX)\b:?\s*(.*)").expect("todo pattern must compile")
});

static DEBUG_OUTPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"console\.(?:log|debug)\s*\(|\bprint\s*\(|println!\s*\(|dbg!\s*\(")
        .expect("debug output pattern must compile")
});

static EMPTY_CATCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"catch\s*(?:\([^)]*\))?\s*\{\s*\}|except[^:]*:\s*pass\b")
        .expect("empty catch pattern must compile")
});

static FLOAT_EQUALITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\.\d+\s*===?\s*|===?\s*\d+\.\d+").expect("float equality pattern must compile")
});

static NAN_COMPARISON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"===?\s*NaN\b|\bNaN\s*===?").expect("nan pattern must compile"));

static ASSIGNMENT_IN_CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:if|while)\s*\(\s*\w+\s*=\s*[^=]").expect("assignment pattern must compile")
});

static UNWRAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.unwrap\(\)|\.expect\s*\(").expect("unwrap pattern must compile"));

struct VulnerabilityPattern {
    regex: &'static Lazy<Regex>,
    severity: DebtSeverity,
    description: &'static str,
}

static EVAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\beval\s*\(").expect("eval pattern must compile"));
static EXEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bexec\s*\(|\bos\.system\s*\(|shell\s*=\s*True").expect("exec pattern must compile")
});
static SECRET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:password|passwd|secret|api_?key|token)\s*[:=]\s*["'][^"']+["']"#)
        .expect("secret pattern must compile")
});
static SQL_CONCAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:SELECT|INSERT|UPDATE|DELETE)\s.*["']\s*\+"#)
        .expect("sql pattern must compile")
});
static INNER_HTML_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.innerHTML\s*=|dangerouslySetInnerHTML|document\.write\s*\(")
        .expect("inner html pattern must compile")
});
static INSECURE_TRANSPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']http://"#).expect("transport pattern must compile"));
static PICKLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pickle\.loads\s*\(").expect("pickle pattern must compile"));

static VULNERABILITY_PATTERNS: &[VulnerabilityPattern] = &[
    VulnerabilityPattern {
        regex: &EVAL_RE,
        severity: DebtSeverity::Critical,
        description: "Dynamic code evaluation (eval) allows arbitrary code execution",
    },
    VulnerabilityPattern {
        regex: &SECRET_RE,
        severity: DebtSeverity::Critical,
        description: "Hardcoded credential in source text",
    },
    VulnerabilityPattern {
        regex: &EXEC_RE,
        severity: DebtSeverity::High,
        description: "Shell command construction vulnerable to injection",
    },
    VulnerabilityPattern {
        regex: &SQL_CONCAT_RE,
        severity: DebtSeverity::High,
        description: "SQL statement built by string concatenation",
    },
    VulnerabilityPattern {
        regex: &PICKLE_RE,
        severity: DebtSeverity::High,
        description: "Deserialization of untrusted data (pickle.loads)",
    },
    VulnerabilityPattern {
        regex: &INNER_HTML_RE,
        severity: DebtSeverity::Medium,
        description: "Direct HTML injection sink (innerHTML/document.write)",
    },
    VulnerabilityPattern {
        regex: &INSECURE_TRANSPORT_RE,
        severity: DebtSeverity::Medium,
        description: "Unencrypted http:// endpoint reference",
    },
];

const LONG_LINE_LIMIT: usize = 120;
const DEEP_NESTING_LIMIT: usize = 4;

/// Line-level code smells: markers, long lines, deep nesting, debug output.
pub fn detect_code_smells(code: &str, path: &str) -> Vec<TechnicalDebtItem> {
    let mut items = Vec::new();

    for (line_num, line) in code.lines().enumerate() {
        let line_no = line_num + 1;

        if let Some(caps) = TODO_RE.captures(line) {
            let marker = caps.get(1).map(|m| m.as_str().to_uppercase()).unwrap_or_default();
            let severity = match marker.as_str() {
                "FIXME" | "HACK" | "XXX" => DebtSeverity::Medium,
                _ => DebtSeverity::Low,
            };
            items.push(TechnicalDebtItem::new(
                DebtType::CodeSmell,
                severity,
                format!("{marker} marker left in code"),
                DebtLocation::at_line(path, line_no),
            ));
        }

        if line.len() > LONG_LINE_LIMIT {
            items.push(TechnicalDebtItem::new(
                DebtType::CodeSmell,
                DebtSeverity::Low,
                format!("Line exceeds {LONG_LINE_LIMIT} characters ({})", line.len()),
                DebtLocation::at_line(path, line_no),
            ));
        }

        let indent = line
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| if c == '\t' { 4 } else { 1 })
            .sum::<usize>()
            / 4;
        if indent > DEEP_NESTING_LIMIT {
            items.push(TechnicalDebtItem::new(
                DebtType::CodeSmell,
                DebtSeverity::Medium,
                format!("Deep nesting level: {indent}"),
                DebtLocation::at_line(path, line_no),
            ));
        }

        if DEBUG_OUTPUT_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::CodeSmell,
                DebtSeverity::Low,
                "Debug output statement left in code",
                DebtLocation::at_line(path, line_no),
            ));
        }
    }

    items
}

/// Design issues derived from metric thresholds rather than text scans.
pub fn detect_design_issues(metrics: &QualityMetrics, path: &str) -> Vec<TechnicalDebtItem> {
    let mut items = Vec::new();

    if metrics.cyclomatic_complexity > 20.0 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::High,
            format!(
                "Cyclomatic complexity {} far exceeds the maintainable band",
                metrics.cyclomatic_complexity
            ),
            DebtLocation::whole_file(path),
        ));
    } else if metrics.cyclomatic_complexity > 10.0 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::Medium,
            format!("Cyclomatic complexity {} above threshold", metrics.cyclomatic_complexity),
            DebtLocation::whole_file(path),
        ));
    }

    if metrics.maintainability_index < 40.0 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::High,
            format!(
                "Maintainability index {:.1} indicates hard-to-change code",
                metrics.maintainability_index
            ),
            DebtLocation::whole_file(path),
        ));
    }

    if metrics.coupling > 10.0 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::Medium,
            format!("High afferent coupling: {} imports", metrics.coupling),
            DebtLocation::whole_file(path),
        ));
    }

    if metrics.depth_of_inheritance > 4 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::Medium,
            format!("Inheritance depth {} exceeds 4", metrics.depth_of_inheritance),
            DebtLocation::whole_file(path),
        ));
    }

    if metrics.lines_of_code > 500 {
        items.push(TechnicalDebtItem::new(
            DebtType::DesignIssue,
            DebtSeverity::Medium,
            format!("Module has {} lines; consider splitting", metrics.lines_of_code),
            DebtLocation::whole_file(path),
        ));
    }

    items
}

/// Likely-bug textual patterns.
pub fn detect_bugs(code: &str, path: &str) -> Vec<TechnicalDebtItem> {
    let mut items = Vec::new();

    for (line_num, line) in code.lines().enumerate() {
        let line_no = line_num + 1;

        if EMPTY_CATCH_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::High,
                "Swallowed exception: empty error handler",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if NAN_COMPARISON_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::High,
                "Comparison against NaN is always false",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if FLOAT_EQUALITY_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::Medium,
                "Exact equality on floating-point value",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if ASSIGNMENT_IN_CONDITION_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::High,
                "Assignment inside a condition",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if UNWRAP_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::Bug,
                DebtSeverity::Medium,
                "Unchecked unwrap can panic at runtime",
                DebtLocation::at_line(path, line_no),
            ));
        }
    }

    items
}

/// Security vulnerabilities from the known-sink pattern table.
pub fn detect_vulnerabilities(code: &str, path: &str) -> Vec<TechnicalDebtItem> {
    let mut items = Vec::new();

    for (line_num, line) in code.lines().enumerate() {
        for pattern in VULNERABILITY_PATTERNS {
            if pattern.regex.is_match(line) {
                items.push(TechnicalDebtItem::new(
                    DebtType::Vulnerability,
                    pattern.severity,
                    pattern.description,
                    DebtLocation::at_line(path, line_num + 1),
                ));
            }
        }
    }

    items
}

static STRING_CONCAT_LOOP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\+=\s*['"]|\+=\s*\w+\s*\+\s*['"]"#).expect("concat pattern must compile")
});

static SYNC_IO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"readFileSync|writeFileSync|execSync").expect("sync io pattern must compile")
});

static SELECT_STAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SELECT\s+\*\s+FROM").expect("select pattern must compile"));

/// Performance issues: asymptotic hotspots plus textual anti-patterns.
pub fn detect_performance_issues(
    code: &str,
    path: &str,
    metrics: &QualityMetrics,
) -> Vec<TechnicalDebtItem> {
    let mut items = Vec::new();

    match metrics.algorithmic_complexity {
        AlgorithmicComplexity::Cubic | AlgorithmicComplexity::Factorial => {
            items.push(TechnicalDebtItem::new(
                DebtType::PerformanceIssue,
                DebtSeverity::High,
                format!(
                    "Algorithmic complexity {} will not scale",
                    metrics.algorithmic_complexity
                ),
                DebtLocation::whole_file(path),
            ));
        }
        AlgorithmicComplexity::Quadratic => {
            items.push(TechnicalDebtItem::new(
                DebtType::PerformanceIssue,
                DebtSeverity::Medium,
                "Nested loops give quadratic runtime",
                DebtLocation::whole_file(path),
            ));
        }
        _ => {}
    }

    let mut in_loop_depth = 0usize;
    for (line_num, line) in code.lines().enumerate() {
        let line_no = line_num + 1;
        if line.contains("for ") || line.contains("for(") || line.contains("while ") {
            in_loop_depth += 1;
        }
        if in_loop_depth > 0 && STRING_CONCAT_LOOP_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::PerformanceIssue,
                DebtSeverity::Medium,
                "String concatenation inside a loop",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if line.contains('}') && in_loop_depth > 0 {
            in_loop_depth -= 1;
        }
        if SYNC_IO_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::PerformanceIssue,
                DebtSeverity::Medium,
                "Blocking synchronous I/O call",
                DebtLocation::at_line(path, line_no),
            ));
        }
        if SELECT_STAR_RE.is_match(line) {
            items.push(TechnicalDebtItem::new(
                DebtType::PerformanceIssue,
                DebtSeverity::Low,
                "Unbounded SELECT * query",
                DebtLocation::at_line(path, line_no),
            ));
        }
    }

    items
}
