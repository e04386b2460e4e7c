//! Style, security, and test-proxy heuristics.
//!
//! Every function here produces a bounded count or a 0-100 score. The exact
//! pattern sets are heuristic by design; what matters is the direction (more
//! findings means a worse score) and the bounds.

use crate::core::LineLengthMetrics;
use crate::patterns::LanguagePatterns;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Default maximum line length before a line counts against the limit.
pub const LINE_LENGTH_LIMIT: usize = 120;

static SECURITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\beval\s*\(",
        r"\bexec\s*\(",
        r"\bos\.system\s*\(",
        r"child_process|subprocess.*shell\s*=\s*True",
        r"\.innerHTML\s*=",
        r"document\.write\s*\(",
        r#"(?i)(?:password|passwd|secret|api_?key|token)\s*[:=]\s*["'][^"']+["']"#,
        r#"(?i)(?:SELECT|INSERT|UPDATE|DELETE)\s.*["']\s*\+"#,
        r"pickle\.loads\s*\(",
        r"http://",
        r"\bMath\.random\s*\(.*(?:password|token|secret)",
        r"dangerouslySetInnerHTML",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("security pattern must compile"))
    .collect()
});

static ALLOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bnew\s+[A-Z$_]|\bmalloc\s*\(|vec!|Vec::new|\.clone\(\)|\.push\(|\.append\(|\.concat\(|\[\s*\]|\{\s*\}")
        .expect("allocation pattern must compile")
});

static MAGIC_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w.](\d{3,})[^\w.]").expect("magic number pattern must compile")
});

static SINGLE_LETTER_BINDING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:let|const|var)\s+([a-z])\b|^\s*([a-z])\s*=\s*[^=]")
        .expect("naming pattern must compile")
});

static ASSERT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bassert|\bexpect\s*\(|\.toBe|\.toEqual|assert_eq!|assert_ne!")
        .expect("assert pattern must compile")
});

static ERROR_HANDLING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\btry\b|\bcatch\b|\bexcept\b|\.catch\s*\(|Result<|\.unwrap_or|if\s+err\s*!=\s*nil")
        .expect("error handling pattern must compile")
});

static RISKY_ERROR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.unwrap\(\)|panic!\s*\(|\bthrow\s+new\s+Error\b")
        .expect("risky pattern must compile")
});

static RESOURCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bopen\s*\(|File::open|createReadStream|\.connect\s*\(|fopen\s*\(")
        .expect("resource open pattern must compile")
});

static RESOURCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.close\s*\(|\bdrop\s*\(|\bwith\s+open|\bdefer\b|\bfinally\b|\busing\b")
        .expect("resource close pattern must compile")
});

/// Line length distribution over the raw text.
pub fn line_length_metrics(code: &str, limit: usize) -> LineLengthMetrics {
    let lines: Vec<&str> = code.lines().collect();
    if lines.is_empty() {
        return LineLengthMetrics::default();
    }
    let total: usize = lines.iter().map(|l| l.len()).sum();
    LineLengthMetrics {
        average: total as f64 / lines.len() as f64,
        max: lines.iter().map(|l| l.len()).max().unwrap_or(0),
        lines_over_limit: lines.iter().filter(|l| l.len() > limit).count(),
    }
}

/// Count comment lines, tracking block-comment state across lines.
pub fn count_comment_lines(code: &str, patterns: &LanguagePatterns) -> usize {
    let mut count = 0;
    let mut in_block = false;

    for line in code.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if in_block {
            count += 1;
            if let Some((_, end)) = patterns.block_comment {
                if trimmed.contains(end) {
                    in_block = false;
                }
            }
            continue;
        }
        if trimmed.starts_with(patterns.line_comment) {
            count += 1;
            continue;
        }
        if let Some((start, end)) = patterns.block_comment {
            if trimmed.starts_with(start) {
                count += 1;
                if !trimmed.contains(end) {
                    in_block = true;
                }
            }
        }
    }

    count
}

/// Naming score: 100 minus 5 per questionable binding, floored at 40.
pub fn naming_convention_score(code: &str) -> f64 {
    let findings = code
        .lines()
        .filter(|line| SINGLE_LETTER_BINDING_RE.is_match(line))
        .count();
    (100.0 - findings as f64 * 5.0).max(40.0)
}

/// Comment quality from density: the 10-30% band scores 100, sparse or
/// excessive commenting scores progressively lower.
pub fn comment_quality_score(comment_percentage: f64) -> f64 {
    if (10.0..=30.0).contains(&comment_percentage) {
        100.0
    } else if comment_percentage < 10.0 {
        40.0 + comment_percentage * 6.0
    } else {
        (100.0 - (comment_percentage - 30.0) * 2.0).max(50.0)
    }
}

/// Share of non-trivial lines that appear more than once, as a percentage.
pub fn duplication_ratio(code: &str) -> f64 {
    let significant: Vec<&str> = code
        .lines()
        .map(str::trim)
        .filter(|l| l.len() > 10 && !l.starts_with("//") && !l.starts_with('#'))
        .collect();
    if significant.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in &significant {
        *counts.entry(line).or_insert(0) += 1;
    }
    let duplicated: usize = counts
        .values()
        .filter(|&&n| n > 1)
        .map(|&n| n)
        .sum();

    duplicated as f64 / significant.len() as f64 * 100.0
}

/// Count of matches against the known risky-construct patterns.
pub fn security_issue_count(code: &str) -> usize {
    SECURITY_PATTERNS
        .iter()
        .map(|re| re.find_iter(code).count())
        .sum()
}

/// Vulnerability score scales with issue count, saturating at 100.
pub fn vulnerability_score(security_issues: usize) -> f64 {
    (security_issues as f64 * 15.0).min(100.0)
}

/// Allocation density per line, scaled onto 0-100.
pub fn memory_usage_score(code: &str, lines_of_code: usize) -> f64 {
    if lines_of_code == 0 {
        return 0.0;
    }
    let allocations = ALLOCATION_RE.find_iter(code).count();
    (allocations as f64 / lines_of_code as f64 * 200.0).min(100.0)
}

/// Test-coverage proxy: ratio of test functions to all functions, plus an
/// assertion-density quality score.
pub fn test_scores(code: &str, patterns: &LanguagePatterns) -> (f64, f64) {
    let functions = patterns.function.find_iter(code).count();
    let tests = patterns.test_function.find_iter(code).count();
    if tests == 0 {
        return (0.0, 0.0);
    }

    let coverage = (tests as f64 / functions.max(1) as f64 * 100.0).min(100.0);
    let asserts = ASSERT_RE.find_iter(code).count();
    let quality = (asserts as f64 / tests as f64 * 25.0).min(100.0);
    (coverage, quality)
}

/// Error-handling score: neutral 70, credit for handling constructs, debit
/// for unwraps, panics, and unguarded throws.
pub fn error_handling_score(code: &str) -> f64 {
    let handled = ERROR_HANDLING_RE.find_iter(code).count() as f64;
    let risky = RISKY_ERROR_RE.find_iter(code).count() as f64;
    (70.0 + handled * 10.0 - risky * 15.0).clamp(0.0, 100.0)
}

/// Resource management: acquired handles should have a matching release path.
pub fn resource_management_score(code: &str) -> f64 {
    let opens = RESOURCE_OPEN_RE.find_iter(code).count();
    if opens == 0 {
        return 100.0;
    }
    let closes = RESOURCE_CLOSE_RE.find_iter(code).count();
    if closes >= opens {
        100.0
    } else {
        (closes as f64 / opens as f64 * 100.0).max(20.0)
    }
}

/// Count debt-worthy smells: markers, long lines, deep indentation, magic
/// numbers. Mirrors the debt modeler's smell family without pricing them.
pub fn code_smell_count(code: &str, patterns: &LanguagePatterns) -> usize {
    let mut count = 0;
    for line in code.lines() {
        if line.len() > LINE_LENGTH_LIMIT {
            count += 1;
        }
        let indent = line
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| if c == '\t' { 4 } else { 1 })
            .sum::<usize>()
            / 4;
        if indent > 4 {
            count += 1;
        }
        let trimmed = line.trim();
        if !trimmed.starts_with(patterns.line_comment) && MAGIC_NUMBER_RE.is_match(line) {
            count += 1;
        }
    }
    count += MARKER_RE.find_iter(code).count();
    count
}

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:TODO|FIXME|HACK|XXX)\b").expect("marker pattern must compile")
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::for_language;
    use indoc::indoc;

    #[test]
    fn security_count_reacts_to_eval() {
        let clean = "const result = compute(input);";
        let dirty = "const result = eval(input);";
        assert_eq!(security_issue_count(clean), 0);
        assert!(security_issue_count(dirty) >= 1);
    }

    #[test]
    fn comment_quality_band() {
        assert_eq!(comment_quality_score(15.0), 100.0);
        assert_eq!(comment_quality_score(0.0), 40.0);
        assert!(comment_quality_score(50.0) < 100.0);
    }

    #[test]
    fn duplication_flags_repeated_lines() {
        let code = indoc! {"
            let value = compute_total(items);
            let value = compute_total(items);
            let other = different_line(here);
        "};
        let ratio = duplication_ratio(code);
        assert!(ratio > 50.0, "got {ratio}");
    }

    #[test]
    fn block_comments_are_counted() {
        let js = for_language("js");
        let code = indoc! {"
            /* header
               continues
            */
            const x = 1;
            // trailing note
        "};
        assert_eq!(count_comment_lines(code, js), 4);
    }

    #[test]
    fn resource_score_penalizes_unclosed_handles() {
        assert_eq!(resource_management_score("let x = 1;"), 100.0);
        let leaky = "const stream = createReadStream(path);";
        assert!(resource_management_score(leaky) < 100.0);
    }
}
