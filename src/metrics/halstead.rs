//! Halstead software-science measures from operator/operand counts.

use crate::core::HalsteadMetrics;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static OPERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+\-*/%=<>!&|^~?]+").expect("operator pattern must compile"));

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*|\d+(?:\.\d+)?")
        .expect("token pattern must compile")
});

/// Reserved words counted as operators rather than operands.
const KEYWORDS: &[&str] = &[
    "if", "else", "elif", "for", "while", "loop", "match", "switch", "case", "try", "catch",
    "except", "finally", "return", "break", "continue", "function", "def", "fn", "func", "let",
    "const", "var", "class", "struct", "enum", "impl", "trait", "interface", "extends",
    "implements", "import", "use", "from", "pub", "public", "private", "protected", "static",
    "async", "await", "new", "delete", "in", "of", "and", "or", "not", "typeof", "instanceof",
    "void", "mod", "type",
];

/// Compute Halstead metrics over raw source text.
///
/// Empty or single-token input degrades to all-zero measures rather than
/// producing NaN from the logarithms.
pub fn calculate(code: &str) -> HalsteadMetrics {
    let mut operators: HashMap<&str, usize> = HashMap::new();
    let mut operands: HashMap<&str, usize> = HashMap::new();

    for m in OPERATOR_RE.find_iter(code) {
        *operators.entry(m.as_str()).or_insert(0) += 1;
    }
    for m in TOKEN_RE.find_iter(code) {
        let token = m.as_str();
        if KEYWORDS.contains(&token) {
            *operators.entry(token).or_insert(0) += 1;
        } else {
            *operands.entry(token).or_insert(0) += 1;
        }
    }

    let unique_operators = operators.len();
    let unique_operands = operands.len();
    let total_operators: usize = operators.values().sum();
    let total_operands: usize = operands.values().sum();

    let vocabulary = unique_operators + unique_operands;
    let length = total_operators + total_operands;

    let volume = if vocabulary > 1 {
        length as f64 * (vocabulary as f64).log2()
    } else {
        0.0
    };
    let difficulty = if unique_operands > 0 {
        (unique_operators as f64 / 2.0) * (total_operands as f64 / unique_operands as f64)
    } else {
        0.0
    };
    let effort = difficulty * volume;

    HalsteadMetrics {
        vocabulary,
        length,
        volume,
        difficulty,
        effort,
        time: effort / 18.0,
        bugs: volume / 3000.0,
    }
}

/// Operand reuse ratio, the deterministic stand-in for a cohesion measure:
/// heavy reuse of a shared identifier vocabulary reads as a cohesive unit.
pub fn operand_reuse_ratio(code: &str) -> f64 {
    let mut operands: HashMap<&str, usize> = HashMap::new();
    for m in TOKEN_RE.find_iter(code) {
        let token = m.as_str();
        if !KEYWORDS.contains(&token) {
            *operands.entry(token).or_insert(0) += 1;
        }
    }
    let total: usize = operands.values().sum();
    if total == 0 {
        return 1.0;
    }
    1.0 - operands.len() as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let h = calculate("");
        assert_eq!(h.vocabulary, 0);
        assert_eq!(h.length, 0);
        assert_eq!(h.volume, 0.0);
        assert_eq!(h.difficulty, 0.0);
        assert_eq!(h.bugs, 0.0);
    }

    #[test]
    fn simple_expression_counts() {
        // operators: =, +; operands: a, b, c
        let h = calculate("a = b + c");
        assert_eq!(h.vocabulary, 5);
        assert_eq!(h.length, 5);
        assert!(h.volume > 0.0);
        assert!((h.time - h.effort / 18.0).abs() < 1e-9);
        assert!((h.bugs - h.volume / 3000.0).abs() < 1e-9);
    }

    #[test]
    fn reuse_ratio_grows_with_repetition() {
        let sparse = operand_reuse_ratio("alpha beta gamma delta");
        let dense = operand_reuse_ratio("alpha alpha alpha beta");
        assert!(dense > sparse);
    }
}
