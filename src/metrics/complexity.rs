//! Keyword-scan complexity measures.
//!
//! Extraction deliberately works over raw text through the language pattern
//! tables; there is no AST. The counts track decision points the way a parser
//! would see them closely enough for scoring purposes.

use crate::core::AlgorithmicComplexity;
use crate::patterns::LanguagePatterns;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").expect("word pattern must compile"));

fn words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Count keyword occurrences; two-word keywords ("else if") match adjacent pairs.
fn count_keyword(tokens: &[&str], keyword: &str) -> usize {
    match keyword.split_once(' ') {
        Some((first, second)) => tokens
            .windows(2)
            .filter(|pair| pair[0] == first && pair[1] == second)
            .count(),
        None => tokens.iter().filter(|token| **token == keyword).count(),
    }
}

fn logical_operator_count(line: &str, patterns: &LanguagePatterns, tokens: &[&str]) -> usize {
    let mut count = line.matches("&&").count() + line.matches("||").count();
    for op in patterns.word_logical_operators {
        count += count_keyword(tokens, op);
    }
    count
}

/// Basic decision-point count: one per decision keyword, plus one.
pub fn basic_complexity(code: &str, patterns: &LanguagePatterns) -> f64 {
    let tokens = words(code);
    let decisions: usize = patterns
        .decision_keywords
        .iter()
        .map(|kw| count_keyword(&tokens, kw))
        .sum();
    (decisions + 1) as f64
}

/// Cyclomatic complexity: base 1, one per decision keyword or logical
/// operator, an extra 0.5 per loop keyword, rounded to an integer value.
pub fn cyclomatic_complexity(code: &str, patterns: &LanguagePatterns) -> f64 {
    let tokens = words(code);
    let mut total = 1.0;

    for kw in patterns.decision_keywords {
        total += count_keyword(&tokens, kw) as f64;
    }
    total += (code.matches("&&").count() + code.matches("||").count()) as f64;
    for op in patterns.word_logical_operators {
        total += count_keyword(&tokens, op) as f64;
    }
    if patterns.ternary {
        total += code.matches('?').count() as f64;
    }
    for kw in patterns.loop_keywords {
        total += 0.5 * count_keyword(&tokens, kw) as f64;
    }

    total.round().max(1.0)
}

fn indent_level(line: &str) -> usize {
    let spaces = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum::<usize>();
    spaces / 4
}

/// Cognitive complexity: each decision point costs its nesting depth, each
/// logical operator costs one. Nesting tracks braces, or indentation for
/// indentation-delimited languages.
pub fn cognitive_complexity(code: &str, patterns: &LanguagePatterns) -> f64 {
    let mut total = 0.0;
    let mut nesting: f64 = 0.0;

    for line in code.lines() {
        if !patterns.braces {
            nesting = indent_level(line) as f64;
        }
        let tokens = words(line);
        let decisions: usize = patterns
            .decision_keywords
            .iter()
            .map(|kw| count_keyword(&tokens, kw))
            .sum();

        for _ in 0..decisions {
            if patterns.braces {
                nesting += 1.0;
                total += nesting;
            } else {
                total += nesting + 1.0;
            }
        }
        total += logical_operator_count(line, patterns, &tokens) as f64;

        if patterns.braces {
            let closes = line.matches('}').count() as f64;
            nesting = (nesting - closes).max(0.0);
        }
    }

    total
}

/// Deepest loop nesting observed in brace-delimited code.
fn max_loop_nesting_braced(code: &str, patterns: &LanguagePatterns) -> usize {
    let mut depth: i64 = 0;
    let mut loop_depths: Vec<i64> = Vec::new();
    let mut max_nesting = 0;

    for line in code.lines() {
        let tokens = words(line);
        let loops: usize = patterns
            .loop_keywords
            .iter()
            .map(|kw| count_keyword(&tokens, kw))
            .sum();
        for _ in 0..loops {
            loop_depths.push(depth);
            max_nesting = max_nesting.max(loop_depths.len());
        }
        depth += line.matches('{').count() as i64;
        depth -= line.matches('}').count() as i64;
        loop_depths.retain(|opened_at| depth > *opened_at);
    }

    max_nesting
}

/// Deepest loop nesting observed in indentation-delimited code.
fn max_loop_nesting_indented(code: &str, patterns: &LanguagePatterns) -> usize {
    let mut loop_indents: Vec<usize> = Vec::new();
    let mut max_nesting = 0;

    for line in code.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_level(line);
        loop_indents.retain(|opened_at| indent > *opened_at);

        let tokens = words(line);
        let is_loop = patterns
            .loop_keywords
            .iter()
            .any(|kw| count_keyword(&tokens, kw) > 0);
        if is_loop {
            loop_indents.push(indent);
            max_nesting = max_nesting.max(loop_indents.len());
        }
    }

    max_nesting
}

/// Body of a brace-delimited function whose definition ends at `from`.
fn braced_body(code: &str, from: usize) -> &str {
    let Some(offset) = code[from..].find('{') else {
        return "";
    };
    let open = from + offset;
    let mut depth = 0usize;
    for (i, c) in code[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return &code[open + 1..open + i];
                }
            }
            _ => {}
        }
    }
    &code[open + 1..]
}

/// Body of an indentation-delimited function whose definition starts at
/// `def_start`: the following lines indented deeper than the definition.
fn indented_body(code: &str, def_start: usize) -> &str {
    let line_start = code[..def_start].rfind('\n').map_or(0, |i| i + 1);
    let def_indent = indent_level(&code[line_start..]);
    let Some(newline) = code[def_start..].find('\n') else {
        return "";
    };
    let body_start = def_start + newline + 1;

    let mut end = body_start;
    for line in code[body_start..].lines() {
        if !line.trim().is_empty() && indent_level(line) <= def_indent {
            break;
        }
        end += line.len() + 1;
    }
    &code[body_start..end.min(code.len())]
}

/// True when a named function calls itself from more than one site within
/// its own body, the signature of branching recursion. Calls made elsewhere
/// in the file are ordinary use, not recursion.
fn has_branching_recursion(code: &str, patterns: &LanguagePatterns) -> bool {
    for caps in patterns.function.captures_iter(code) {
        let name = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .next()
            .unwrap_or("");
        if name.len() < 3 {
            continue;
        }
        let definition = caps.get(0).expect("capture 0 always present");
        let body = if patterns.braces {
            braced_body(code, definition.end())
        } else {
            indented_body(code, definition.start())
        };

        let call = format!("{name}(");
        if body.matches(call.as_str()).count() >= 2 {
            return true;
        }
    }
    false
}

/// Classify asymptotic complexity from loop-nesting patterns.
pub fn classify_algorithmic_complexity(
    code: &str,
    patterns: &LanguagePatterns,
) -> AlgorithmicComplexity {
    if has_branching_recursion(code, patterns) {
        return AlgorithmicComplexity::Factorial;
    }

    let nesting = if patterns.braces {
        max_loop_nesting_braced(code, patterns)
    } else {
        max_loop_nesting_indented(code, patterns)
    };
    let has_sort = code.contains(".sort") || code.contains("sorted(");

    match nesting {
        0 if has_sort => AlgorithmicComplexity::Linearithmic,
        0 => AlgorithmicComplexity::Constant,
        1 if has_sort => AlgorithmicComplexity::Linearithmic,
        1 => AlgorithmicComplexity::Linear,
        2 => AlgorithmicComplexity::Quadratic,
        _ => AlgorithmicComplexity::Cubic,
    }
}
