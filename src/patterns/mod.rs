//! Per-language syntax pattern tables.
//!
//! The scoring, debt, and trend math is language-agnostic; everything that has
//! to know what a function, import, or decision point looks like goes through
//! this registry. Unknown language tags fall back to a generic pattern set, so
//! lookup is total.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Syntax recognizers for a single language family.
#[derive(Debug)]
pub struct LanguagePatterns {
    pub name: &'static str,
    /// Matches a function definition; capture group 1, when present, is the name.
    pub function: Regex,
    pub import: Regex,
    pub test_function: Regex,
    pub inheritance: Regex,
    pub line_comment: &'static str,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub decision_keywords: &'static [&'static str],
    pub loop_keywords: &'static [&'static str],
    /// Word-form logical operators ("and"/"or"); symbol forms are universal.
    pub word_logical_operators: &'static [&'static str],
    /// Whether `?` counts as a ternary decision operator.
    pub ternary: bool,
    /// Whether blocks are brace-delimited (false means indentation-based).
    pub braces: bool,
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static language pattern must compile")
}

fn javascript() -> LanguagePatterns {
    LanguagePatterns {
        name: "javascript",
        function: regex(
            r"(?m)\bfunction\s+([A-Za-z_$][\w$]*)|\b([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>)",
        ),
        import: regex(r"(?m)^\s*import\s|\brequire\s*\("),
        test_function: regex(r"\b(?:it|test|describe)\s*\("),
        inheritance: regex(r"\bclass\s+[\w$]+\s+extends\s+[\w$.]+|\bimplements\s+[\w$]+"),
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        decision_keywords: &[
            "if", "else if", "for", "while", "switch", "case", "catch", "try",
        ],
        loop_keywords: &["for", "while"],
        word_logical_operators: &[],
        ternary: true,
        braces: true,
    }
}

fn python() -> LanguagePatterns {
    LanguagePatterns {
        name: "python",
        function: regex(r"(?m)^\s*(?:async\s+)?def\s+(\w+)"),
        import: regex(r"(?m)^\s*(?:import\s+\w|from\s+[\w.]+\s+import\b)"),
        test_function: regex(r"(?m)^\s*def\s+test_\w+"),
        inheritance: regex(r"(?m)^\s*class\s+\w+\s*\(\s*[A-Za-z_][\w.]*"),
        line_comment: "#",
        block_comment: None,
        decision_keywords: &["if", "elif", "for", "while", "except", "try", "case"],
        loop_keywords: &["for", "while"],
        word_logical_operators: &["and", "or"],
        ternary: false,
        braces: false,
    }
}

fn rust_lang() -> LanguagePatterns {
    LanguagePatterns {
        name: "rust",
        function: regex(r"\bfn\s+(\w+)"),
        import: regex(r"(?m)^\s*(?:pub\s+)?use\s+"),
        test_function: regex(r"#\[(?:tokio::)?test\]"),
        inheritance: regex(r"\bimpl\s*(?:<[^>]*>)?\s*[\w:]+\s+for\s+"),
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        decision_keywords: &["if", "else if", "for", "while", "match", "loop"],
        loop_keywords: &["for", "while", "loop"],
        word_logical_operators: &[],
        ternary: false,
        braces: true,
    }
}

fn java() -> LanguagePatterns {
    LanguagePatterns {
        name: "java",
        function: regex(
            r"(?m)(?:public|private|protected|static|final|\s)+[\w<>\[\],\s]+\s(\w+)\s*\([^)]*\)\s*\{",
        ),
        import: regex(r"(?m)^\s*import\s+[\w.]+;"),
        test_function: regex(r"@Test\b"),
        inheritance: regex(r"\bclass\s+\w+\s+extends\s+\w+|\bimplements\s+\w+"),
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        decision_keywords: &[
            "if", "else if", "for", "while", "switch", "case", "catch", "try",
        ],
        loop_keywords: &["for", "while"],
        word_logical_operators: &[],
        ternary: true,
        braces: true,
    }
}

fn go() -> LanguagePatterns {
    LanguagePatterns {
        name: "go",
        function: regex(r"\bfunc\s+(?:\([^)]*\)\s*)?(\w+)"),
        import: regex(r#"(?m)^\s*import\s|^\s+"[\w/.\-]+""#),
        test_function: regex(r"\bfunc\s+Test\w+"),
        // Go has no class inheritance; this recognizer intentionally never fires.
        inheritance: regex(r"[^\s\S]"),
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        decision_keywords: &["if", "else if", "for", "switch", "case", "select"],
        loop_keywords: &["for"],
        word_logical_operators: &[],
        ternary: false,
        braces: true,
    }
}

fn generic() -> LanguagePatterns {
    LanguagePatterns {
        name: "generic",
        function: regex(r"\bfunction\s+(\w+)|\bdef\s+(\w+)|\bfn\s+(\w+)|\bfunc\s+(\w+)"),
        import: regex(r"(?m)^\s*(?:import|use|require|include)\b"),
        test_function: regex(r"\btest\w*\s*\(|\bdef\s+test_\w+|#\[test\]"),
        inheritance: regex(r"\bextends\s+\w+|\bimplements\s+\w+"),
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        decision_keywords: &[
            "if", "else if", "for", "while", "switch", "case", "catch", "try",
        ],
        loop_keywords: &["for", "while"],
        word_logical_operators: &[],
        ternary: true,
        braces: true,
    }
}

struct Registry {
    languages: Vec<LanguagePatterns>,
    aliases: HashMap<&'static str, usize>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let languages = vec![javascript(), python(), rust_lang(), java(), go(), generic()];
    let mut aliases = HashMap::new();
    for (alias, index) in [
        ("javascript", 0),
        ("js", 0),
        ("jsx", 0),
        ("typescript", 0),
        ("ts", 0),
        ("tsx", 0),
        ("python", 1),
        ("py", 1),
        ("rust", 2),
        ("rs", 2),
        ("java", 3),
        ("go", 4),
        ("golang", 4),
    ] {
        aliases.insert(alias, index);
    }
    Registry { languages, aliases }
});

/// Look up the pattern table for a language tag.
///
/// Tags are matched case-insensitively; unrecognized tags get the generic set.
pub fn for_language(tag: &str) -> &'static LanguagePatterns {
    let registry = &*REGISTRY;
    let normalized = tag.trim().to_ascii_lowercase();
    match registry.aliases.get(normalized.as_str()) {
        Some(&index) => &registry.languages[index],
        None => registry
            .languages
            .last()
            .expect("registry always holds the generic fallback"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_resolve() {
        assert_eq!(for_language("ts").name, "javascript");
        assert_eq!(for_language("Python").name, "python");
        assert_eq!(for_language("rs").name, "rust");
    }

    #[test]
    fn unknown_tag_falls_back_to_generic() {
        assert_eq!(for_language("cobol").name, "generic");
        assert_eq!(for_language("").name, "generic");
    }

    #[test]
    fn function_patterns_capture_names() {
        let js = for_language("js");
        let caps = js.function.captures("function fetchUser(id) {").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "fetchUser");

        let py = for_language("py");
        let caps = py.function.captures("def load_config(path):").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "load_config");
    }
}
