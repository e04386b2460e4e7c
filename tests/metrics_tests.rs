use indoc::indoc;
use pretty_assertions::assert_eq;
use qualitrend::*;

fn extract(code: &str, language: &str) -> QualityMetrics {
    MetricExtractor::new().calculate(code, language, "test.src", None)
}

#[test]
fn empty_source_yields_defined_minimal_result() {
    let metrics = extract("", "javascript");

    assert_eq!(metrics.lines_of_code, 0);
    assert_eq!(metrics.comment_lines, 0);
    assert_eq!(metrics.complexity, 1.0);
    assert_eq!(metrics.maintainability_index, 100.0);
    assert!(metrics.overall_quality_score > 0.0);
}

#[test]
fn whitespace_only_source_counts_as_empty() {
    let metrics = extract("   \n\t\n  \n", "python");
    assert_eq!(metrics.lines_of_code, 0);
    assert_eq!(metrics.maintainability_index, 100.0);
}

#[test]
fn all_bounded_scores_stay_in_band() {
    let code = indoc! {r#"
        // a messy module on purpose
        function process(data) {
            let result = eval(data.raw);
            for (let i = 0; i < data.rows.length; i++) {
                for (let j = 0; j < data.cols.length; j++) {
                    if (data.grid[i][j] && result) {
                        result += data.grid[i][j];
                    }
                }
            }
            return result;
        }
    "#};
    let metrics = extract(code, "javascript");

    for value in [
        metrics.maintainability_index,
        metrics.cohesion,
        metrics.naming_convention_score,
        metrics.comment_quality_score,
        metrics.technical_debt_ratio,
        metrics.duplication_ratio,
        metrics.memory_usage,
        metrics.vulnerability_score,
        metrics.test_coverage,
        metrics.test_quality_score,
        metrics.error_handling_score,
        metrics.resource_management_score,
        metrics.overall_quality_score,
    ] {
        assert!((0.0..=100.0).contains(&value), "out of band: {value}");
    }
}

#[test]
fn grade_matches_documented_thresholds() {
    assert_eq!(QualityGrade::from_score(95.0), QualityGrade::A);
    assert_eq!(QualityGrade::from_score(90.0), QualityGrade::A);
    assert_eq!(QualityGrade::from_score(89.99), QualityGrade::B);
    assert_eq!(QualityGrade::from_score(80.0), QualityGrade::B);
    assert_eq!(QualityGrade::from_score(70.0), QualityGrade::C);
    assert_eq!(QualityGrade::from_score(60.0), QualityGrade::D);
    assert_eq!(QualityGrade::from_score(59.99), QualityGrade::F);
    assert_eq!(QualityGrade::from_score(0.0), QualityGrade::F);
}

#[test]
fn deeper_loop_nesting_never_lowers_complexity() {
    let single = indoc! {"
        function walk(items) {
            for (const item of items) {
                use(item);
            }
        }
    "};
    let double = indoc! {"
        function walk(grid) {
            for (const row of grid) {
                for (const cell of row) {
                    use(cell);
                }
            }
        }
    "};

    let flat = extract(single, "javascript");
    let nested = extract(double, "javascript");

    assert!(nested.cyclomatic_complexity >= flat.cyclomatic_complexity);
    assert!(nested.cognitive_complexity >= flat.cognitive_complexity);
    assert_eq!(nested.algorithmic_complexity, AlgorithmicComplexity::Quadratic);
    assert_eq!(flat.algorithmic_complexity, AlgorithmicComplexity::Linear);
}

#[test]
fn injecting_eval_never_lowers_security_findings() {
    let clean = "const value = transform(input);\n";
    let risky = "const value = transform(eval(input));\n";

    let before = extract(clean, "javascript");
    let after = extract(risky, "javascript");

    assert!(after.security_issues >= before.security_issues);
    assert!(after.vulnerability_score >= before.vulnerability_score);
    assert!(after.security_issues > 0);
}

#[test]
fn halstead_formulas_hold() {
    let metrics = extract("let total = base + bonus * rate;\n", "javascript");
    let h = &metrics.halstead;

    assert!(h.vocabulary > 0);
    assert!(h.length >= h.vocabulary);
    let expected_volume = h.length as f64 * (h.vocabulary as f64).log2();
    assert!((h.volume - expected_volume).abs() < 1e-9);
    assert!((h.time - h.effort / 18.0).abs() < 1e-9);
    assert!((h.bugs - h.volume / 3000.0).abs() < 1e-9);
}

#[test]
fn comments_are_counted_per_language() {
    let js = indoc! {"
        // leading note
        const x = 1;
        /* block */
        const y = 2;
    "};
    assert_eq!(extract(js, "javascript").comment_lines, 2);

    let py = indoc! {"
        # leading note
        x = 1
        y = 2
    "};
    assert_eq!(extract(py, "python").comment_lines, 1);
}

#[test]
fn previous_metrics_bias_the_trend_only() {
    let code = indoc! {"
        function add(a, b) {
            return a + b;
        }
    "};
    let first = extract(code, "javascript");

    let mut weak_previous = first.clone();
    weak_previous.overall_quality_score = first.overall_quality_score - 20.0;
    let biased =
        MetricExtractor::new().calculate(code, "javascript", "test.src", Some(&weak_previous));

    assert_eq!(biased.quality_trend, TrendDirection::Improving);
    assert_eq!(biased.overall_quality_score, first.overall_quality_score);
}

#[test]
fn threshold_overrides_merge_shallowly() {
    let mut extractor = MetricExtractor::new();
    let default_coverage = extractor.thresholds().test_coverage;

    extractor.update_thresholds(ThresholdOverrides {
        cyclomatic_complexity: Some(ThresholdBands::new(2.0, 4.0, 8.0, 16.0)),
        ..Default::default()
    });

    assert_eq!(extractor.thresholds().cyclomatic_complexity.excellent, 2.0);
    assert_eq!(extractor.thresholds().test_coverage, default_coverage);
}

#[test]
fn tightened_complexity_band_lowers_the_overall_score() {
    let code = indoc! {"
        function route(kind) {
            if (kind === 1) { return a(); }
            if (kind === 2) { return b(); }
            return c();
        }
    "};
    let relaxed = extract(code, "javascript").overall_quality_score;

    let mut strict = MetricExtractor::new();
    strict.update_thresholds(ThresholdOverrides {
        cyclomatic_complexity: Some(ThresholdBands::new(1.0, 2.0, 3.0, 4.0)),
        ..Default::default()
    });
    let tightened = strict
        .calculate(code, "javascript", "test.src", None)
        .overall_quality_score;

    assert!(tightened < relaxed);
}

#[test]
fn unknown_language_still_produces_metrics() {
    let metrics = extract("if something then other end\n", "lua");
    assert!(metrics.lines_of_code > 0);
    assert!(metrics.cyclomatic_complexity >= 2.0);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn scores_bounded_for_arbitrary_text(code in "[ -~\n]{0,400}") {
            let metrics = extract(&code, "javascript");

            prop_assert!((0.0..=100.0).contains(&metrics.maintainability_index));
            prop_assert!((0.0..=100.0).contains(&metrics.overall_quality_score));
            prop_assert!((0.0..=100.0).contains(&metrics.vulnerability_score));
            prop_assert!((0.0..=100.0).contains(&metrics.cohesion));
            prop_assert!(metrics.cyclomatic_complexity >= 1.0);
            prop_assert_eq!(
                metrics.quality_grade,
                QualityGrade::from_score(metrics.overall_quality_score)
            );
        }
    }
}
