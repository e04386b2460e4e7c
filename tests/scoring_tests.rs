use indoc::indoc;
use pretty_assertions::assert_eq;
use qualitrend::*;

fn score_source(code: &str) -> QualityScore {
    let extractor = MetricExtractor::new();
    let metrics = extractor.calculate(code, "javascript", "test.js", None);
    let debt = DebtModeler::new().analyze(code, "javascript", "test.js", &metrics);
    Scorer::new().score(&metrics, Some(&debt), None)
}

#[test]
fn breakdown_dimensions_stay_in_band() {
    let code = indoc! {r#"
        function process(input) {
            const result = eval(input);
            for (let i = 0; i < result.length; i++) {
                for (let j = 0; j < result.length; j++) {
                    total += result[i][j];
                }
            }
            return total;
        }
    "#};
    let score = score_source(code);

    for value in [
        score.breakdown.maintainability,
        score.breakdown.complexity,
        score.breakdown.security,
        score.breakdown.performance,
        score.breakdown.reliability,
        score.breakdown.testability,
        score.breakdown.documentation,
        score.overall_score,
        score.confidence,
    ] {
        assert!((0.0..=100.0).contains(&value), "out of band: {value}");
    }
    assert_eq!(score.grade, QualityGrade::from_score(score.overall_score));
}

#[test]
fn weighted_composite_uses_fixed_weights() {
    let score = score_source("const x = 1;\n");
    let b = &score.breakdown;
    let expected = b.maintainability * 0.25
        + b.complexity * 0.20
        + b.security * 0.20
        + b.performance * 0.15
        + b.reliability * 0.10
        + b.testability * 0.05
        + b.documentation * 0.05;

    assert!((score.weighted_score - expected).abs() < 1e-9);
    assert_eq!(score.overall_score, (expected * 100.0).round() / 100.0);
}

#[test]
fn security_findings_lower_the_security_dimension() {
    let clean = score_source("const value = transform(input);\n");
    let risky = score_source("const value = eval(input);\n");

    assert!(risky.breakdown.security < clean.breakdown.security);
}

#[test]
fn saturated_deductions_floor_at_zero() {
    let code = indoc! {r#"
        eval(a); eval(b); eval(c);
        const password = "hunter2";
        db.query("SELECT x FROM t WHERE id = '" + id + "'");
    "#};
    let score = score_source(code);

    // 5 findings, a 75 vulnerability score, and 3 priced vulnerabilities
    // deduct more than 100 points; the dimension clamps instead of going negative
    assert_eq!(score.breakdown.security, 0.0);
    assert!(score.overall_score >= 0.0);
}

#[test]
fn confidence_penalizes_small_files_and_missing_debt() {
    let small_code = "const x = 1;\n";
    let extractor = MetricExtractor::new();
    let metrics = extractor.calculate(small_code, "javascript", "tiny.js", None);
    let scorer = Scorer::new();

    let without_debt = scorer.score(&metrics, None, None);
    let debt = DebtModeler::new().analyze(small_code, "javascript", "tiny.js", &metrics);
    let with_debt = scorer.score(&metrics, Some(&debt), None);

    // a one-line file loses 30 for size; skipping debt analysis costs 10 more
    assert!(without_debt.confidence <= 70.0);
    assert_eq!(with_debt.confidence, without_debt.confidence + 10.0);
}

#[test]
fn trend_compares_against_previous_with_dead_band() {
    let code = "const x = compute();\n";
    let extractor = MetricExtractor::new();
    let metrics = extractor.calculate(code, "javascript", "test.js", None);
    let scorer = Scorer::new();
    let current = scorer.score(&metrics, None, None);

    let slightly_lower = QualityScore {
        overall_score: current.overall_score - 1.5,
        ..QualityScore::default()
    };
    let much_lower = QualityScore {
        overall_score: current.overall_score - 15.0,
        ..QualityScore::default()
    };
    let much_higher = QualityScore {
        overall_score: current.overall_score + 15.0,
        ..QualityScore::default()
    };

    assert_eq!(
        scorer.score(&metrics, None, Some(&slightly_lower)).trend,
        TrendDirection::Stable
    );
    assert_eq!(
        scorer.score(&metrics, None, Some(&much_lower)).trend,
        TrendDirection::Improving
    );
    assert_eq!(
        scorer.score(&metrics, None, Some(&much_higher)).trend,
        TrendDirection::Declining
    );
}

#[test]
fn compare_empty_scores_returns_neutral_result() {
    let comparison = compare_quality_scores(&[]);

    assert!(comparison.comparison.is_empty());
    assert_eq!(comparison.trend, TrendDirection::Stable);
    assert_eq!(comparison.average, 0.0);
    assert_eq!(comparison.best, 0.0);
    assert_eq!(comparison.worst, 0.0);
}

#[test]
fn compare_single_score_echoes_it() {
    let single = QualityScore {
        overall_score: 82.5,
        grade: QualityGrade::B,
        ..QualityScore::default()
    };
    let comparison = compare_quality_scores(&[single]);

    assert_eq!(comparison.comparison.len(), 1);
    assert_eq!(comparison.trend, TrendDirection::Stable);
    assert_eq!(comparison.average, 82.5);
    assert_eq!(comparison.best, 82.5);
    assert_eq!(comparison.worst, 82.5);
}

#[test]
fn compare_many_scores_tracks_first_to_last() {
    let scores: Vec<QualityScore> = [60.0, 70.0, 80.0]
        .iter()
        .map(|&overall| QualityScore {
            overall_score: overall,
            grade: QualityGrade::from_score(overall),
            ..QualityScore::default()
        })
        .collect();
    let comparison = compare_quality_scores(&scores);

    assert_eq!(comparison.trend, TrendDirection::Improving);
    assert_eq!(comparison.average, 70.0);
    assert_eq!(comparison.best, 80.0);
    assert_eq!(comparison.worst, 60.0);
}

#[test]
fn low_dimensions_generate_recommendations() {
    let code = indoc! {r#"
        function handler(req) {
            const q = eval(req.body);
            db.query("SELECT name FROM users WHERE id = '" + q + "'");
        }
    "#};
    let score = score_source(code);

    assert!(score.breakdown.security < 70.0);
    assert!(!score.recommendations.is_empty());
    assert!(score
        .recommendations
        .iter()
        .any(|r| r.contains("security") || r.contains("injection") || r.contains("risky")));
    assert!(!score.next_steps.is_empty());
}

#[test]
fn benchmark_deltas_are_relative_to_baselines() {
    let score = score_source("const value = 1;\n");

    assert_eq!(
        score.benchmark.industry,
        ((score.overall_score - 75.0) * 100.0).round() / 100.0
    );
    assert_eq!(
        score.benchmark.project,
        ((score.overall_score - 70.0) * 100.0).round() / 100.0
    );
    assert_eq!(
        score.benchmark.team,
        ((score.overall_score - 72.0) * 100.0).round() / 100.0
    );
}
