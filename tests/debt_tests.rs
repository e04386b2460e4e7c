use indoc::indoc;
use pretty_assertions::assert_eq;
use qualitrend::*;

fn analyze(code: &str, language: &str) -> TechnicalDebtAnalysis {
    let metrics = MetricExtractor::new().calculate(code, language, "test.src", None);
    DebtModeler::new().analyze(code, language, "test.src", &metrics)
}

#[test]
fn principal_table_holds_for_all_type_severity_pairs() {
    let expected_base = [
        (DebtType::CodeSmell, 50.0),
        (DebtType::DesignIssue, 100.0),
        (DebtType::Bug, 150.0),
        (DebtType::Vulnerability, 300.0),
        (DebtType::PerformanceIssue, 120.0),
    ];
    let expected_multiplier = [
        (DebtSeverity::Low, 1.0),
        (DebtSeverity::Medium, 2.0),
        (DebtSeverity::High, 3.0),
        (DebtSeverity::Critical, 5.0),
    ];

    for (debt_type, base) in expected_base {
        for (severity, multiplier) in expected_multiplier {
            let item = TechnicalDebtItem::new(
                debt_type,
                severity,
                "fixture",
                DebtLocation::at_line("fixture.js", 1),
            );
            assert_eq!(
                item.principal,
                base * multiplier,
                "principal mismatch for {debt_type:?}/{severity:?}"
            );
        }
    }
}

#[test]
fn interest_rates_default_per_type() {
    let expected = [
        (DebtType::CodeSmell, 0.05),
        (DebtType::DesignIssue, 0.08),
        (DebtType::Bug, 0.15),
        (DebtType::Vulnerability, 0.25),
        (DebtType::PerformanceIssue, 0.10),
    ];
    for (debt_type, rate) in expected {
        let item = TechnicalDebtItem::new(
            debt_type,
            DebtSeverity::Low,
            "fixture",
            DebtLocation::whole_file("fixture.js"),
        );
        assert_eq!(item.interest_rate, rate);
    }
}

#[test]
fn priority_is_type_weight_times_severity_weight() {
    let smell = TechnicalDebtItem::new(
        DebtType::CodeSmell,
        DebtSeverity::Low,
        "fixture",
        DebtLocation::at_line("a.js", 1),
    );
    let vuln = TechnicalDebtItem::new(
        DebtType::Vulnerability,
        DebtSeverity::Critical,
        "fixture",
        DebtLocation::at_line("a.js", 2),
    );
    assert_eq!(smell.priority, 1.0);
    assert_eq!(vuln.priority, 15.0);
    assert!(vuln.priority > smell.priority);
}

#[test]
fn monthly_interest_sums_principal_times_rate() {
    let code = indoc! {"
        // TODO: tidy this up
        const password = \"hunter2\";
    "};
    let analysis = analyze(code, "javascript");

    let expected: f64 = analysis
        .items
        .iter()
        .map(|i| i.principal * i.interest_rate)
        .sum();
    assert!((analysis.monthly_interest - (expected * 100.0).round() / 100.0).abs() < 1e-9);
    assert!(analysis.monthly_interest > 0.0);
}

#[test]
fn debt_ratio_is_principal_per_line() {
    let code = "const password = \"hunter2\";\nconst x = 1;\nconst y = 2;\n";
    let analysis = analyze(code, "javascript");

    assert!(analysis.total_debt > 0.0);
    let expected = (analysis.total_debt / 3.0 * 100.0 * 100.0).round() / 100.0;
    assert!((analysis.debt_ratio - expected).abs() < 1e-9);
}

#[test]
fn vulnerabilities_drive_high_risk() {
    let code = indoc! {"
        const result = eval(userInput);
        const password = \"hunter2\";
    "};
    let analysis = analyze(code, "javascript");

    let vulns = analysis
        .items
        .iter()
        .filter(|i| i.debt_type == DebtType::Vulnerability)
        .count();
    assert!(vulns > 1);
    assert_eq!(analysis.risk_assessment.overall, RiskLevel::High);
    assert_eq!(analysis.risk_assessment.security, RiskLevel::High);
}

#[test]
fn clean_code_is_low_risk_with_no_items() {
    let code = indoc! {"
        function add(first, second) {
            return first + second;
        }
    "};
    let analysis = analyze(code, "javascript");

    assert!(analysis.items.is_empty());
    assert_eq!(analysis.total_debt, 0.0);
    assert_eq!(analysis.risk_assessment.overall, RiskLevel::Low);
    assert_eq!(
        analysis.recommendations,
        vec!["No technical debt detected; keep current practices.".to_string()]
    );
}

#[test]
fn priority_items_are_high_or_critical_sorted_and_capped() {
    // 12 swallowed exceptions produce more than the priority cap of high items
    let code = "try { x(); } catch (e) {}\n".repeat(12);
    let analysis = analyze(&code, "javascript");

    assert!(analysis.priority_items.len() <= 10);
    assert!(!analysis.priority_items.is_empty());
    for pair in analysis.priority_items.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    for item in &analysis.priority_items {
        assert!(matches!(
            item.severity,
            DebtSeverity::High | DebtSeverity::Critical
        ));
    }
}

#[test]
fn todo_markers_become_code_smell_items() {
    let code = "// TODO: replace this placeholder\nconst x = 1;\n";
    let analysis = analyze(code, "javascript");

    let todos: Vec<_> = analysis
        .items
        .iter()
        .filter(|i| i.debt_type == DebtType::CodeSmell)
        .collect();
    assert!(!todos.is_empty());
    assert_eq!(todos[0].location.line, Some(1));
}

#[test]
fn design_issues_come_from_metric_thresholds() {
    // enough branching to push cyclomatic complexity past 20
    let branch = "if (a) { b(); } else if (c) { d(); }\n";
    let code = branch.repeat(12);
    let analysis = analyze(&code, "javascript");

    assert!(analysis
        .items
        .iter()
        .any(|i| i.debt_type == DebtType::DesignIssue && i.severity == DebtSeverity::High));
}

#[test]
fn payoff_time_uses_twenty_hour_months() {
    let code = "const password = \"hunter2\";\n";
    let analysis = analyze(code, "javascript");

    let hours: f64 = analysis.items.iter().map(|i| i.estimated_fix_time).sum();
    assert_eq!(
        analysis.estimated_payoff_time,
        (hours / 20.0).ceil() as u32
    );
}
