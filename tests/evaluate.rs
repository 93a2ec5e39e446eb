use approx::assert_relative_eq;
use rfa::{parse_number, Analyzer, AnalyzerConfig, Evaluation};

fn evaluate(function: &str, at: &str) -> Evaluation {
    let analyzer = Analyzer::default();
    let result = analyzer.analyze(function).expect("analyze function");
    let value = parse_number(at).expect("parse point");
    analyzer.evaluate(&result.reduced, &value)
}

#[test]
fn steps_show_the_substitution() {
    let evaluation = evaluate("x + 1", "3");
    assert_eq!(evaluation.approx(), Some(4.0));
    assert_eq!(
        evaluation.steps(),
        vec![
            "1. Substitute x=3 into f(x) = x + 1".to_string(),
            "2. f(3) = 4".to_string(),
            "3. Approximate result: 4.0000".to_string(),
        ]
    );
}

#[test]
fn exact_fractions_survive_substitution() {
    let evaluation = evaluate("1/(x + 1)", "2");
    let Evaluation::Value { substituted, approx, .. } = evaluation else {
        panic!("evaluation failed");
    };
    assert_eq!(substituted.to_string(), "1/3");
    assert_relative_eq!(approx, 1.0 / 3.0);
}

#[test]
fn simplified_function_is_defined_at_a_hole() {
    let evaluation = evaluate("(x^2 - 1)/(x - 1)", "1");
    assert_eq!(evaluation.approx(), Some(2.0));
}

#[test]
fn evaluation_at_a_pole_fails() {
    let evaluation = evaluate("1/(x - 2)", "2");
    assert!(matches!(evaluation, Evaluation::Failed { .. }));
    assert_eq!(evaluation.steps(), vec!["Evaluation error: division by zero".to_string()]);
}

#[test]
fn precision_comes_from_the_config() {
    let analyzer = Analyzer::new(AnalyzerConfig {
        precision: 1,
        ..AnalyzerConfig::default()
    });
    let expr = analyzer.parse("x/3").unwrap();
    let evaluation = analyzer.evaluate(&expr, &parse_number("1").unwrap());
    assert_eq!(
        evaluation.steps().last().map(String::as_str),
        Some("3. Approximate result: 0.3")
    );
}
