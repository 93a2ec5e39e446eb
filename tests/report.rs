use rfa::{parse_number, render_report, Analyzer};

#[test]
fn full_report_layout() {
    let result = Analyzer::default()
        .analyze("(x^2 - 1)/(x - 1)")
        .expect("analyze function");
    let report = render_report(&result, None);
    let expected = "\
--- FUNCTION ANALYSIS ---
Original function: f(x) = (x^2 - 1)/(x - 1)
Simplified function: f(x) = x + 1

 • Domain: (-∞, 1) ∪ (1, ∞)
 • Range: All real numbers (-∞, ∞)
 • X-intercepts: (-1, 0)
 • Y-intercept: (0, 1)
 • Vertical asymptotes: None
 • Holes (discontinuities): at (1, 2.00)

--- DOMAIN JUSTIFICATION ---
1. To find the domain, look for restrictions in the denominator: x - 1.
2. Solve the equation x - 1 = 0 to find the values x cannot take.
3. The solutions are: x = 1.
4. Therefore, the domain is all real numbers except these points.
";
    assert_eq!(report, expected);
}

#[test]
fn evaluation_section_follows_the_report() {
    let analyzer = Analyzer::default();
    let result = analyzer.analyze("1/(x - 2)").unwrap();
    let point = parse_number("0.5").unwrap();
    let evaluation = analyzer.evaluate(&result.reduced, &point);
    let report = render_report(&result, Some((&point, &evaluation)));

    assert!(report.contains(" • Vertical asymptotes: x = 2\n"));
    assert!(report.contains(" • Y-intercept: (0, -0.5)\n"));
    assert!(report.contains(" • X-intercepts: None\n"));
    let section = report
        .split("--- EVALUATION AT x = 0.5 ---\n")
        .nth(1)
        .expect("evaluation section");
    assert_eq!(
        section,
        "1. Substitute x=0.5 into f(x) = 1/(x - 2)\n2. f(0.5) = -2/3\n3. Approximate result: -0.6667\n"
    );
}

#[test]
fn uncomputable_range_gives_the_reason() {
    let result = Analyzer::default().analyze("log(x)").unwrap();
    let report = render_report(&result, None);
    assert!(report.contains(
        " • Range: Could not be computed (range is only computed for rational functions)\n"
    ));
    assert!(report.contains("The function is a polynomial, so it has no restrictions."));
}
