use approx::assert_relative_eq;
use rfa::{classify_discontinuities, parse_expr};
use rfa::rational::reduce;

fn classify(input: &str) -> (Vec<f64>, Vec<(f64, f64)>) {
    let original = parse_expr(input).expect("parse function");
    let reduced = reduce(&original, "x", 64);
    classify_discontinuities(&original, &reduced, "x", 64)
}

#[test]
fn cancelled_linear_factor_is_a_hole() {
    let (asymptotes, holes) = classify("(x^2 - 1)/(x - 1)");
    assert!(asymptotes.is_empty());
    assert_eq!(holes, vec![(1.0, 2.0)]);
}

#[test]
fn surviving_factor_is_an_asymptote() {
    let (asymptotes, holes) = classify("(2*x + 1)/(x - 3)");
    assert_eq!(asymptotes, vec![3.0]);
    assert!(holes.is_empty());
}

#[test]
fn holes_and_asymptotes_together() {
    let (asymptotes, holes) = classify("(x + 2)*(x - 1)/((x + 2)*x*(x - 4))");
    assert_eq!(asymptotes, vec![0.0, 4.0]);
    assert_eq!(holes.len(), 1);
    assert_relative_eq!(holes[0].0, -2.0);
    assert_relative_eq!(holes[0].1, -0.25);
}

#[test]
fn irrational_hole_takes_a_float_value() {
    let (asymptotes, holes) = classify("(x^2 - 2)/((x^2 - 2)*(x + 1))");
    assert_eq!(asymptotes, vec![-1.0]);
    assert_eq!(holes.len(), 2);
    assert_relative_eq!(holes[0].0, -(2f64.sqrt()), epsilon = 1e-12);
    assert_relative_eq!(holes[1].1, 1.0 / (2f64.sqrt() + 1.0), epsilon = 1e-12);
}

#[test]
fn polynomials_have_no_discontinuities() {
    assert_eq!(classify("x^2 + 1"), (Vec::new(), Vec::new()));
}
