use rfa::{format_real_subset, parse_expr, resolve_domain, Real, RealSubset};

const MAX_DEGREE: usize = 64;

fn domain(input: &str) -> (RealSubset, String) {
    let expr = parse_expr(input).expect("parse function");
    resolve_domain(&expr, "x", MAX_DEGREE)
}

#[test]
fn polynomial_has_no_restrictions() {
    let (set, steps) = domain("x^3 - 2*x + 7");
    assert_eq!(set, RealSubset::WholeLine);
    assert_eq!(
        steps,
        "The function is a polynomial, so it has no restrictions.\nThe domain is all real numbers."
    );
}

#[test]
fn single_pole_is_excluded() {
    let (set, steps) = domain("1/(x - 2)");
    assert_eq!(format_real_subset(&set), "(-∞, 2) ∪ (2, ∞)");
    assert_eq!(
        steps,
        [
            "1. To find the domain, look for restrictions in the denominator: x - 2.",
            "2. Solve the equation x - 2 = 0 to find the values x cannot take.",
            "3. The solutions are: x = 2.",
            "4. Therefore, the domain is all real numbers except these points.",
        ]
        .join("\n")
    );
}

#[test]
fn cancelled_factor_still_restricts_the_domain() {
    let (set, _) = domain("(x^2 - 1)/(x - 1)");
    assert!(!set.contains(&Real::integer(1)));
    assert!(set.contains(&Real::integer(-1)));
    assert_eq!(format_real_subset(&set), "(-∞, 1) ∪ (1, ∞)");
}

#[test]
fn denominator_without_real_zeros() {
    let (set, steps) = domain("1/(x^2 + 1)");
    assert_eq!(set, RealSubset::WholeLine);
    assert!(steps.contains("3. The denominator is never zero, so there are no restrictions."));
    assert!(steps.ends_with("The domain is all real numbers."));
}

#[test]
fn irrational_poles_are_listed_exactly() {
    let (set, steps) = domain("x/(x^2 - 2)");
    assert!(steps.contains("3. The solutions are: x = -sqrt(2), sqrt(2)."));
    assert_eq!(
        format_real_subset(&set),
        "(-∞, -sqrt(2)) ∪ (-sqrt(2), sqrt(2)) ∪ (sqrt(2), ∞)"
    );
}
