use num_traits::Zero;
use rfa::{parse_expr, Poly, Rational, Real};

fn poly(input: &str) -> Poly {
    let expr = parse_expr(input).expect("parse polynomial");
    Poly::from_expr(&expr, "x").expect("build polynomial")
}

#[test]
fn division_leaves_no_remainder_on_a_factor() {
    let (quotient, remainder) = poly("x^3 - 8").div_rem(&poly("x - 2"));
    assert!(remainder.is_zero());
    assert_eq!(quotient, poly("x^2 + 2*x + 4"));
}

#[test]
fn gcd_finds_the_cancellable_factor() {
    let numerator = poly("x^2 - 1");
    let denominator = poly("2*x - 2");
    assert_eq!(Poly::gcd(&numerator, &denominator), poly("x - 1"));
}

#[test]
fn content_is_pulled_out_with_sign() {
    let polynomial = poly("-3/2*x^2 + 3");
    let (content, primitive) = polynomial.content_and_primitive_part();
    assert_eq!(content, Rational::new((-3).into(), 2.into()));
    assert_eq!(primitive, poly("x^2 - 2"));
    assert_eq!(primitive.scale(&content), polynomial);
}

#[test]
fn content_of_zero_is_zero() {
    let (content, primitive) = poly("0").content_and_primitive_part();
    assert!(content.is_zero());
    assert!(primitive.is_zero());
}

#[test]
fn square_free_parts_carry_multiplicity() {
    let parts = poly("(x - 1)^2*(x + 3)").square_free_decomposition();
    assert_eq!(parts, vec![(poly("x + 3"), 1), (poly("x - 1"), 2)]);
}

#[test]
fn multiplicity_of_a_root() {
    let polynomial = poly("(x - 2)^3*(x + 1)");
    assert_eq!(polynomial.root_multiplicity(&Real::integer(2)), 3);
    assert_eq!(polynomial.root_multiplicity(&Real::integer(-1)), 1);
    assert_eq!(polynomial.root_multiplicity(&Real::integer(0)), 0);
}

#[test]
fn expression_form_is_descending() {
    assert_eq!(poly("1 - x + 3*x^2").to_expr("x").to_string(), "3*x^2 - x + 1");
    assert_eq!(poly("x^2/4").to_expr("t").to_string(), "t^2/4");
}

#[test]
fn non_polynomials_are_refused() {
    for input in ["1/x", "sqrt(x)", "x^(1/2)", "x^-1"] {
        let expr = parse_expr(input).unwrap();
        assert!(Poly::from_expr(&expr, "x").is_none(), "{input}");
    }
}

#[test]
fn division_by_constants_is_polynomial() {
    assert_eq!(poly("(x + 1)/2"), poly("1/2*x + 1/2"));
}

#[test]
fn degree_bound_reads_the_tree() {
    let bound = |input: &str| parse_expr(input).unwrap().degree_bound("x");
    assert_eq!(bound("(x + 1)^1000"), 1000);
    assert_eq!(bound("1/(x + 1)^100"), 100);
    assert_eq!(bound("x^3 + x^2 + x + 1"), 3);
    assert_eq!(bound("1/x + 1/x^2"), 3);
    assert_eq!(bound("(x - 1)*(x + 2)^2"), 3);
    assert_eq!(bound("sqrt(2)*y"), 0);
}
