//! Rational functions: recognition, numerator/denominator split and cancellation.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;
use tracing::debug;

use crate::expr::{one, Expr, Rational};
use crate::polynomial::Poly;
use crate::simplify::fold_constants;
use crate::solver::check_expansion;

/// True when `expr` is built only from rational constants, `var`, the four
/// arithmetic operations, negation and integer powers.
pub fn is_rational_function(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Constant(_) => true,
        Expr::Variable(v) => v == var,
        Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
            is_rational_function(a, var) && is_rational_function(b, var)
        }
        Expr::Neg(a) => is_rational_function(a, var),
        Expr::Pow(base, exp) => exp.as_integer().is_some() && is_rational_function(base, var),
        _ => false,
    }
}

/// Split into `(numerator, denominator)` without cancelling common factors.
///
/// Sums with equal denominators keep that denominator; otherwise terms are
/// cross-multiplied. Unit factors are left out of the products.
pub fn numer_denom(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Constant(c) => (
            Expr::integer(c.numer().clone()),
            Expr::integer(c.denom().clone()),
        ),
        Expr::Add(a, b) | Expr::Sub(a, b) => {
            let (na, da) = numer_denom(a);
            let (nb, db) = numer_denom(b);
            let combine = |x: Expr, y: Expr| match expr {
                Expr::Add(..) => Expr::Add(x.boxed(), y.boxed()),
                _ => Expr::Sub(x.boxed(), y.boxed()),
            };
            if da == db {
                (combine(na, nb), da)
            } else {
                let numer = combine(times(na, db.clone()), times(nb, da.clone()));
                (numer, times(da, db))
            }
        }
        Expr::Mul(a, b) => {
            let (na, da) = numer_denom(a);
            let (nb, db) = numer_denom(b);
            (times(na, nb), times(da, db))
        }
        Expr::Div(a, b) => {
            let (na, da) = numer_denom(a);
            let (nb, db) = numer_denom(b);
            (times(na, db), times(da, nb))
        }
        Expr::Neg(a) => {
            let (n, d) = numer_denom(a);
            (negate(n), d)
        }
        Expr::Pow(base, exp) => match exp.as_integer() {
            Some(k) => {
                let (n, d) = numer_denom(base);
                if k >= 0 {
                    (power(n, k), power(d, k))
                } else {
                    (power(d, -k), power(n, -k))
                }
            }
            None => (expr.clone(), one()),
        },
        _ => (expr.clone(), one()),
    }
}

fn times(a: Expr, b: Expr) -> Expr {
    if a.is_one() {
        b
    } else if b.is_one() {
        a
    } else {
        Expr::Mul(a.boxed(), b.boxed())
    }
}

fn negate(a: Expr) -> Expr {
    match a {
        Expr::Constant(c) => Expr::Constant(-c),
        other => Expr::Neg(other.boxed()),
    }
}

fn power(base: Expr, k: i64) -> Expr {
    if k == 0 || base.is_one() {
        one()
    } else if k == 1 {
        base
    } else {
        Expr::Pow(base.boxed(), Expr::integer(k).boxed())
    }
}

/// The reduced `(p, q)` with `f = p/q`: no common factor, integer
/// coefficients and a positive leading coefficient in `q`.
///
/// `None` if `expr` is not a rational function of `var`, its denominator
/// vanishes identically, or either side could expand past the degree allowed
/// by `max_degree`.
pub fn poly_ratio(expr: &Expr, var: &str, max_degree: usize) -> Option<(Poly, Poly)> {
    if !is_rational_function(expr, var) {
        return None;
    }
    let (numer, denom) = numer_denom(expr);
    if check_expansion(&numer, var, max_degree).is_err()
        || check_expansion(&denom, var, max_degree).is_err()
    {
        debug!(%expr, "too large to expand, left unreduced");
        return None;
    }
    let p = Poly::from_expr(&numer, var)?;
    let q = Poly::from_expr(&denom, var)?;
    if q.is_zero() {
        return None;
    }

    let g = Poly::gcd(&p, &q);
    let p = p.div_exact(&g)?;
    let q = q.div_exact(&g)?;

    let (content, q) = q.content_and_primitive_part();
    let p = p.scale(&content.recip());
    let scale = Rational::from_integer(denominator_lcm(&p));
    Some((p.scale(&scale), q.scale(&scale)))
}

fn denominator_lcm(poly: &Poly) -> BigInt {
    poly.coeffs
        .values()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()))
}

/// Cancel common factors of a rational function; fold constants otherwise.
///
/// A constant denominator is absorbed into the numerator, so polynomials come
/// back as polynomials.
pub fn reduce(expr: &Expr, var: &str, max_degree: usize) -> Expr {
    match poly_ratio(expr, var, max_degree) {
        Some((p, q)) if q.is_constant() => p.scale(&q.leading_coeff().recip()).to_expr(var),
        Some((p, q)) => Expr::Div(p.to_expr(var).boxed(), q.to_expr(var).boxed()),
        None => fold_constants(expr).unwrap_or_else(|_| expr.clone()),
    }
}

/// Numerator of the reduced form, if `expr` is rational.
pub fn reduced_numerator(expr: &Expr, var: &str, max_degree: usize) -> Option<Poly> {
    poly_ratio(expr, var, max_degree).map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, div, mul, pow, sub};
    use crate::parser::parse_expr;
    use crate::solver::DEFAULT_MAX_DEGREE;

    fn parse(text: &str) -> Expr {
        parse_expr(text).unwrap()
    }

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn recognises_rational_functions() {
        assert!(is_rational_function(&parse("(x^2 - 1)/(x - 1)"), "x"));
        assert!(is_rational_function(&parse("x^-2 + 3"), "x"));
        assert!(!is_rational_function(&parse("sqrt(x)/x"), "x"));
        assert!(!is_rational_function(&parse("x^(1/2)"), "x"));
        assert!(!is_rational_function(&parse("x + y"), "x"));
    }

    #[test]
    fn split_keeps_factors_uncancelled() {
        let (n, d) = numer_denom(&parse("(x^2 - 1)/(x - 1)"));
        assert_eq!(n, sub(pow(x(), Expr::integer(2)), Expr::integer(1)));
        assert_eq!(d, sub(x(), Expr::integer(1)));
    }

    #[test]
    fn split_cross_multiplies_sums() {
        let (n, d) = numer_denom(&parse("1/x + 1/(x + 1)"));
        assert_eq!(n, add(add(x(), Expr::integer(1)), x()));
        assert_eq!(d, mul(x(), add(x(), Expr::integer(1))));
    }

    #[test]
    fn split_shares_equal_denominators() {
        let (n, d) = numer_denom(&parse("x/(x - 2) + 3/(x - 2)"));
        assert_eq!(n, add(x(), Expr::integer(3)));
        assert_eq!(d, sub(x(), Expr::integer(2)));
    }

    #[test]
    fn negative_powers_swap_parts() {
        let (n, d) = numer_denom(&parse("x^-2"));
        assert_eq!(n, Expr::integer(1));
        assert_eq!(d, pow(x(), Expr::integer(2)));
    }

    #[test]
    fn polynomial_split_has_unit_denominator() {
        let (_, d) = numer_denom(&parse("x^3 - 2*x + 5"));
        assert!(d.is_one());
    }

    #[test]
    fn reduce_cancels_common_factor() {
        assert_eq!(
            reduce(&parse("(x^2 - 1)/(x - 1)"), "x", DEFAULT_MAX_DEGREE),
            add(x(), Expr::integer(1))
        );
        assert_eq!(
            reduce(&parse("(x - 2)/((x - 2)*(x + 3))"), "x", DEFAULT_MAX_DEGREE),
            div(Expr::integer(1), add(x(), Expr::integer(3)))
        );
    }

    #[test]
    fn reduce_clears_fractions() {
        assert_eq!(
            reduce(&parse("(x/2)/(x + 1/3)"), "x", DEFAULT_MAX_DEGREE),
            div(
                mul(Expr::integer(3), x()),
                add(mul(Expr::integer(6), x()), Expr::integer(2))
            )
        );
    }

    #[test]
    fn oversized_powers_are_left_unreduced() {
        let expr = parse("(x + 1)/(x + 1)^1000");
        assert!(poly_ratio(&expr, "x", DEFAULT_MAX_DEGREE).is_none());
        assert_eq!(reduce(&expr, "x", DEFAULT_MAX_DEGREE), expr);
        assert!(poly_ratio(&parse("1/(x + 1)^100"), "x", DEFAULT_MAX_DEGREE).is_some());
    }

    #[test]
    fn reduce_folds_non_rational_input() {
        assert_eq!(
            reduce(&parse("sqrt(x) + 2*3"), "x", DEFAULT_MAX_DEGREE),
            add(Expr::Sqrt(x().boxed()), Expr::integer(6))
        );
    }
}
