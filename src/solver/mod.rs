//! Root finding for univariate polynomials over Q.
//!
//! Roots are exact whenever they are rational or quadratic surds; other
//! irreducible factors fall back to Durand–Kerner iteration.

mod numeric;
mod quadratic;
mod rational_roots;

use std::cmp::Ordering;

use num_complex::Complex64;
use tracing::trace;

use crate::error::SolveError;
use crate::expr::Expr;
use crate::number::Real;
use crate::polynomial::{expansion_limit, Poly};

pub use quadratic::squarefree_split;

/// Default cap on the degree handed to the solver.
pub const DEFAULT_MAX_DEGREE: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub enum Root {
    Real(Real),
    Complex(Complex64),
}

impl Root {
    pub fn is_real(&self) -> bool {
        matches!(self, Root::Real(_))
    }
}

/// All distinct roots of `poly`, real roots first in ascending order.
///
/// The degree cap applies to each square-free part, so repeated factors do
/// not count against it. The whole polynomial must stay within
/// [`expansion_limit`].
pub fn solve_polynomial(poly: &Poly, max_degree: usize) -> Result<Vec<Root>, SolveError> {
    let degree = match poly.degree() {
        None => return Err(SolveError::ZeroPolynomial),
        Some(d) => d,
    };
    if degree > expansion_limit(max_degree) {
        return Err(SolveError::DegreeTooHigh {
            degree,
            limit: max_degree,
        });
    }

    let parts = poly.square_free_decomposition();
    if let Some(degree) = parts
        .iter()
        .filter_map(|(part, _)| part.degree())
        .find(|&d| d > max_degree)
    {
        return Err(SolveError::DegreeTooHigh {
            degree,
            limit: max_degree,
        });
    }

    let mut roots = Vec::new();
    for (part, multiplicity) in parts {
        trace!(%part, multiplicity, "solving square-free part");
        solve_square_free(part, &mut roots)?;
    }

    let (mut reals, complex): (Vec<Root>, Vec<Root>) = roots.into_iter().partition(Root::is_real);
    reals.sort_by(|a, b| match (a, b) {
        (Root::Real(x), Root::Real(y)) => x.cmp_value(y),
        _ => Ordering::Equal,
    });
    reals.dedup_by(|a, b| match (a, b) {
        (Root::Real(x), Root::Real(y)) => x.same_value(y),
        _ => false,
    });
    reals.extend(complex);
    Ok(reals)
}

/// Distinct real roots of `poly` in ascending order.
pub fn real_roots(poly: &Poly, max_degree: usize) -> Result<Vec<Real>, SolveError> {
    Ok(solve_polynomial(poly, max_degree)?
        .into_iter()
        .filter_map(|root| match root {
            Root::Real(r) => Some(r),
            Root::Complex(_) => None,
        })
        .collect())
}

/// Real solutions of `expr = 0` for a polynomial expression in `var`.
pub fn solve_expr(expr: &Expr, var: &str, max_degree: usize) -> Result<Vec<Real>, SolveError> {
    check_expansion(expr, var, max_degree)?;
    let poly =
        Poly::from_expr(expr, var).ok_or_else(|| SolveError::NotPolynomial(expr.to_string()))?;
    real_roots(&poly, max_degree)
}

/// Refuse expressions whose expansion could exceed [`expansion_limit`],
/// before any polynomial arithmetic happens.
pub fn check_expansion(expr: &Expr, var: &str, max_degree: usize) -> Result<(), SolveError> {
    let bound = expr.degree_bound(var);
    let limit = expansion_limit(max_degree);
    if bound > limit {
        Err(SolveError::ExpansionTooLarge { bound, limit })
    } else {
        Ok(())
    }
}

fn solve_square_free(part: Poly, roots: &mut Vec<Root>) -> Result<(), SolveError> {
    let mut stack = vec![part];
    while let Some(current) = stack.pop() {
        let degree = match current.degree() {
            Some(d) if d > 0 => d,
            _ => continue,
        };

        if let Some(root) = rational_roots::find_rational_root(&current) {
            let quotient = current
                .div_exact(&Poly::linear(root.clone()))
                .unwrap_or_else(Poly::one);
            roots.push(Root::Real(Real::Rational(root)));
            stack.push(quotient);
            continue;
        }

        match degree {
            2 => roots.extend(quadratic::quadratic_roots(&current)),
            4 => match rational_roots::split_quartic(&current) {
                Some((a, b)) => {
                    stack.push(a);
                    stack.push(b);
                }
                None => roots.extend(numeric::numeric_roots(&current)?),
            },
            _ => roots.extend(numeric::numeric_roots(&current)?),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::parser::parse_expr;

    fn poly(text: &str) -> Poly {
        Poly::from_expr(&parse_expr(text).unwrap(), "x").unwrap()
    }

    #[test]
    fn repeated_roots_are_reported_once() {
        let roots = real_roots(&poly("(x - 1)^3*(x + 2)"), DEFAULT_MAX_DEGREE).unwrap();
        assert_eq!(
            roots,
            vec![Real::integer(-2), Real::integer(1)]
        );
    }

    #[test]
    fn zero_polynomial_is_an_error() {
        assert_eq!(
            solve_polynomial(&poly("x - x"), DEFAULT_MAX_DEGREE),
            Err(SolveError::ZeroPolynomial)
        );
    }

    #[test]
    fn degree_cap_is_enforced() {
        assert_eq!(
            solve_polynomial(&poly("x^5 - 1"), 4),
            Err(SolveError::DegreeTooHigh {
                degree: 5,
                limit: 4
            })
        );
    }

    #[test]
    fn repeated_factors_do_not_count_against_the_cap() {
        let roots = real_roots(&poly("(x + 1)^6*(x - 2)^3"), 3).unwrap();
        assert_eq!(roots, vec![Real::integer(-1), Real::integer(2)]);
    }

    #[test]
    fn large_powers_are_refused_before_expanding() {
        let expr = parse_expr("(x + 1)^100000").unwrap();
        assert_eq!(
            solve_expr(&expr, "x", DEFAULT_MAX_DEGREE),
            Err(SolveError::ExpansionTooLarge {
                bound: 100000,
                limit: 4 * DEFAULT_MAX_DEGREE
            })
        );
    }

    #[test]
    fn nonzero_constant_has_no_roots() {
        assert!(solve_polynomial(&poly("7"), DEFAULT_MAX_DEGREE)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn rational_roots_of_non_monic_polynomial() {
        let roots = real_roots(&poly("6*x^2 - x - 1"), DEFAULT_MAX_DEGREE).unwrap();
        assert_eq!(
            roots,
            vec![Real::Rational(rational(-1, 3)), Real::Rational(rational(1, 2))]
        );
    }
}
