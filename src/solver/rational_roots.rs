use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::expr::Rational;
use crate::polynomial::Poly;

// Divisor enumeration is quadratic in the digit count; past this the
// candidate search is skipped and the factor goes to the numeric solver.
const MAX_CANDIDATE_BITS: u64 = 48;

pub(super) fn find_rational_root(poly: &Poly) -> Option<Rational> {
    let degree = poly.degree()?;
    if degree == 0 {
        return None;
    }
    if degree == 1 {
        return linear_root(poly);
    }
    if poly.coeff(0).is_zero() {
        return Some(Rational::zero());
    }

    let int_coeffs = integer_coeffs(poly);
    let leading = int_coeffs.last()?.clone();
    let constant = int_coeffs.first()?.clone();
    if leading.bits() > MAX_CANDIDATE_BITS || constant.bits() > MAX_CANDIDATE_BITS {
        return None;
    }

    let p_candidates = divisors(&constant);
    let q_candidates = divisors(&leading);

    let mut candidates = Vec::new();
    for p in &p_candidates {
        for q in &q_candidates {
            let candidate = Rational::new(p.clone(), q.clone());
            candidates.push(candidate.clone());
            candidates.push(-candidate);
        }
    }
    candidates.sort();
    candidates.dedup();

    candidates
        .into_iter()
        .find(|candidate| poly.evaluate(candidate).is_zero())
}

fn linear_root(poly: &Poly) -> Option<Rational> {
    let a = poly.coeff(1);
    let b = poly.coeff(0);
    if a.is_zero() {
        None
    } else {
        Some(-b / a)
    }
}

fn integer_coeffs(poly: &Poly) -> Vec<BigInt> {
    let (_, primitive) = poly.content_and_primitive_part();
    let degree = primitive.degree().unwrap_or(0);
    (0..=degree)
        .map(|exp| primitive.coeff(exp).to_integer())
        .collect()
}

fn divisors(n: &BigInt) -> Vec<BigInt> {
    let mut result = Vec::new();
    let abs_n = n.abs();
    let mut d = BigInt::one();
    while &d * &d <= abs_n {
        if (&abs_n % &d).is_zero() {
            result.push(d.clone());
            let other = &abs_n / &d;
            if other != d {
                result.push(other);
            }
        }
        d += 1;
    }
    result.sort();
    result
}

fn rational_divisors(r: &Rational) -> Vec<Rational> {
    if r.numer().bits() > MAX_CANDIDATE_BITS || r.denom().bits() > MAX_CANDIDATE_BITS {
        return Vec::new();
    }
    let p_divs = divisors(r.numer());
    let q_divs = divisors(r.denom());
    let mut result = Vec::new();
    for p in &p_divs {
        for q in &q_divs {
            let frac = Rational::new(p.clone(), q.clone());
            result.push(frac.clone());
            result.push(-frac);
        }
    }
    result.sort();
    result.dedup();
    result
}

fn perfect_square_rational(r: &Rational) -> Option<Rational> {
    if r.is_negative() {
        return None;
    }
    let num_root = integer_sqrt_exact(r.numer())?;
    let den_root = integer_sqrt_exact(r.denom())?;
    Some(Rational::new(num_root, den_root))
}

pub(super) fn integer_sqrt_exact(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let root = n.sqrt();
    if &root * &root == *n {
        Some(root)
    } else {
        None
    }
}

/// Split a monic quartic without rational roots into two rational quadratics
/// `(x^2 + a x + b)(x^2 + c x + d)`, if such a split exists.
pub(super) fn split_quartic(poly: &Poly) -> Option<(Poly, Poly)> {
    if poly.degree()? != 4 {
        return None;
    }
    let poly = poly.monic();

    let p3 = poly.coeff(3);
    let p2 = poly.coeff(2);
    let p1 = poly.coeff(1);
    let p0 = poly.coeff(0);
    let two = Rational::from_integer(2.into());
    let four = Rational::from_integer(4.into());

    let candidates = rational_divisors(&p0);
    for b in &candidates {
        for d in &candidates {
            if b.clone() * d.clone() != p0 {
                continue;
            }
            // a + c = p3 and a*c = p2 - b - d
            let ac = p2.clone() - b - d;
            let discriminant = p3.clone() * p3.clone() - four.clone() * ac;
            let Some(sqrt) = perfect_square_rational(&discriminant) else {
                continue;
            };
            for a in [
                (p3.clone() + sqrt.clone()) / two.clone(),
                (p3.clone() - sqrt.clone()) / two.clone(),
            ] {
                let c = p3.clone() - a.clone();
                if a.clone() * d.clone() + b.clone() * c.clone() == p1 {
                    let first = Poly::from_coeffs([b.clone(), a, Rational::one()]);
                    let second = Poly::from_coeffs([d.clone(), c, Rational::one()]);
                    return Some((first, second));
                }
            }
        }
    }
    None
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
    fn finds_fractional_candidates() {
        let root = find_rational_root(&poly("3*x^2 - 5*x - 2")).unwrap();
        assert!(poly("3*x^2 - 5*x - 2").evaluate(&root).is_zero());
        assert!(root == rational(2, 1) || root == rational(-1, 3));
    }

    #[test]
    fn irreducible_quadratic_has_no_rational_root() {
        assert!(find_rational_root(&poly("x^2 - 2")).is_none());
    }

    #[test]
    fn quartic_splits_into_quadratics() {
        let quartic = poly("(x^2 - 2)*(x^2 + 1)");
        let (a, b) = split_quartic(&quartic).unwrap();
        assert_eq!(a * b, quartic);
    }
}
