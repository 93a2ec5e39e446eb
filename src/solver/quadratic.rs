use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::rational_roots::integer_sqrt_exact;
use super::Root;
use crate::expr::Rational;
use crate::number::Real;
use crate::polynomial::Poly;

const TRIAL_DIVISION_LIMIT: u64 = 1_000_000;

/// Write `n = s^2 * d` with `s > 0` and `d` square-free (up to the trial
/// division bound). The sign of `n` stays with `d`.
pub fn squarefree_split(n: &BigInt) -> (BigInt, BigInt) {
    if n.is_zero() {
        return (BigInt::one(), BigInt::zero());
    }
    let mut rest = n.abs();
    let mut square = BigInt::one();
    let mut free = if n.is_negative() {
        -BigInt::one()
    } else {
        BigInt::one()
    };

    let mut p = 2u64;
    while p < TRIAL_DIVISION_LIMIT {
        let prime = BigInt::from(p);
        if &prime * &prime > rest {
            break;
        }
        let prime_sq = &prime * &prime;
        while (&rest % &prime_sq).is_zero() {
            rest /= &prime_sq;
            square *= &prime;
        }
        if (&rest % &prime).is_zero() {
            rest /= &prime;
            free *= &prime;
        }
        p += if p == 2 { 1 } else { 2 };
    }

    match integer_sqrt_exact(&rest) {
        Some(root) => square *= root,
        None => free *= rest,
    }
    (square, free)
}

/// Roots of an irreducible quadratic: a conjugate surd pair or a complex pair.
pub(super) fn quadratic_roots(poly: &Poly) -> Vec<Root> {
    let a = poly.coeff(2);
    let b = poly.coeff(1);
    let c = poly.coeff(0);
    let two_a = a.clone() * Rational::from_integer(2.into());
    let discriminant = b.clone() * b.clone() - Rational::from_integer(4.into()) * a * c;
    let vertex = -b / two_a.clone();

    // sqrt(p/q) = sqrt(p*q)/q
    let radicand = discriminant.numer() * discriminant.denom();
    let (square, free) = squarefree_split(&radicand);
    let scale = Rational::new(square, discriminant.denom().clone()) / two_a;

    if free.is_negative() {
        let re = vertex.to_f64().unwrap_or(f64::NAN);
        let width = (-free).to_f64().unwrap_or(f64::NAN).sqrt();
        let im = scale.abs().to_f64().unwrap_or(f64::NAN) * width;
        return vec![
            Root::Complex(Complex64::new(re, -im)),
            Root::Complex(Complex64::new(re, im)),
        ];
    }

    vec![
        Root::Real(Real::surd(vertex.clone(), -scale.clone(), free.clone())),
        Root::Real(Real::surd(vertex, scale, free)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;

    #[test]
    fn splits_out_square_factors() {
        assert_eq!(squarefree_split(&BigInt::from(12)), (2.into(), 3.into()));
        assert_eq!(squarefree_split(&BigInt::from(49)), (7.into(), 1.into()));
        assert_eq!(squarefree_split(&BigInt::from(-8)), (2.into(), (-2).into()));
        assert_eq!(squarefree_split(&BigInt::from(30)), (1.into(), 30.into()));
    }

    #[test]
    fn golden_ratio_roots() {
        // x^2 - x - 1
        let poly = Poly::from_coeffs([rational(-1, 1), rational(-1, 1), rational(1, 1)]);
        let roots = quadratic_roots(&poly);
        let half = rational(1, 2);
        assert_eq!(
            roots,
            vec![
                Root::Real(Real::surd(half.clone(), -half.clone(), 5.into())),
                Root::Real(Real::surd(half.clone(), half, 5.into())),
            ]
        );
    }

    #[test]
    fn negative_discriminant_gives_complex_pair() {
        let poly = Poly::from_coeffs([rational(1, 1), rational(0, 1), rational(1, 1)]);
        assert!(quadratic_roots(&poly).iter().all(|r| !r.is_real()));
    }
}
