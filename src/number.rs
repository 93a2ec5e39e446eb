//! Exact real numbers: rationals, quadratic surds `a + b*sqrt(d)` and a float fallback.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::Rational;

const FLOAT_TOLERANCE: f64 = 1e-9;

/// `a + b*sqrt(d)` with `d > 1` square-free and `b != 0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Surd {
    pub a: Rational,
    pub b: Rational,
    pub d: BigInt,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Real {
    Rational(Rational),
    Surd(Surd),
    Float(f64),
}

impl Real {
    pub fn integer(value: i64) -> Self {
        Real::Rational(Rational::from_integer(value.into()))
    }

    pub fn zero() -> Self {
        Real::Rational(Rational::zero())
    }

    /// Build `a + b*sqrt(d)`, collapsing to a rational when `b` vanishes.
    pub fn surd(a: Rational, b: Rational, d: BigInt) -> Self {
        if b.is_zero() || d.is_zero() {
            Real::Rational(a)
        } else if d.is_one() {
            Real::Rational(a + b)
        } else {
            Real::Surd(Surd { a, b, d })
        }
    }

    pub fn is_exact(&self) -> bool {
        !matches!(self, Real::Float(_))
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        if let Real::Rational(r) = self {
            Some(r)
        } else {
            None
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Real::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            Real::Surd(s) => {
                let a = s.a.to_f64().unwrap_or(f64::NAN);
                let b = s.b.to_f64().unwrap_or(f64::NAN);
                let d = s.d.to_f64().unwrap_or(f64::NAN);
                a + b * d.sqrt()
            }
            Real::Float(x) => *x,
        }
    }

    /// Exact zero test; floats compare against a small absolute tolerance.
    pub fn is_zero(&self) -> bool {
        match self {
            Real::Rational(r) => r.is_zero(),
            Real::Surd(_) => false,
            Real::Float(x) => x.abs() <= FLOAT_TOLERANCE,
        }
    }

    pub fn signum(&self) -> Ordering {
        match self {
            Real::Rational(r) => r.cmp(&Rational::zero()),
            Real::Surd(s) => surd_sign(s),
            Real::Float(x) if x.abs() <= FLOAT_TOLERANCE => Ordering::Equal,
            Real::Float(x) => x.partial_cmp(&0.0).unwrap_or(Ordering::Equal),
        }
    }

    /// Value equality: exact for rationals and surds, tolerant once a float is involved.
    pub fn same_value(&self, other: &Real) -> bool {
        match (self, other) {
            (Real::Float(_), _) | (_, Real::Float(_)) => {
                let (x, y) = (self.to_f64(), other.to_f64());
                let scale = 1f64.max(x.abs()).max(y.abs());
                (x - y).abs() <= FLOAT_TOLERANCE * scale
            }
            _ => self == other,
        }
    }

    pub fn cmp_value(&self, other: &Real) -> Ordering {
        match (self, other) {
            (Real::Rational(a), Real::Rational(b)) => a.cmp(b),
            (Real::Float(_), _) | (_, Real::Float(_)) => {
                if self.same_value(other) {
                    Ordering::Equal
                } else {
                    self.to_f64()
                        .partial_cmp(&other.to_f64())
                        .unwrap_or(Ordering::Equal)
                }
            }
            _ => (self.clone() - other.clone()).signum(),
        }
    }

    pub fn checked_div(&self, other: &Real) -> Option<Real> {
        if other.is_zero() {
            return None;
        }
        if let (Some((a1, b1, d1)), Some((a2, b2, d2))) = (parts(self), parts(other)) {
            if let Some(d) = shared_radicand(d1, d2) {
                let d_value = d
                    .clone()
                    .map(Rational::from_integer)
                    .unwrap_or_else(Rational::zero);
                // multiply through by the conjugate of the divisor
                let norm = a2.clone() * a2.clone() - b2.clone() * b2.clone() * d_value.clone();
                if !norm.is_zero() {
                    let a = (a1.clone() * a2.clone() - b1.clone() * b2.clone() * d_value)
                        / norm.clone();
                    let b = (b1 * a2 - a1 * b2) / norm;
                    return Some(Real::surd(a, b, d.unwrap_or_else(BigInt::zero)));
                }
            }
        }
        Some(Real::Float(self.to_f64() / other.to_f64()))
    }

    pub fn powi(&self, exp: usize) -> Real {
        let mut acc = Real::integer(1);
        for _ in 0..exp {
            acc = acc * self.clone();
        }
        acc
    }
}

type Parts = (Rational, Rational, Option<BigInt>);

fn parts(value: &Real) -> Option<Parts> {
    match value {
        Real::Rational(r) => Some((r.clone(), Rational::zero(), None)),
        Real::Surd(s) => Some((s.a.clone(), s.b.clone(), Some(s.d.clone()))),
        Real::Float(_) => None,
    }
}

// `None` means the operands live in different quadratic fields.
fn shared_radicand(d1: Option<BigInt>, d2: Option<BigInt>) -> Option<Option<BigInt>> {
    match (d1, d2) {
        (None, None) => Some(None),
        (Some(d), None) | (None, Some(d)) => Some(Some(d)),
        (Some(a), Some(b)) if a == b => Some(Some(a)),
        _ => None,
    }
}

fn surd_sign(s: &Surd) -> Ordering {
    let a_sign = s.a.cmp(&Rational::zero());
    let b_sign = s.b.cmp(&Rational::zero());
    if a_sign == Ordering::Equal || a_sign == b_sign {
        return b_sign;
    }
    // opposite signs: compare a^2 with b^2*d
    let a2 = s.a.clone() * s.a.clone();
    let b2d = s.b.clone() * s.b.clone() * Rational::from_integer(s.d.clone());
    match a2.cmp(&b2d) {
        Ordering::Greater => a_sign,
        Ordering::Less => b_sign,
        Ordering::Equal => Ordering::Equal,
    }
}

fn combine(
    lhs: Real,
    rhs: Real,
    exact: impl FnOnce(Parts, Parts, Rational) -> (Rational, Rational),
    float: impl FnOnce(f64, f64) -> f64,
) -> Real {
    if let (Some((a1, b1, d1)), Some((a2, b2, d2))) = (parts(&lhs), parts(&rhs)) {
        if let Some(d) = shared_radicand(d1, d2) {
            let d_value = d
                .clone()
                .map(Rational::from_integer)
                .unwrap_or_else(Rational::zero);
            let (a, b) = exact((a1, b1, None), (a2, b2, None), d_value);
            return Real::surd(a, b, d.unwrap_or_else(BigInt::zero));
        }
    }
    Real::Float(float(lhs.to_f64(), rhs.to_f64()))
}

impl Add for Real {
    type Output = Real;
    fn add(self, rhs: Real) -> Real {
        combine(
            self,
            rhs,
            |(a1, b1, _), (a2, b2, _), _| (a1 + a2, b1 + b2),
            |x, y| x + y,
        )
    }
}

impl Sub for Real {
    type Output = Real;
    fn sub(self, rhs: Real) -> Real {
        self + (-rhs)
    }
}

impl Mul for Real {
    type Output = Real;
    fn mul(self, rhs: Real) -> Real {
        combine(
            self,
            rhs,
            |(a1, b1, _), (a2, b2, _), d| {
                (
                    a1.clone() * a2.clone() + b1.clone() * b2.clone() * d,
                    a1 * b2 + a2 * b1,
                )
            },
            |x, y| x * y,
        )
    }
}

impl Neg for Real {
    type Output = Real;
    fn neg(self) -> Real {
        match self {
            Real::Rational(r) => Real::Rational(-r),
            Real::Surd(s) => Real::Surd(Surd {
                a: -s.a,
                b: -s.b,
                d: s.d,
            }),
            Real::Float(x) => Real::Float(-x),
        }
    }
}

impl From<Rational> for Real {
    fn from(value: Rational) -> Self {
        Real::Rational(value)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::Rational(r) => write!(f, "{}", show_rational(r)),
            Real::Surd(s) => write!(f, "{}", show_surd(s)),
            Real::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

pub fn show_rational(r: &Rational) -> String {
    let n = r.numer().clone();
    let d = r.denom().clone();
    if d.is_one() {
        format!("{n}")
    } else if n.is_negative() {
        format!("-{}/{}", -n, d)
    } else {
        format!("{}/{}", n, d)
    }
}

fn show_surd(s: &Surd) -> String {
    let coeff = s.b.abs();
    let mut radical = if coeff.numer().is_one() {
        format!("sqrt({})", s.d)
    } else {
        format!("{}*sqrt({})", coeff.numer(), s.d)
    };
    if !coeff.denom().is_one() {
        radical = format!("{radical}/{}", coeff.denom());
    }
    let negative = s.b.is_negative();
    if s.a.is_zero() {
        if negative {
            format!("-{radical}")
        } else {
            radical
        }
    } else {
        let op = if negative { "-" } else { "+" };
        format!("{} {op} {radical}", show_rational(&s.a))
    }
}

/// Shortest readable rendering of a float: integral values drop the fraction,
/// others keep up to six decimals with trailing zeros trimmed.
pub fn format_float(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{x:.0}");
    }
    let text = format!("{x:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render a user-supplied rational as an integer, an exact terminating decimal, or `p/q`.
pub fn format_decimal(r: &Rational) -> String {
    if r.is_integer() {
        return show_rational(r);
    }
    let mut denom = r.denom().clone();
    let mut places = 0usize;
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let ten = BigInt::from(10);
    for factor in [&two, &five] {
        while (&denom % factor).is_zero() {
            denom /= factor;
        }
    }
    if !denom.is_one() {
        return show_rational(r);
    }
    let mut scaled = r.abs();
    while !scaled.is_integer() {
        scaled *= Rational::from_integer(ten.clone());
        places += 1;
    }
    let digits = scaled.to_integer().to_string();
    let digits = format!("{digits:0>width$}", width = places + 1);
    let (int, frac) = digits.split_at(digits.len() - places);
    let sign = if r.is_negative() { "-" } else { "" };
    format!("{sign}{int}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;

    fn sqrt2(a: i64, b: i64) -> Real {
        Real::surd(rational(a, 1), rational(b, 1), BigInt::from(2))
    }

    #[test]
    fn surd_arithmetic_stays_exact() {
        // (1 + sqrt2)(1 - sqrt2) = -1
        assert_eq!(sqrt2(1, 1) * sqrt2(1, -1), Real::integer(-1));
        assert_eq!(sqrt2(1, 1) + sqrt2(0, -1), Real::integer(1));
        let quotient = Real::integer(1).checked_div(&sqrt2(1, 1)).unwrap();
        assert_eq!(quotient, sqrt2(-1, 1));
    }

    #[test]
    fn surd_sign_compares_squares() {
        assert_eq!(sqrt2(1, -1).signum(), Ordering::Less);
        assert_eq!(sqrt2(-1, 1).signum(), Ordering::Greater);
        assert_eq!(sqrt2(2, -1).signum(), Ordering::Greater);
    }

    #[test]
    fn division_by_zero_is_refused() {
        assert!(Real::integer(3).checked_div(&Real::zero()).is_none());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Real::Rational(rational(-1, 2)).to_string(), "-1/2");
        assert_eq!(sqrt2(1, -1).to_string(), "1 - sqrt(2)");
        assert_eq!(
            Real::surd(rational(1, 2), rational(3, 2), BigInt::from(5)).to_string(),
            "1/2 + 3*sqrt(5)/2"
        );
        assert_eq!(Real::Float(0.6823278038).to_string(), "0.682328");
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(format_decimal(&rational(3, 1)), "3");
        assert_eq!(format_decimal(&rational(-5, 2)), "-2.5");
        assert_eq!(format_decimal(&rational(1, 20)), "0.05");
        assert_eq!(format_decimal(&rational(1, 3)), "1/3");
    }
}
