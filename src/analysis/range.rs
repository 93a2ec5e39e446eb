//! Range of a rational function.
//!
//! The poles of `p/q` cut the line into open intervals on which `f` is
//! continuous. On each one the image runs between the smallest and largest
//! of the end limits and the critical values inside it.

use std::cmp::Ordering;

use crate::error::RangeError;
use crate::expr::Expr;
use crate::number::Real;
use crate::polynomial::Poly;
use crate::rational::{is_rational_function, poly_ratio};
use crate::set::{Bound, Interval, RealSubset};
use crate::solver::{check_expansion, real_roots};

// Offset used to read the side of a pole when exact signs are unavailable.
const POLE_PROBE: f64 = 1e-7;

#[derive(Clone, Debug)]
struct Candidate {
    value: Bound,
    attained: bool,
}

impl Candidate {
    fn limit(value: Bound) -> Self {
        Candidate {
            value,
            attained: false,
        }
    }
}

/// Set of values taken by `expr` over its natural domain.
pub fn function_range(expr: &Expr, var: &str, max_degree: usize) -> Result<RealSubset, RangeError> {
    if !is_rational_function(expr, var) {
        return Err(RangeError::Unsupported);
    }
    check_expansion(expr, var, max_degree)?;
    let (p, q) = poly_ratio(expr, var, max_degree).ok_or(RangeError::Unsupported)?;

    let slope = p.derivative() * q.clone() - &(p.clone() * q.derivative());
    if slope.is_zero() {
        let value = if p.is_zero() {
            Real::zero()
        } else {
            Real::Rational(p.leading_coeff() / q.leading_coeff())
        };
        return Ok(RealSubset::Finite(vec![value]));
    }

    let poles = real_roots(&q, max_degree)?;
    let critical = real_roots(&slope, max_degree)?;

    let mut ends = vec![Bound::NegInfinity];
    ends.extend(poles.into_iter().map(Bound::Finite));
    ends.push(Bound::PosInfinity);

    let images = ends
        .windows(2)
        .map(|w| interval_image(&p, &q, &w[0], &w[1], &critical));
    Ok(RealSubset::union(images))
}

fn interval_image(p: &Poly, q: &Poly, left: &Bound, right: &Bound, critical: &[Real]) -> RealSubset {
    let mut candidates = vec![
        Candidate::limit(end_limit(p, q, left, true)),
        Candidate::limit(end_limit(p, q, right, false)),
    ];
    for point in critical {
        let inside = Bound::Finite(point.clone());
        if left.compare(&inside) != Ordering::Less || inside.compare(right) != Ordering::Less {
            continue;
        }
        if let Some(value) = p.evaluate_real(point).checked_div(&q.evaluate_real(point)) {
            candidates.push(Candidate {
                value: Bound::Finite(value),
                attained: true,
            });
        }
    }

    let lowest = candidates
        .iter()
        .map(|c| &c.value)
        .min_by(|a, b| a.compare(b))
        .cloned()
        .unwrap_or(Bound::NegInfinity);
    let highest = candidates
        .iter()
        .map(|c| &c.value)
        .max_by(|a, b| a.compare(b))
        .cloned()
        .unwrap_or(Bound::PosInfinity);
    let reached = |bound: &Bound| {
        candidates
            .iter()
            .any(|c| c.attained && c.value.compare(bound) == Ordering::Equal)
    };
    let lower_open = !reached(&lowest);
    let upper_open = !reached(&highest);
    RealSubset::interval(Interval::new(lowest, highest, lower_open, upper_open))
}

// Limit of p/q at an end of an interval; `from_right` means the interval lies
// to the right of `end`.
fn end_limit(p: &Poly, q: &Poly, end: &Bound, from_right: bool) -> Bound {
    match end {
        Bound::NegInfinity => limit_at_infinity(p, q, false),
        Bound::PosInfinity => limit_at_infinity(p, q, true),
        Bound::Finite(pole) => pole_limit(p, q, pole, from_right),
    }
}

fn limit_at_infinity(p: &Poly, q: &Poly, positive: bool) -> Bound {
    let dp = p.degree().unwrap_or(0);
    let dq = q.degree().unwrap_or(0);
    let ratio = p.leading_coeff() / q.leading_coeff();
    match dp.cmp(&dq) {
        Ordering::Less => Bound::Finite(Real::zero()),
        Ordering::Equal => Bound::Finite(Real::Rational(ratio)),
        Ordering::Greater => {
            let mut sign = Real::Rational(ratio).signum();
            if !positive && (dp - dq) % 2 == 1 {
                sign = sign.reverse();
            }
            infinity(sign)
        }
    }
}

// Near a pole r of multiplicity m, q(x) behaves like q^(m)(r)/m! (x - r)^m.
fn pole_limit(p: &Poly, q: &Poly, pole: &Real, from_right: bool) -> Bound {
    let multiplicity = q.root_multiplicity(pole);
    let mut qm = q.clone();
    for _ in 0..multiplicity {
        qm = qm.derivative();
    }
    let p_sign = p.evaluate_real(pole).signum();
    let q_sign = qm.evaluate_real(pole).signum();

    let sign = if p_sign == Ordering::Equal || q_sign == Ordering::Equal {
        sign_near_pole(p, q, pole.to_f64(), from_right)
    } else {
        let mut sign = if p_sign == q_sign {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        if !from_right && multiplicity % 2 == 1 {
            sign = sign.reverse();
        }
        sign
    };
    infinity(sign)
}

fn sign_near_pole(p: &Poly, q: &Poly, pole: f64, from_right: bool) -> Ordering {
    let x = if from_right {
        pole + POLE_PROBE
    } else {
        pole - POLE_PROBE
    };
    let value = p.evaluate_f64(x) / q.evaluate_f64(x);
    value.partial_cmp(&0.0).unwrap_or(Ordering::Greater)
}

fn infinity(sign: Ordering) -> Bound {
    if sign == Ordering::Less {
        Bound::NegInfinity
    } else {
        Bound::PosInfinity
    }
}
