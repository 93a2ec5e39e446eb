use num_complex::Complex64;
use tracing::debug;

use super::Root;
use crate::error::SolveError;
use crate::number::Real;
use crate::polynomial::{f64_coeffs, Poly};

const MAX_ITERATIONS: usize = 500;
const STEP_TOLERANCE: f64 = 1e-12;
const RESIDUAL_TOLERANCE: f64 = 1e-8;
const IMAGINARY_TOLERANCE: f64 = 1e-8;

/// Durand–Kerner iteration on the monic form of `poly`.
pub(super) fn numeric_roots(poly: &Poly) -> Result<Vec<Root>, SolveError> {
    let coeffs = f64_coeffs(&poly.monic());
    let degree = coeffs.len() - 1;
    if degree == 0 {
        return Ok(Vec::new());
    }

    let seed = Complex64::new(0.4, 0.9);
    let mut z: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32)).collect();

    let mut converged = false;
    for iteration in 0..MAX_ITERATIONS {
        let mut largest_step = 0f64;
        for i in 0..degree {
            let mut denom = Complex64::new(1.0, 0.0);
            for j in 0..degree {
                if i != j {
                    denom *= z[i] - z[j];
                }
            }
            if denom.norm() == 0.0 {
                denom = Complex64::new(f64::EPSILON, 0.0);
            }
            let step = horner(&coeffs, z[i]) / denom;
            z[i] -= step;
            largest_step = largest_step.max(step.norm());
        }
        if largest_step < STEP_TOLERANCE {
            debug!(iteration, degree, "Durand-Kerner converged");
            converged = true;
            break;
        }
    }

    if !converged {
        let scale = coeffs.iter().fold(1f64, |acc, c| acc.max(c.abs()));
        let settled = z
            .iter()
            .all(|root| horner(&coeffs, *root).norm() <= RESIDUAL_TOLERANCE * scale);
        if !settled {
            return Err(SolveError::NoConvergence(MAX_ITERATIONS));
        }
    }

    Ok(z.into_iter().map(|root| classify(&coeffs, root)).collect())
}

fn classify(coeffs: &[f64], root: Complex64) -> Root {
    if root.im.abs() <= IMAGINARY_TOLERANCE * root.re.abs().max(1.0) {
        Root::Real(Real::Float(polish(coeffs, root.re)))
    } else {
        Root::Complex(root)
    }
}

// A few Newton steps on the real line clean up the residual imaginary drift.
fn polish(coeffs: &[f64], mut x: f64) -> f64 {
    for _ in 0..3 {
        let (value, slope) = value_and_slope(coeffs, x);
        if slope == 0.0 {
            break;
        }
        let next = x - value / slope;
        if !next.is_finite() {
            break;
        }
        x = next;
    }
    x
}

fn horner(coeffs: &[f64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, c| acc * z + *c)
}

fn value_and_slope(coeffs: &[f64], x: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut slope = 0.0;
    for c in coeffs.iter().rev() {
        slope = slope * x + value;
        value = value * x + *c;
    }
    (value, slope)
}
