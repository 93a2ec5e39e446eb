use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use crate::expr::{Expr, Rational};
use crate::number::Real;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

const MAX_CONSTANT_POWER: u64 = 4096;

// Repeated factors may push the expanded degree past the solver cap while
// every square-free part stays below it.
const EXPANSION_FACTOR: usize = 4;

/// Largest degree an expression may expand to when solving is capped at
/// `max_degree`.
pub fn expansion_limit(max_degree: usize) -> usize {
    max_degree.saturating_mul(EXPANSION_FACTOR)
}

/// Univariate polynomial with rational coefficients, keyed by exponent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Poly::from_constant(Rational::one())
    }

    pub fn from_constant(c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(0, c);
        }
        Poly { coeffs }
    }

    /// Polynomial with the given coefficients, lowest degree first.
    pub fn from_coeffs(coeffs: impl IntoIterator<Item = Rational>) -> Self {
        let coeffs = coeffs
            .into_iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Poly { coeffs }
    }

    /// `x - root`
    pub fn linear(root: Rational) -> Self {
        Poly::from_coeffs([-root, Rational::one()])
    }

    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return constant_value(expr).map(Poly::from_constant);
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Poly::from_coeffs([
                Rational::zero(),
                Rational::one(),
            ])),
            Expr::Add(a, b) => Some(Poly::from_expr(a, var)? + Poly::from_expr(b, var)?),
            Expr::Sub(a, b) => Some(Poly::from_expr(a, var)? - Poly::from_expr(b, var)?),
            Expr::Mul(a, b) => {
                let left = Poly::from_expr(a, var)?;
                let right = Poly::from_expr(b, var)?;
                Some(left * right)
            }
            Expr::Div(a, b) => {
                let denom = constant_value(b)?;
                if denom.is_zero() {
                    return None;
                }
                Some(Poly::from_expr(a, var)?.scale(&(Rational::one() / denom)))
            }
            Expr::Neg(inner) => Some(-Poly::from_expr(inner, var)?),
            Expr::Pow(base, exp) => {
                let power = match exp.as_integer() {
                    Some(k) if k >= 0 => k as usize,
                    _ => return None,
                };
                Some(Poly::from_expr(base, var)?.pow(power))
            }
            _ => None,
        }
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().cloned()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.degree()
            .and_then(|d| self.coeffs.get(&d).cloned())
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs.get(&0).map(|c| c.is_one()).unwrap_or(false)
    }

    pub fn is_constant(&self) -> bool {
        self.degree().unwrap_or(0) == 0
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|(exp, coeff)| (*exp, coeff.clone() * k.clone()))
            .collect();
        Poly { coeffs }
    }

    pub fn derivative(&self) -> Self {
        let mut coeffs = BTreeMap::new();
        for (exp, coeff) in &self.coeffs {
            if *exp == 0 {
                continue;
            }
            let factor = Rational::from_integer(BigInt::from(*exp as i64));
            coeffs.insert(exp - 1, coeff.clone() * factor);
        }
        Poly { coeffs }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&(Rational::one() / lc))
    }

    pub fn evaluate(&self, x: &Rational) -> Rational {
        let mut acc = Rational::zero();
        for exp in (0..=self.degree().unwrap_or(0)).rev() {
            acc = acc * x.clone() + self.coeff(exp);
        }
        acc
    }

    /// Horner evaluation in exact arithmetic where the point allows it.
    pub fn evaluate_real(&self, x: &Real) -> Real {
        let mut acc = Real::zero();
        for exp in (0..=self.degree().unwrap_or(0)).rev() {
            acc = acc * x.clone() + Real::Rational(self.coeff(exp));
        }
        acc
    }

    pub fn evaluate_f64(&self, x: f64) -> f64 {
        let mut acc = 0.0;
        for exp in (0..=self.degree().unwrap_or(0)).rev() {
            acc = acc * x + self.coeff(exp).to_f64().unwrap_or(f64::NAN);
        }
        acc
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let divisor_degree = match divisor.degree() {
            Some(deg) => deg,
            None => return (Poly::zero(), self.clone()),
        };
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();
        let divisor_lc = divisor.leading_coeff();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let power = r_deg - divisor_degree;
            let coeff = remainder.leading_coeff() / divisor_lc.clone();
            let mut term = BTreeMap::new();
            term.insert(power, coeff);
            let term_poly = Poly { coeffs: term };
            quotient = quotient + term_poly.clone();
            remainder = remainder - &(term_poly * divisor.clone());
        }

        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    pub fn gcd(a: &Poly, b: &Poly) -> Poly {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// Split into a rational content and a primitive integer polynomial whose
    /// leading coefficient is positive.
    pub fn content_and_primitive_part(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::zero(), Poly::zero());
        }
        let mut lcm = BigInt::one();
        for coeff in self.coeffs.values() {
            lcm = lcm.lcm(coeff.denom());
        }

        let mut gcd_num = BigInt::zero();
        let mut scaled_nums = BTreeMap::new();
        for (exp, coeff) in &self.coeffs {
            let num = (coeff * Rational::from_integer(lcm.clone())).to_integer();
            gcd_num = if gcd_num.is_zero() {
                num.abs()
            } else {
                gcd_num.gcd(&num)
            };
            scaled_nums.insert(*exp, num);
        }

        let coeffs = scaled_nums
            .into_iter()
            .map(|(exp, num)| (exp, Rational::from_integer(num / gcd_num.clone())))
            .collect();
        let mut primitive = Poly { coeffs };
        let mut content = Rational::new(gcd_num, lcm);
        if primitive.leading_coeff().is_negative() {
            primitive = -primitive;
            content = -content;
        }
        (content, primitive)
    }

    /// Yun's square-free decomposition of a monic polynomial: `(part, multiplicity)` pairs.
    pub fn square_free_decomposition(&self) -> Vec<(Poly, usize)> {
        if self.is_constant() {
            return Vec::new();
        }
        let monic = self.monic();
        let mut result = Vec::new();
        let mut i = 1;
        let mut g = Poly::gcd(&monic, &monic.derivative());
        let mut y = monic.div_exact(&g).unwrap_or_else(Poly::zero);

        while !y.is_constant() {
            let z = Poly::gcd(&y, &g);
            let factor = y.div_exact(&z).unwrap_or_else(Poly::zero);
            if !factor.is_constant() {
                result.push((factor, i));
            }
            g = g.div_exact(&z).unwrap_or_else(Poly::zero);
            y = z;
            i += 1;
        }
        result
    }

    /// Multiplicity of `root` as a zero of the polynomial.
    pub fn root_multiplicity(&self, root: &Real) -> usize {
        let mut current = self.clone();
        let mut m = 0;
        while !current.is_zero() && current.evaluate_real(root).is_zero() {
            current = current.derivative();
            m += 1;
        }
        m
    }

    /// Descending-order expression: `3*x^2 - x + 1`.
    pub fn to_expr(&self, var: &str) -> Expr {
        let mut terms = self.coeffs.iter().rev();
        let Some((exp, coeff)) = terms.next() else {
            return Expr::Constant(Rational::zero());
        };
        let mut expr = monomial(coeff, *exp, var);
        for (exp, coeff) in terms {
            expr = if coeff.is_negative() {
                Expr::Sub(expr.boxed(), monomial(&-coeff.clone(), *exp, var).boxed())
            } else {
                Expr::Add(expr.boxed(), monomial(coeff, *exp, var).boxed())
            };
        }
        expr
    }
}

fn monomial(coeff: &Rational, exp: usize, var: &str) -> Expr {
    if exp == 0 {
        return Expr::Constant(coeff.clone());
    }
    let power = if exp == 1 {
        Expr::Variable(var.to_string())
    } else {
        Expr::Pow(
            Expr::Variable(var.to_string()).boxed(),
            Expr::integer(BigInt::from(exp as i64)).boxed(),
        )
    };
    if coeff.is_one() {
        power
    } else if (-coeff.clone()).is_one() {
        Expr::Neg(power.boxed())
    } else {
        Expr::Mul(Expr::Constant(coeff.clone()).boxed(), power.boxed())
    }
}

/// Fold a variable-free expression built from rational arithmetic.
fn constant_value(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(c) => Some(c.clone()),
        Expr::Neg(inner) => constant_value(inner).map(|c| -c),
        Expr::Add(a, b) => Some(constant_value(a)? + constant_value(b)?),
        Expr::Sub(a, b) => Some(constant_value(a)? - constant_value(b)?),
        Expr::Mul(a, b) => Some(constant_value(a)? * constant_value(b)?),
        Expr::Div(a, b) => {
            let d = constant_value(b)?;
            if d.is_zero() {
                None
            } else {
                Some(constant_value(a)? / d)
            }
        }
        Expr::Pow(base, exp) => {
            let base = constant_value(base)?;
            let k = exp.as_integer()?;
            if (k < 0 && base.is_zero()) || k.unsigned_abs() > MAX_CONSTANT_POWER {
                return None;
            }
            let mut acc = Rational::one();
            for _ in 0..k.unsigned_abs() {
                acc *= base.clone();
            }
            Some(if k < 0 { acc.recip() } else { acc })
        }
        _ => None,
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr("x"))
    }
}

impl std::ops::Add for Poly {
    type Output = Poly;
    fn add(self, rhs: Poly) -> Poly {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in rhs.coeffs {
            match coeffs.entry(exp) {
                Entry::Vacant(entry) => {
                    if !coeff.is_zero() {
                        entry.insert(coeff);
                    }
                }
                Entry::Occupied(mut entry) => {
                    let updated = entry.get().clone() + coeff;
                    if updated.is_zero() {
                        entry.remove();
                    } else {
                        *entry.get_mut() = updated;
                    }
                }
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Sub for Poly {
    type Output = Poly;
    fn sub(self, rhs: Poly) -> Poly {
        self + (-rhs)
    }
}

impl std::ops::Sub<&Poly> for Poly {
    type Output = Poly;
    fn sub(self, rhs: &Poly) -> Poly {
        self - rhs.clone()
    }
}

impl std::ops::Mul for Poly {
    type Output = Poly;
    fn mul(self, rhs: Poly) -> Poly {
        let mut coeffs: BTreeMap<usize, Rational> = BTreeMap::new();
        for (exp_a, coeff_a) in &self.coeffs {
            for (exp_b, coeff_b) in &rhs.coeffs {
                let product = coeff_a.clone() * coeff_b.clone();
                match coeffs.entry(exp_a + exp_b) {
                    Entry::Vacant(entry) => {
                        entry.insert(product);
                    }
                    Entry::Occupied(mut entry) => {
                        *entry.get_mut() += product;
                    }
                }
            }
        }
        coeffs.retain(|_, c| !c.is_zero());
        Poly { coeffs }
    }
}

impl std::ops::Neg for Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        let coeffs = self
            .coeffs
            .into_iter()
            .map(|(exp, coeff)| (exp, -coeff))
            .collect();
        Poly { coeffs }
    }
}

/// Numeric coefficients, lowest degree first.
pub(crate) fn f64_coeffs(poly: &Poly) -> Vec<f64> {
    (0..=poly.degree().unwrap_or(0))
        .map(|exp| poly.coeff(exp).to_f64().unwrap_or(f64::NAN))
        .collect()
}
