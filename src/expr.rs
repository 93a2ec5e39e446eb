//! Expression tree definitions and helpers.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};

pub type Rational = BigRational;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Variable(String),
    Constant(Rational),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
    Sqrt(Box<Expr>),
    Abs(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn constant(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::new(num.into(), den.into()))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::from_integer(value.into()))
    }

    pub fn rational(value: Rational) -> Self {
        Expr::Constant(value)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_one())
    }

    pub fn as_constant(&self) -> Option<&Rational> {
        if let Expr::Constant(c) = self {
            Some(c)
        } else {
            None
        }
    }

    /// Integer value of a constant exponent, looking through a single negation.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Expr::Constant(c) if c.is_integer() => c.to_integer().to_i64(),
            Expr::Neg(inner) => inner.as_integer().map(|k| -k),
            _ => None,
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Direct operands, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Variable(_) | Expr::Constant(_) => Vec::new(),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => vec![a.as_ref(), b.as_ref()],
            Expr::Neg(a)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Tan(a)
            | Expr::Exp(a)
            | Expr::Log(a)
            | Expr::Sqrt(a)
            | Expr::Abs(a) => vec![a.as_ref()],
        }
    }

    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(v) => v == var,
            other => other.children().into_iter().any(|c| c.contains_var(var)),
        }
    }

    /// Upper bound on the degree in `var` of the numerator and denominator
    /// polynomials the expression expands to, read off the tree without
    /// expanding anything.
    pub fn degree_bound(&self, var: &str) -> usize {
        let (numer, denom) = self.fraction_degree_bound(var);
        numer.max(denom)
    }

    // Follows the numerator/denominator split: sums cross-multiply, quotients
    // swap sides and negative powers invert.
    fn fraction_degree_bound(&self, var: &str) -> (usize, usize) {
        match self {
            Expr::Variable(v) if v == var => (1, 0),
            Expr::Variable(_) | Expr::Constant(_) => (0, 0),
            Expr::Add(a, b) | Expr::Sub(a, b) => {
                let (na, da) = a.fraction_degree_bound(var);
                let (nb, db) = b.fraction_degree_bound(var);
                (
                    na.saturating_add(db).max(nb.saturating_add(da)),
                    da.saturating_add(db),
                )
            }
            Expr::Mul(a, b) => {
                let (na, da) = a.fraction_degree_bound(var);
                let (nb, db) = b.fraction_degree_bound(var);
                (na.saturating_add(nb), da.saturating_add(db))
            }
            Expr::Div(a, b) => {
                let (na, da) = a.fraction_degree_bound(var);
                let (nb, db) = b.fraction_degree_bound(var);
                (na.saturating_add(db), da.saturating_add(nb))
            }
            Expr::Neg(a) => a.fraction_degree_bound(var),
            Expr::Pow(base, exp) => {
                let (n, d) = base.fraction_degree_bound(var);
                match exp.as_integer() {
                    Some(k) => {
                        let times = usize::try_from(k.unsigned_abs()).unwrap_or(usize::MAX);
                        let (n, d) = (n.saturating_mul(times), d.saturating_mul(times));
                        if k < 0 {
                            (d, n)
                        } else {
                            (n, d)
                        }
                    }
                    None => (n.max(d), 0),
                }
            }
            other => {
                let inner = other
                    .children()
                    .into_iter()
                    .map(|c| c.degree_bound(var))
                    .max()
                    .unwrap_or(0);
                (inner, 0)
            }
        }
    }

    /// Every variable name occurring in the expression.
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Variable(v) => {
                    out.insert(v.clone());
                }
                other => pending.extend(other.children()),
            }
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn zero() -> Expr {
    Expr::Constant(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Constant(Rational::one())
}

pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Pow(base.boxed(), exp.boxed())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(a.boxed())
}
