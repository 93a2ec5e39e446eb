use crate::error::EvalError;
use crate::expr::{one, zero, Expr, Rational};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

const MAX_FOLD_EXPONENT: u64 = 4096;

/// Collapse every variable-free subtree that has an exact rational value.
///
/// Subtrees without an exact value (`sqrt(2)`, `log(3)`) are kept symbolic.
/// A constant division by zero or a constant outside a function's real domain
/// is an error.
pub fn fold_constants(expr: &Expr) -> Result<Expr, EvalError> {
    Ok(match expr {
        Expr::Variable(_) | Expr::Constant(_) => expr.clone(),
        Expr::Add(a, b) => fold_add(fold_constants(a)?, fold_constants(b)?),
        Expr::Sub(a, b) => fold_sub(fold_constants(a)?, fold_constants(b)?),
        Expr::Mul(a, b) => fold_mul(fold_constants(a)?, fold_constants(b)?),
        Expr::Div(a, b) => fold_div(fold_constants(a)?, fold_constants(b)?)?,
        Expr::Pow(a, b) => fold_pow(fold_constants(a)?, fold_constants(b)?)?,
        Expr::Neg(a) => fold_neg(fold_constants(a)?),

        Expr::Sin(a) => match fold_constants(a)? {
            x if x.is_zero() => zero(),
            x => Expr::Sin(x.boxed()),
        },

        Expr::Cos(a) => match fold_constants(a)? {
            x if x.is_zero() => one(),
            x => Expr::Cos(x.boxed()),
        },

        Expr::Tan(a) => match fold_constants(a)? {
            x if x.is_zero() => zero(),
            x => Expr::Tan(x.boxed()),
        },

        Expr::Exp(a) => match fold_constants(a)? {
            x if x.is_zero() => one(),
            x => Expr::Exp(x.boxed()),
        },

        Expr::Log(a) => match fold_constants(a)? {
            Expr::Constant(c) if c.is_zero() => return Err(EvalError::Undefined),
            Expr::Constant(c) if c.is_negative() => return Err(EvalError::NotReal),
            x if x.is_one() => zero(),
            x => Expr::Log(x.boxed()),
        },

        Expr::Sqrt(a) => match fold_constants(a)? {
            Expr::Constant(c) if c.is_negative() => return Err(EvalError::NotReal),
            Expr::Constant(c) => match exact_root(&c, 2) {
                Some(root) => Expr::Constant(root),
                None => Expr::Sqrt(Expr::Constant(c).boxed()),
            },
            x => Expr::Sqrt(x.boxed()),
        },

        Expr::Abs(a) => match fold_constants(a)? {
            Expr::Constant(c) => Expr::Constant(c.abs()),
            Expr::Neg(inner) => Expr::Abs(inner),
            x => Expr::Abs(x.boxed()),
        },
    })
}

fn fold_add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x + y),
        (x, y) if y.is_zero() => x,
        (x, y) if x.is_zero() => y,
        (x, y) => Expr::Add(x.boxed(), y.boxed()),
    }
}

fn fold_sub(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x - y),
        (x, y) if y.is_zero() => x,
        (x, y) if x.is_zero() => fold_neg(y),
        (x, y) => Expr::Sub(x.boxed(), y.boxed()),
    }
}

fn fold_mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x * y),
        (x, y) if x.is_one() => y,
        (x, y) if y.is_one() => x,
        (x, y) => Expr::Mul(x.boxed(), y.boxed()),
    }
}

fn fold_div(a: Expr, b: Expr) -> Result<Expr, EvalError> {
    Ok(match (a, b) {
        (_, y) if y.is_zero() => return Err(EvalError::DivisionByZero),
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x / y),
        (x, y) if y.is_one() => x,
        (x, y) => Expr::Div(x.boxed(), y.boxed()),
    })
}

fn fold_neg(a: Expr) -> Expr {
    match a {
        Expr::Constant(c) => Expr::Constant(-c),
        Expr::Neg(inner) => *inner,
        x => Expr::Neg(x.boxed()),
    }
}

fn fold_pow(base: Expr, exp: Expr) -> Result<Expr, EvalError> {
    if exp.is_zero() {
        return Ok(one());
    }
    if exp.is_one() {
        return Ok(base);
    }
    let (Expr::Constant(b), Expr::Constant(e)) = (&base, &exp) else {
        return Ok(Expr::Pow(base.boxed(), exp.boxed()));
    };
    if b.is_zero() && e.is_negative() {
        return Err(EvalError::DivisionByZero);
    }

    let root_index = e.denom().to_u32();
    let power = e.numer().abs().to_u64();
    let (Some(root_index), Some(power)) = (root_index, power) else {
        return Ok(Expr::Pow(base.boxed(), exp.boxed()));
    };
    if power > MAX_FOLD_EXPONENT {
        return Ok(Expr::Pow(base.boxed(), exp.boxed()));
    }
    if b.is_negative() && root_index % 2 == 0 {
        return Err(EvalError::NotReal);
    }

    let Some(root) = exact_root(b, root_index) else {
        return Ok(Expr::Pow(base.boxed(), exp.boxed()));
    };
    let mut value = Rational::one();
    for _ in 0..power {
        value *= root.clone();
    }
    if e.is_negative() {
        value = value.recip();
    }
    Ok(Expr::Constant(value))
}

/// Exact `n`-th root of a rational, if it has one. Negative values need odd `n`.
fn exact_root(value: &Rational, n: u32) -> Option<Rational> {
    if n == 1 {
        return Some(value.clone());
    }
    if value.is_negative() && n % 2 == 0 {
        return None;
    }
    let numer = exact_int_root(value.numer(), n)?;
    let denom = exact_int_root(value.denom(), n)?;
    Some(Rational::new(numer, denom))
}

fn exact_int_root(value: &BigInt, n: u32) -> Option<BigInt> {
    let root = value.nth_root(n);
    if num_traits::pow(root.clone(), n as usize) == *value {
        Some(root)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, div, mul, pow, rational};
    use crate::parser::parse_expr;

    fn fold(text: &str) -> Result<Expr, EvalError> {
        fold_constants(&parse_expr(text).unwrap())
    }

    #[test]
    fn arithmetic_on_constants() {
        assert_eq!(fold("3 + 1").unwrap(), Expr::integer(4));
        assert_eq!(fold("(2^2 - 1)/(2 - 1)").unwrap(), Expr::integer(3));
        assert_eq!(fold("2^-2").unwrap(), Expr::Constant(rational(1, 4)));
    }

    #[test]
    fn exact_roots_fold() {
        assert_eq!(fold("sqrt(9/4)").unwrap(), Expr::Constant(rational(3, 2)));
        assert_eq!(fold("(-8)^(1/3)").unwrap(), Expr::integer(-2));
        assert_eq!(
            fold("sqrt(2)").unwrap(),
            Expr::Sqrt(Expr::integer(2).boxed())
        );
    }

    #[test]
    fn domain_errors() {
        assert_eq!(fold("1/(2 - 2)"), Err(EvalError::DivisionByZero));
        assert_eq!(fold("sqrt(-1)"), Err(EvalError::NotReal));
        assert_eq!(fold("log(0)"), Err(EvalError::Undefined));
        assert_eq!(fold("0^-1"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn symbolic_parts_survive() {
        let x = Expr::var("x");
        assert_eq!(
            fold("1*x + 0").unwrap(),
            x.clone()
        );
        assert_eq!(
            fold("(x + 2*3)/(1 + 1)").unwrap(),
            div(add(x.clone(), Expr::integer(6)), Expr::integer(2))
        );
        assert_eq!(
            fold("2*x^2").unwrap(),
            mul(Expr::integer(2), pow(x, Expr::integer(2)))
        );
    }
}
