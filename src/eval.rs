//! Floating-point evaluation of expressions.

use crate::error::EvalError;
use crate::expr::Expr;
use crate::simplify::fold_constants;
use num_integer::Integer;
use num_traits::ToPrimitive;

/// Evaluate `expr` with `var` bound to `x`.
///
/// Anything outside the real domain of an operation is an error rather than
/// a NaN, so callers can drop the point.
pub fn eval_f64(expr: &Expr, var: &str, x: f64) -> Result<f64, EvalError> {
    let value = eval_inner(expr, var, x)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Undefined)
    }
}

/// Evaluate an expression without free variables.
pub fn eval_constant(expr: &Expr) -> Result<f64, EvalError> {
    eval_f64(expr, "", 0.0)
}

fn eval_inner(expr: &Expr, var: &str, x: f64) -> Result<f64, EvalError> {
    let go = |inner: &Expr| eval_inner(inner, var, x);
    match expr {
        Expr::Variable(name) if name == var => Ok(x),
        Expr::Variable(_) => Err(EvalError::Undefined),
        Expr::Constant(c) => c.to_f64().ok_or(EvalError::Undefined),
        Expr::Add(a, b) => Ok(go(a)? + go(b)?),
        Expr::Sub(a, b) => Ok(go(a)? - go(b)?),
        Expr::Mul(a, b) => Ok(go(a)? * go(b)?),
        Expr::Div(a, b) => {
            let denom = go(b)?;
            if denom == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(go(a)? / denom)
        }
        Expr::Pow(base, exp) => power(go(base)?, exp, go(exp)?),
        Expr::Neg(a) => Ok(-go(a)?),
        Expr::Sin(a) => Ok(go(a)?.sin()),
        Expr::Cos(a) => Ok(go(a)?.cos()),
        Expr::Tan(a) => {
            let arg = go(a)?;
            if arg.cos() == 0.0 {
                return Err(EvalError::Undefined);
            }
            Ok(arg.tan())
        }
        Expr::Exp(a) => Ok(go(a)?.exp()),
        Expr::Log(a) => {
            let arg = go(a)?;
            if arg == 0.0 {
                Err(EvalError::Undefined)
            } else if arg < 0.0 {
                Err(EvalError::NotReal)
            } else {
                Ok(arg.ln())
            }
        }
        Expr::Sqrt(a) => {
            let arg = go(a)?;
            if arg < 0.0 {
                Err(EvalError::NotReal)
            } else {
                Ok(arg.sqrt())
            }
        }
        Expr::Abs(a) => Ok(go(a)?.abs()),
    }
}

fn power(base: f64, exp_expr: &Expr, exp: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exp < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if base >= 0.0 {
        return Ok(base.powf(exp));
    }
    if exp.fract() == 0.0 {
        return Ok(base.powf(exp));
    }
    // Odd roots of negative numbers stay real: (-8)^(1/3) = -2.
    match fold_constants(exp_expr) {
        Ok(Expr::Constant(e)) if e.denom().is_odd() => {
            let magnitude = base.abs().powf(exp);
            if e.numer().is_odd() {
                Ok(-magnitude)
            } else {
                Ok(magnitude)
            }
        }
        _ => Err(EvalError::NotReal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn at(text: &str, x: f64) -> Result<f64, EvalError> {
        eval_f64(&parse_expr(text).unwrap(), "x", x)
    }

    #[test]
    fn rational_function_values() {
        assert_eq!(at("(x^2 - 1)/(x + 2)", 3.0).unwrap(), 8.0 / 5.0);
        assert_eq!(at("1/(x - 2)", 2.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn real_domain_is_enforced() {
        assert_eq!(at("sqrt(x)", -1.0), Err(EvalError::NotReal));
        assert_eq!(at("log(x)", 0.0), Err(EvalError::Undefined));
        assert_eq!(at("x^(1/2)", -4.0), Err(EvalError::NotReal));
    }

    #[test]
    fn odd_roots_of_negatives() {
        let value = at("x^(1/3)", -8.0).unwrap();
        assert!((value + 2.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_variables_are_undefined() {
        assert_eq!(at("x + y", 1.0), Err(EvalError::Undefined));
    }
}
