use crate::error::EvalError;
use crate::eval::eval_constant;
use crate::expr::{Expr, Rational};
use crate::number::format_decimal;
use crate::simplify::{fold_constants, substitute};

/// Outcome of evaluating a function at a single point.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    Value {
        substituted: Expr,
        approx: f64,
        steps: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

impl Evaluation {
    pub fn steps(&self) -> Vec<String> {
        match self {
            Evaluation::Value { steps, .. } => steps.clone(),
            Evaluation::Failed { reason } => vec![reason.clone()],
        }
    }

    pub fn approx(&self) -> Option<f64> {
        match self {
            Evaluation::Value { approx, .. } => Some(*approx),
            Evaluation::Failed { .. } => None,
        }
    }
}

pub(crate) fn evaluate_at(expr: &Expr, var: &str, value: &Rational, precision: usize) -> Evaluation {
    match substitute_and_fold(expr, var, value) {
        Ok((substituted, approx)) => {
            let shown = format_decimal(value);
            let steps = vec![
                format!("1. Substitute {var}={shown} into f({var}) = {expr}"),
                format!("2. f({shown}) = {substituted}"),
                format!("3. Approximate result: {approx:.precision$}"),
            ];
            Evaluation::Value {
                substituted,
                approx,
                steps,
            }
        }
        Err(err) => Evaluation::Failed {
            reason: format!("Evaluation error: {err}"),
        },
    }
}

fn substitute_and_fold(expr: &Expr, var: &str, value: &Rational) -> Result<(Expr, f64), EvalError> {
    let substituted = fold_constants(&substitute(expr, var, &Expr::Constant(value.clone())))?;
    let approx = eval_constant(&substituted)?;
    Ok((substituted, approx))
}
