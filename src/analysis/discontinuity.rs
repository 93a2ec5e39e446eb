use tracing::{debug, warn};

use super::denominator::extract_denominator;
use crate::error::EvalError;
use crate::eval::{eval_constant, eval_f64};
use crate::expr::Expr;
use crate::number::Real;
use crate::simplify::{fold_constants, substitute};
use crate::solver::solve_expr;

/// Split the zeros of the original denominator into vertical asymptotes and
/// holes.
///
/// A zero that survives cancellation is an asymptote. One that cancels is a
/// hole, reported with the value of the reduced expression there. Holes whose
/// value cannot be computed are left out.
pub fn classify_discontinuities(
    original: &Expr,
    reduced: &Expr,
    var: &str,
    max_degree: usize,
) -> (Vec<f64>, Vec<(f64, f64)>) {
    let original_roots = denominator_roots(original, var, max_degree);
    let reduced_roots = denominator_roots(reduced, var, max_degree);

    let mut asymptotes = Vec::new();
    let mut holes = Vec::new();
    for root in &original_roots {
        if reduced_roots.iter().any(|r| r.same_value(root)) {
            asymptotes.push(root.to_f64());
            continue;
        }
        match value_at(reduced, var, root) {
            Ok(y) => holes.push((root.to_f64(), y)),
            Err(err) => debug!(%root, %err, "dropping hole without a value"),
        }
    }
    (asymptotes, holes)
}

fn denominator_roots(expr: &Expr, var: &str, max_degree: usize) -> Vec<Real> {
    let denominator = extract_denominator(expr, var);
    if denominator.is_one() {
        return Vec::new();
    }
    solve_expr(&denominator, var, max_degree).unwrap_or_else(|err| {
        warn!(%denominator, %err, "treating denominator as zero-free");
        Vec::new()
    })
}

fn value_at(expr: &Expr, var: &str, point: &Real) -> Result<f64, EvalError> {
    match point {
        Real::Rational(r) => {
            let folded = fold_constants(&substitute(expr, var, &Expr::Constant(r.clone())))?;
            eval_constant(&folded)
        }
        _ => eval_f64(expr, var, point.to_f64()),
    }
}
