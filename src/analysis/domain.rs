use tracing::{debug, warn};

use super::denominator::extract_denominator;
use crate::expr::Expr;
use crate::set::RealSubset;
use crate::solver::solve_expr;

const POLYNOMIAL_STEPS: &str =
    "The function is a polynomial, so it has no restrictions.\nThe domain is all real numbers.";

/// Domain of `expr` with a numbered explanation of how it was found.
///
/// Only zeros of the denominator are excluded. Solver failures fall back to
/// the whole line with the error in the explanation.
pub fn resolve_domain(expr: &Expr, var: &str, max_degree: usize) -> (RealSubset, String) {
    let denominator = extract_denominator(expr, var);
    if denominator.is_one() {
        return (RealSubset::WholeLine, POLYNOMIAL_STEPS.to_string());
    }

    let roots = match solve_expr(&denominator, var, max_degree) {
        Ok(roots) => roots,
        Err(err) => {
            warn!(%denominator, %err, "could not solve the denominator");
            return (
                RealSubset::WholeLine,
                format!("Could not compute the domain automatically. Error: {err}"),
            );
        }
    };
    debug!(%denominator, excluded = roots.len(), "domain restrictions");

    let mut steps = vec![
        format!("1. To find the domain, look for restrictions in the denominator: {denominator}."),
        format!("2. Solve the equation {denominator} = 0 to find the values {var} cannot take."),
    ];

    if roots.is_empty() {
        steps.push("3. The denominator is never zero, so there are no restrictions.".to_string());
        steps.push("The domain is all real numbers.".to_string());
        return (RealSubset::WholeLine, steps.join("\n"));
    }

    let listed = roots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    steps.push(format!("3. The solutions are: {var} = {listed}."));
    steps.push("4. Therefore, the domain is all real numbers except these points.".to_string());

    (RealSubset::WholeLine.remove_points(&roots), steps.join("\n"))
}
