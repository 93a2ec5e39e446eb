use std::fmt::Write;

use super::set::format_real_subset;
use crate::analysis::{AnalysisResult, Evaluation, Range};
use crate::expr::Rational;
use crate::number::{format_decimal, format_float};

const NONE: &str = "None";

/// Plain-text report of an analysis, optionally followed by a point evaluation.
pub fn render_report(result: &AnalysisResult, evaluation: Option<(&Rational, &Evaluation)>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result, evaluation);
    out
}

fn write_report(
    out: &mut String,
    result: &AnalysisResult,
    evaluation: Option<(&Rational, &Evaluation)>,
) -> std::fmt::Result {
    let range = match &result.range {
        Range::Set(set) => format_real_subset(set),
        Range::Uncomputable(reason) => format!("Could not be computed ({reason})"),
    };

    let var = &result.variable;
    writeln!(out, "--- FUNCTION ANALYSIS ---")?;
    writeln!(out, "Original function: f({var}) = {}", result.original)?;
    writeln!(out, "Simplified function: f({var}) = {}", result.reduced)?;
    writeln!(out)?;
    writeln!(out, " • Domain: {}", format_real_subset(&result.domain))?;
    writeln!(out, " • Range: {range}")?;
    writeln!(out, " • X-intercepts: {}", points(&result.x_intercepts))?;
    writeln!(
        out,
        " • Y-intercept: {}",
        points(result.y_intercept.as_slice())
    )?;
    writeln!(
        out,
        " • Vertical asymptotes: {}",
        asymptotes(var, &result.asymptotes)
    )?;
    writeln!(out, " • Holes (discontinuities): {}", holes(&result.holes))?;
    writeln!(out)?;
    writeln!(out, "--- DOMAIN JUSTIFICATION ---")?;
    writeln!(out, "{}", result.domain_steps)?;

    if let Some((value, evaluation)) = evaluation {
        writeln!(out)?;
        writeln!(out, "--- EVALUATION AT {var} = {} ---", format_decimal(value))?;
        for line in evaluation.steps() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

fn points(points: &[(f64, f64)]) -> String {
    if points.is_empty() {
        return NONE.to_string();
    }
    points
        .iter()
        .map(|(x, y)| format!("({}, {})", format_float(*x), format_float(*y)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn asymptotes(var: &str, xs: &[f64]) -> String {
    if xs.is_empty() {
        return NONE.to_string();
    }
    xs.iter()
        .map(|x| format!("{var} = {}", format_float(*x)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn holes(holes: &[(f64, f64)]) -> String {
    if holes.is_empty() {
        return NONE.to_string();
    }
    holes
        .iter()
        .map(|(x, y)| format!("at ({}, {y:.2})", format_float(*x)))
        .collect::<Vec<_>>()
        .join(", ")
}
