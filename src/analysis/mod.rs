//! Domain, range, intercepts and discontinuities of a function of one variable.

mod denominator;
mod discontinuity;
mod domain;
mod evaluate;
mod range;

use tracing::debug;

pub use denominator::extract_denominator;
pub use discontinuity::classify_discontinuities;
pub use domain::resolve_domain;
pub use evaluate::Evaluation;
pub use range::function_range;

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::eval::eval_f64;
use crate::expr::{Expr, Rational};
use crate::parser::parse_expr;
use crate::rational::{reduce, reduced_numerator};
use crate::set::RealSubset;
use crate::solver::real_roots;

#[derive(Clone, Debug, PartialEq)]
pub enum Range {
    Set(RealSubset),
    Uncomputable(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub variable: String,
    pub original: Expr,
    pub reduced: Expr,
    pub domain: RealSubset,
    pub domain_steps: String,
    pub range: Range,
    pub x_intercepts: Vec<(f64, f64)>,
    pub y_intercept: Option<(f64, f64)>,
    pub asymptotes: Vec<f64>,
    pub holes: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Parse `text` and run the whole analysis. Only parsing can fail.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let expr = self.parse(text)?;
        Ok(self.analyze_expr(&expr))
    }

    /// Parse a function, rejecting any variable other than the configured one.
    pub fn parse(&self, text: &str) -> Result<Expr> {
        let expr = parse_expr(text)?;
        let var = &self.config.variable;
        let unknown: Vec<String> = expr
            .free_variables()
            .into_iter()
            .filter(|name| name != var)
            .collect();
        if !unknown.is_empty() {
            return Err(Error::Parse(format!(
                "unknown identifier {}; the function must depend on '{var}' only",
                unknown.join(", ")
            )));
        }
        Ok(expr)
    }

    pub fn analyze_expr(&self, original: &Expr) -> AnalysisResult {
        let var = self.config.variable.as_str();
        let max_degree = self.config.max_degree;
        debug!(%original, "analyzing");

        let reduced = reduce(original, var, max_degree);
        let (domain, domain_steps) = resolve_domain(original, var, max_degree);
        let range = match function_range(&reduced, var, max_degree) {
            Ok(set) => Range::Set(set),
            Err(err) => Range::Uncomputable(err.to_string()),
        };
        let y_intercept = eval_f64(&reduced, var, 0.0).ok().map(|y| (0.0, y));
        let x_intercepts = x_intercepts(&reduced, var, max_degree);
        let (asymptotes, holes) = classify_discontinuities(original, &reduced, var, max_degree);

        debug!(
            %reduced,
            x_intercepts = x_intercepts.len(),
            asymptotes = asymptotes.len(),
            holes = holes.len(),
            "analysis finished"
        );
        AnalysisResult {
            variable: var.to_string(),
            original: original.clone(),
            reduced,
            domain,
            domain_steps,
            range,
            x_intercepts,
            y_intercept,
            asymptotes,
            holes,
        }
    }

    /// Evaluate `expr` at `value`, keeping the substituted form and the steps.
    pub fn evaluate(&self, expr: &Expr, value: &Rational) -> Evaluation {
        evaluate::evaluate_at(expr, &self.config.variable, value, self.config.precision)
    }
}

/// Analyze `text` with the given configuration.
pub fn analyze(text: &str, config: &AnalyzerConfig) -> Result<AnalysisResult> {
    Analyzer::new(config.clone()).analyze(text)
}

fn x_intercepts(reduced: &Expr, var: &str, max_degree: usize) -> Vec<(f64, f64)> {
    let Some(numerator) = reduced_numerator(reduced, var, max_degree) else {
        return Vec::new();
    };
    match real_roots(&numerator, max_degree) {
        Ok(roots) => roots.iter().map(|r| (r.to_f64(), 0.0)).collect(),
        Err(err) => {
            debug!(%err, "no x-intercepts");
            Vec::new()
        }
    }
}
