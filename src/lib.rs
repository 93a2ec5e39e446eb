//! Domain, range, asymptote and hole analysis for rational functions of one
//! variable, with exact arithmetic where the algebra allows it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod number;
pub mod parser;
pub mod plot;
pub mod polynomial;
pub mod rational;
pub mod set;
pub mod simplify;
pub mod solver;

pub use analysis::{
    analyze, classify_discontinuities, extract_denominator, function_range, resolve_domain,
    AnalysisResult, Analyzer, Evaluation, Range,
};
pub use config::{AnalyzerConfig, PlotConfig};
pub use error::{ConfigError, Error, EvalError, PlotError, RangeError, Result, SolveError};
pub use expr::{add, div, mul, neg, one, pow, rational, sub, zero, Expr, Rational};
pub use format::{format_real_subset, pretty, render_report};
pub use number::Real;
pub use parser::{parse_expr, parse_number};
pub use plot::{render_svg, PlotData};
pub use polynomial::Poly;
pub use set::{Bound, Interval, RealSubset};
pub use solver::{real_roots, solve_polynomial, Root};
