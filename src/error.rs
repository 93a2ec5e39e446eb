use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Failure while solving `p(x) = 0`. Recovered locally by every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("the expression {0} is not a polynomial")]
    NotPolynomial(String),
    #[error("the polynomial is identically zero, every value is a solution")]
    ZeroPolynomial,
    #[error("degree {degree} exceeds the solver limit of {limit}")]
    DegreeTooHigh { degree: usize, limit: usize },
    #[error("expanding the expression could reach degree {bound}, above the limit of {limit}")]
    ExpansionTooLarge { bound: usize, limit: usize },
    #[error("numeric root finding did not converge within {0} iterations")]
    NoConvergence(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("the result is not a real number")]
    NotReal,
    #[error("the expression is undefined at this point")]
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range is only computed for rational functions")]
    Unsupported,
    #[error(transparent)]
    Solve(#[from] SolveError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: the function is undefined on the whole sampled range")]
    NoData,
    #[error("failed to render plot: {0}")]
    Render(String),
}
