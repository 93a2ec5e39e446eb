use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::solver::DEFAULT_MAX_DEGREE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Name of the free variable.
    pub variable: String,
    /// Decimal places shown for approximate results.
    pub precision: usize,
    /// Largest polynomial degree handed to the root finder.
    pub max_degree: usize,
    pub plot: PlotConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            variable: "x".to_string(),
            precision: 4,
            max_degree: DEFAULT_MAX_DEGREE,
            plot: PlotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
    /// The view is clipped to `[-y_limit, y_limit]`.
    pub y_limit: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            samples: 801,
            y_limit: 20.0,
            width: 1000,
            height: 800,
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let var = &self.variable;
        let mut chars = var.chars();
        let valid_name = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if !valid_name {
            return Err(ConfigError::Invalid(format!(
                "variable must be an identifier, got '{var}'"
            )));
        }
        if is_reserved(var) {
            return Err(ConfigError::Invalid(format!(
                "variable '{var}' clashes with a function name"
            )));
        }
        if self.max_degree == 0 {
            return Err(ConfigError::Invalid("max_degree must be positive".to_string()));
        }
        let plot = &self.plot;
        if !(plot.x_min < plot.x_max) {
            return Err(ConfigError::Invalid(format!(
                "plot.x_min ({}) must be below plot.x_max ({})",
                plot.x_min, plot.x_max
            )));
        }
        if plot.samples < 2 {
            return Err(ConfigError::Invalid("plot.samples must be at least 2".to_string()));
        }
        if !(plot.y_limit > 0.0) {
            return Err(ConfigError::Invalid("plot.y_limit must be positive".to_string()));
        }
        if plot.width == 0 || plot.height == 0 {
            return Err(ConfigError::Invalid("plot size must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn is_reserved(name: &str) -> bool {
    ["sqrt", "sin", "cos", "tan", "exp", "log", "ln", "abs"]
        .iter()
        .any(|f| name.starts_with(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = AnalyzerConfig::from_toml_str("precision = 2\n[plot]\nsamples = 101\n").unwrap();
        assert_eq!(config.precision, 2);
        assert_eq!(config.variable, "x");
        assert_eq!(config.plot.samples, 101);
        assert_eq!(config.plot.x_max, 10.0);
    }

    #[test]
    fn function_names_are_not_variables() {
        assert!(matches!(
            AnalyzerConfig::from_toml_str("variable = \"sinx\""),
            Err(ConfigError::Invalid(_))
        ));
    }
}
