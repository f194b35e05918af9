//! User configuration loaded from a TOML file.
//!
//! Looked up at `$XDG_CONFIG_HOME/zcalc/config.toml` unless a path is given.
//! Every key is optional:
//!
//! ```toml
//! error_timeout_ms = 2000
//! thousands_separator = ","
//! log_filter = "warn"
//! ```

use crate::calculator::{Calculator, DEFAULT_ERROR_TIMEOUT, DEFAULT_SEPARATOR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Milliseconds the error display stays up before the calculator resets.
    pub error_timeout_ms: u64,
    /// Thousands separator for the display. Empty disables grouping.
    pub thousands_separator: String,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_timeout_ms: DEFAULT_ERROR_TIMEOUT.as_millis() as u64,
            thousands_separator: DEFAULT_SEPARATOR.to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
    }

    /// Resolve which config file to read.
    ///
    /// An explicit `path` is always used. Without one, the default location
    /// is used if the file exists.
    pub fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        }
    }

    /// Load the config from a resolved path, or defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }

    /// Build a calculator with these settings.
    pub fn calculator(&self) -> Calculator {
        Calculator::new()
            .with_error_timeout(self.error_timeout())
            .with_separator(self.thousands_separator.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Command;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.error_timeout(), Duration::from_millis(2000));
        assert_eq!(config.thousands_separator, ",");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("thousands_separator = \"'\"").unwrap();
        assert_eq!(config.thousands_separator, "'");
        assert_eq!(config.error_timeout_ms, 2000);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("sparkles = true").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(Config::from_toml("error_timeout_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        assert!(Config::load(Some(path)).is_err());
    }

    #[test]
    fn test_explicit_path_always_resolved() {
        let path = Path::new("/nonexistent/zcalc/config.toml");
        assert_eq!(Config::resolve_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_no_path_loads_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_calculator_uses_separator() {
        let config = Config::from_toml("thousands_separator = \"\"").unwrap();
        let mut calc = config.calculator();
        for d in [1, 0, 0, 0, 0] {
            calc.dispatch(Command::Digit(d));
        }
        assert_eq!(calc.display().current, "10000");
    }
}
