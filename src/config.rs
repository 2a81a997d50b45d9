//! Analyzer configuration
//!
//! Loaded from a TOML file; every field is optional. CLI flags override what
//! the file sets.
//!
//! ```toml
//! extra_platform_prefixes = ["com.fasterxml", "io.micrometer"]
//! jobs = 4
//! max_depth = 12
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Default directory recursion depth
pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Import prefixes treated as platform, on top of the built-in list
    pub extra_platform_prefixes: Vec<String>,
    /// Batch worker count; unset uses all cores
    pub jobs: Option<usize>,
    /// Directory recursion depth when expanding path arguments
    pub max_depth: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extra_platform_prefixes: Vec::new(),
            jobs: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| AnalyzerError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AnalyzerError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply CLI overrides; `None` keeps the file value
    pub fn with_overrides(mut self, jobs: Option<usize>, max_depth: Option<usize>) -> Self {
        if jobs.is_some() {
            self.jobs = jobs;
        }
        if let Some(depth) = max_depth {
            self.max_depth = depth;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(AnalyzerError::Config {
                message: "jobs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_full_config() {
        let config = AnalyzerConfig::from_toml_str(indoc! {r#"
            extra_platform_prefixes = ["com.fasterxml"]
            jobs = 4
            max_depth = 3
        "#})
        .unwrap();
        assert_eq!(config.extra_platform_prefixes, vec!["com.fasterxml".to_string()]);
        assert_eq!(config.jobs, Some(4));
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = AnalyzerConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, AnalyzerError::Config { .. }));
    }

    #[test]
    fn test_zero_jobs_is_rejected() {
        let err = AnalyzerConfig::from_toml_str("jobs = 0").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_overrides() {
        let config = AnalyzerConfig {
            jobs: Some(2),
            ..Default::default()
        }
        .with_overrides(None, Some(1));
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jobs = 8").unwrap();
        let config = AnalyzerConfig::load(file.path()).unwrap();
        assert_eq!(config.jobs, Some(8));

        let err = AnalyzerConfig::load(Path::new("/nonexistent/riskmeta.toml")).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config { .. }));
    }
}
