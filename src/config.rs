//! Configuration schema for doccheck.
//!
//! A configuration file is optional. Without one every declaration is
//! checked with all rules enabled.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::check::RuleOptions;

/// File names looked up, in order, when no configuration path is given.
pub const DEFAULT_CONFIG_NAMES: [&str; 2] = ["doccheck.yaml", ".doccheck.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    /// Glob patterns for source units to skip (e.g., "**/Migrations/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Regexes matched against declaration names; matches are not checked.
    #[serde(default)]
    pub excluded_declarations: Vec<String>,
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Toggles for the optional rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Require a `<param>` element per method parameter (default: true)
    #[serde(default = "default_true")]
    pub require_param_elements: bool,
    /// Require `<returns>` on non-void methods (default: true)
    #[serde(default = "default_true")]
    pub require_returns_element: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            require_param_elements: true,
            require_returns_element: true,
        }
    }
}

impl RulesConfig {
    pub fn options(&self) -> RuleOptions {
        RuleOptions {
            require_param_elements: self.require_param_elements,
            require_returns_element: self.require_returns_element,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Compile `excluded_paths` into a single matcher.
    pub fn excluded_paths_matcher(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| {
                anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e)
            })?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Locate a configuration file in `dir`, if one exists.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    for pattern in &config.excluded_declarations {
        regex::Regex::new(pattern).map_err(|e| {
            anyhow::anyhow!("invalid excluded_declarations pattern {:?}: {}", pattern, e)
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1.0"
name: "Billing"
excluded_paths:
  - "**/Migrations/**"
excluded_declarations:
  - "^Test"
rules:
  require_returns_element: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Billing");
        assert_eq!(config.excluded_paths.len(), 1);
        assert_eq!(config.excluded_declarations, vec!["^Test"]);
        assert!(config.rules.require_param_elements);
        assert!(!config.rules.require_returns_element);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.excluded_paths.is_empty());
        assert_eq!(config.rules.options(), RuleOptions::default());
    }

    #[test]
    fn test_excluded_paths_matcher() {
        let config = Config {
            excluded_paths: vec!["**/Migrations/**".to_string(), "*.g.cs".to_string()],
            ..Default::default()
        };
        let matcher = config.excluded_paths_matcher().unwrap();
        assert!(matcher.is_match("Data/Migrations/Init.cs"));
        assert!(matcher.is_match("Migrations/Init.cs"));
        assert!(matcher.is_match("Generated.g.cs"));
        assert!(!matcher.is_match("Data/Order.cs"));

        assert!(Config::default().excluded_paths_matcher().unwrap().is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_patterns() {
        let bad_glob = Config {
            excluded_paths: vec!["[unclosed".to_string()],
            ..Default::default()
        };
        let err = validate(&bad_glob).unwrap_err();
        assert!(err.to_string().contains("excluded_paths"));

        let bad_regex = Config {
            excluded_declarations: vec!["(".to_string()],
            ..Default::default()
        };
        let err = validate(&bad_regex).unwrap_err();
        assert!(err.to_string().contains("excluded_declarations"));

        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_discover_prefers_plain_name() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());

        std::fs::write(temp.path().join(".doccheck.yaml"), "name: hidden\n").unwrap();
        assert_eq!(
            discover(temp.path()).unwrap(),
            temp.path().join(".doccheck.yaml")
        );

        std::fs::write(temp.path().join("doccheck.yaml"), "name: plain\n").unwrap();
        let found = discover(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("doccheck.yaml"));
        assert_eq!(Config::parse_file(found).unwrap().name, "plain");
    }

    #[test]
    fn test_bundled_template_parses() {
        let config: Config =
            serde_yaml::from_str(include_str!("templates/default.yaml")).unwrap();
        validate(&config).unwrap();
        assert!(config.rules.require_param_elements);
    }
}
