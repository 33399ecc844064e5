//! Project configuration module.
//!
//! Handles loading and validating `docs-sidebar.toml`. Keys the file leaves
//! out keep their stock defaults, and a project with the conventional
//! layout needs no config at all:
//!
//! ```text
//! project/
//! ├── docs-sidebar.toml        # Optional, overrides stock defaults
//! ├── sidebars.json            # Sidebar declarations
//! └── docs/                    # Content collection
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! sidebars = "sidebars.json"  # Declaration file (.json or .toml)
//! docs_dir = "docs"           # Documents referenced by the sidebars
//!
//! [docs]
//! extensions = ["md", "mdx"]  # Files that count as documents
//!
//! [check]
//! fail_on_unlisted = false    # Fail `check` when a doc is in no sidebar
//!
//! [render]
//! indent_width = 4            # Spaces per depth level in text output
//! numbered = true             # Prefix entries with their sibling position
//! base_url = "/docs"          # URL prefix for doc links in HTML output
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "docs-sidebar.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `docs-sidebar.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Sidebar declaration file, relative to the project root.
    pub sidebars: String,
    /// Docs directory, relative to the project root.
    pub docs_dir: String,
    /// Content collection settings.
    pub docs: DocsConfig,
    /// Cross-check settings.
    pub check: CheckConfig,
    /// Text and HTML output settings.
    pub render: RenderConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            sidebars: "sidebars.json".to_string(),
            docs_dir: "docs".to_string(),
            docs: DocsConfig::default(),
            check: CheckConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sidebars.trim().is_empty() {
            return Err(ConfigError::Validation("sidebars must not be empty".into()));
        }
        if self.docs.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .docs
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "docs.extensions entries must be bare extensions like \"md\", got {bad:?}"
            )));
        }
        if self.render.indent_width == 0 || self.render.indent_width > 8 {
            return Err(ConfigError::Validation(
                "render.indent_width must be 1-8".into(),
            ));
        }
        Ok(())
    }

    /// Sidebar declaration path resolved against the project root.
    pub fn sidebars_path(&self, root: &Path) -> PathBuf {
        root.join(&self.sidebars)
    }

    /// Docs directory resolved against the project root.
    pub fn docs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.docs_dir)
    }
}

/// Content collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// File extensions (without the dot) that count as documents.
    pub extensions: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "mdx".to_string()],
        }
    }
}

/// Cross-check settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Treat documents that appear in no sidebar as a failure.
    pub fail_on_unlisted: bool,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Spaces per depth level in text tree output.
    pub indent_width: usize,
    /// Prefix each entry with its 1-based sibling position.
    pub numbered: bool,
    /// URL prefix for document links in HTML output.
    pub base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            numbered: true,
            base_url: "/docs".to_string(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate a config file's contents.
///
/// Every struct carries `#[serde(default)]`, so omitted keys keep their
/// stock values.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `docs-sidebar.toml` from the project root, or stock defaults if
/// there is none.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_config_file(&config_path)
}

/// Load a config from an explicit path. The file must exist.
pub fn load_config_file(config_path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Returns a fully-commented stock `docs-sidebar.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-sidebar Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Sidebar declaration file, relative to the project root (--root).
# Both .json and .toml declarations are supported.
sidebars = "sidebars.json"

# Directory holding the documents the sidebars reference, relative to the
# project root.
docs_dir = "docs"

# ---------------------------------------------------------------------------
# Content collection
# ---------------------------------------------------------------------------
[docs]
# File extensions (without the dot) that count as documents.
extensions = ["md", "mdx"]

# ---------------------------------------------------------------------------
# Cross-check
# ---------------------------------------------------------------------------
[check]
# Fail `check` when a document appears in no sidebar.
fail_on_unlisted = false

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[render]
# Spaces per depth level in text tree output (1-8).
indent_width = 4

# Prefix entries with their position among siblings (001, 002, ...).
numbered = true

# URL prefix for document links in HTML output.
base_url = "/docs"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = ProjectConfig::default();
        assert_eq!(config.sidebars, "sidebars.json");
        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.docs.extensions, vec!["md", "mdx"]);
        assert!(!config.check.fail_on_unlisted);
        assert_eq!(config.render.indent_width, 4);
        assert!(config.render.numbered);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[render]
numbered = false
"#;
        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert!(!config.render.numbered);
        // Default values preserved
        assert_eq!(config.render.indent_width, 4);
        assert_eq!(config.sidebars, "sidebars.json");
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[render]
numbred = false
"#;
        assert!(toml::from_str::<ProjectConfig>(toml).is_err());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.docs_dir, "docs");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
sidebars = "nav/sidebars.toml"

[check]
fail_on_unlisted = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.sidebars, "nav/sidebars.toml");
        assert!(config.check.fail_on_unlisted);
        // Unspecified values should be defaults
        assert_eq!(config.docs.extensions, vec!["md", "mdx"]);
        assert_eq!(
            config.sidebars_path(tmp.path()),
            tmp.path().join("nav/sidebars.toml")
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validation_rejects_dotted_extension() {
        let mut config = ProjectConfig::default();
        config.docs.extensions = vec![".md".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_zero_indent() {
        let mut config = ProjectConfig::default();
        config.render.indent_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_config_replaces_arrays() {
        let config = parse_config("[docs]\nextensions = [\"markdown\"]\n").unwrap();
        assert_eq!(config.docs.extensions, vec!["markdown"]);
        assert_eq!(config.render.base_url, "/docs");
    }

    #[test]
    fn parse_config_validates() {
        let result = parse_config("[render]\nindent_width = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("typo.toml");
        match load_config_file(&missing) {
            Err(ConfigError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "docs_dir = \"content\"\n").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.docs_path(tmp.path()), tmp.path().join("content"));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: ProjectConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = ProjectConfig::default();
        assert_eq!(config.sidebars, defaults.sidebars);
        assert_eq!(config.docs.extensions, defaults.docs.extensions);
        assert_eq!(config.render.base_url, defaults.render.base_url);
        config.validate().unwrap();
    }
}
