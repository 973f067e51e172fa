//! Generator configuration
//!
//! Paths are relative to the installation root unless absolute. An optional
//! `agent-docs.toml` at the root overrides any of the defaults:
//!
//! ```toml
//! agents_dir = "agents"
//! output_file = "AGENTS.md"
//!
//! [report]
//! title = "🤖 My Agents"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file looked up at the installation root
pub const CONFIG_FILE_NAME: &str = "agent-docs.toml";

/// Where to read agents from and where to write the report
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub agents_dir: PathBuf,
    pub output_file: PathBuf,

    /// Subdirectory of `agents_dir` holding externally sourced agents
    pub external_dir: String,

    /// File inside `external_dir` that documents the directory, never an agent
    pub external_readme: String,

    pub report: ReportConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            agents_dir: PathBuf::from("agents"),
            output_file: PathBuf::from("AGENTS.md"),
            external_dir: "external".to_string(),
            external_readme: "README.md".to_string(),
            report: ReportConfig::default(),
        }
    }
}

/// Fixed text of the rendered report
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub notice: String,
    pub custom_label: String,
    pub external_source_name: String,
    pub external_source_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "🤖 3Commas Claude Agents".to_string(),
            notice: "> **Auto-generated documentation.** Run `make docs` to update.".to_string(),
            custom_label: "Custom (3Commas)".to_string(),
            external_source_name: "wshobson/agents".to_string(),
            external_source_url: "https://github.com/wshobson/agents".to_string(),
        }
    }
}

impl ReportConfig {
    /// Markdown link to the external agent collection
    pub fn external_source_link(&self) -> String {
        format!("[{}]({})", self.external_source_name, self.external_source_url)
    }
}

/// Nearest ancestor of `start` (itself included) that looks like an
/// installation root: it holds `agent-docs.toml` or the default agents directory.
pub fn installation_root(start: &Path) -> Option<PathBuf> {
    let agents_dir = GeneratorConfig::default().agents_dir;
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file() || dir.join(&agents_dir).is_dir())
        .map(Path::to_path_buf)
}

impl GeneratorConfig {
    /// Load configuration for an installation root.
    ///
    /// An explicit `config_path` must exist. Otherwise `agent-docs.toml` in the
    /// root is used when present, and defaults when not. Relative paths in the
    /// result are resolved against `root`.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let candidate = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        let config = match candidate {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::config(format!("cannot read {}: {}", path.display(), e))
                })?;
                info!("Loaded configuration from {}", path.display());
                Self::from_toml(&content)?
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };

        Ok(config.resolve(root))
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Anchor relative paths at `root`
    pub fn resolve(mut self, root: &Path) -> Self {
        if self.agents_dir.is_relative() {
            self.agents_dir = root.join(&self.agents_dir);
        }
        if self.output_file.is_relative() {
            self.output_file = root.join(&self.output_file);
        }
        self
    }

    /// Directory holding externally sourced agents
    pub fn external_path(&self) -> PathBuf {
        self.agents_dir.join(&self.external_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_resolve_against_root() {
        let config = GeneratorConfig::default().resolve(Path::new("/opt/agents-repo"));
        assert_eq!(config.agents_dir, PathBuf::from("/opt/agents-repo/agents"));
        assert_eq!(config.output_file, PathBuf::from("/opt/agents-repo/AGENTS.md"));
        assert_eq!(config.external_path(), PathBuf::from("/opt/agents-repo/agents/external"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml(
            "output_file = \"docs/AGENTS.md\"\n[report]\ntitle = \"Team Agents\"\n",
        )
        .unwrap();
        assert_eq!(config.output_file, PathBuf::from("docs/AGENTS.md"));
        assert_eq!(config.agents_dir, PathBuf::from("agents"));
        assert_eq!(config.report.title, "Team Agents");
        assert_eq!(config.report.custom_label, "Custom (3Commas)");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = GeneratorConfig::from_toml("agents_dir = [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_uses_root_config_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "agents_dir = \"defs\"\n",
        )
        .unwrap();

        let config = GeneratorConfig::load(temp_dir.path(), None).unwrap();
        assert_eq!(config.agents_dir, temp_dir.path().join("defs"));
    }

    #[test]
    fn test_load_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = GeneratorConfig::load(temp_dir.path(), None).unwrap();
        assert_eq!(config.output_file, temp_dir.path().join("AGENTS.md"));
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(GeneratorConfig::load(temp_dir.path(), Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_installation_root_from_binary_location() {
        let temp_dir = TempDir::new().unwrap();
        let release_dir = temp_dir.path().join("target").join("release");
        std::fs::create_dir_all(&release_dir).unwrap();
        std::fs::create_dir(temp_dir.path().join("agents")).unwrap();

        let exe = release_dir.join("generate-agent-docs");
        assert_eq!(installation_root(&exe), Some(temp_dir.path().to_path_buf()));
    }

    #[test]
    fn test_installation_root_from_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let bin_dir = temp_dir.path().join("bin");
        std::fs::create_dir(&bin_dir).unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(
            installation_root(&bin_dir.join("generate-agent-docs")),
            Some(temp_dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_installation_root_nearest_wins() {
        let temp_dir = TempDir::new().unwrap();
        let inner = temp_dir.path().join("inner");
        std::fs::create_dir_all(inner.join("agents")).unwrap();
        std::fs::create_dir(temp_dir.path().join("agents")).unwrap();

        assert_eq!(installation_root(&inner.join("tool")), Some(inner));
    }

    #[test]
    fn test_external_source_link() {
        assert_eq!(
            ReportConfig::default().external_source_link(),
            "[wshobson/agents](https://github.com/wshobson/agents)"
        );
    }
}
