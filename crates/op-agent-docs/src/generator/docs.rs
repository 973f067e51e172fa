//! AGENTS.md generation
//!
//! Reads every `*.md` agent file in the agents directory (and its `external/`
//! subdirectory), renders the reference page and overwrites the output file.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::frontmatter::HeaderParser;
use crate::generator::md_parser::{parse_agent_file, AgentRecord, Provenance};
use crate::generator::template::{group_by_category, render_agents_doc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a generation run
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// No agent definitions were found; nothing was written
    NoAgents { warnings: Vec<String> },
    Generated(GenerateSummary),
}

/// Counts for a written report
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub total: usize,
    pub custom: usize,
    pub external: usize,
    pub categories: usize,
    /// Files that could not be read
    pub warnings: Vec<String>,
}

impl GenerateSummary {
    /// One-line human summary
    pub fn message(&self) -> String {
        let ext_msg = if self.external > 0 {
            format!(", {} external", self.external)
        } else {
            String::new()
        };
        format!(
            "✓ Generated {} ({} agents: {} custom{})",
            self.output.display(),
            self.total,
            self.custom,
            ext_msg
        )
    }
}

/// Agents collected from the agents directory
#[derive(Debug, Default)]
pub struct AgentCollection {
    pub agents: Vec<AgentRecord>,
    pub warnings: Vec<String>,
}

impl AgentCollection {
    fn add_dir(
        &mut self,
        dir: &Path,
        provenance: Provenance,
        skip_name: Option<&str>,
        parser: &dyn HeaderParser,
    ) -> Result<()> {
        for path in list_markdown_files(dir)? {
            let is_skipped = skip_name
                .map(|skip| path.file_name().map(|n| n == skip).unwrap_or(false))
                .unwrap_or(false);
            if is_skipped {
                continue;
            }

            match parse_agent_file(&path, provenance, parser) {
                Ok(Some(agent)) => self.agents.push(agent),
                Ok(None) => debug!("Skipping {}: no frontmatter", path.display()),
                Err(e) if e.is_recoverable() => {
                    warn!("Warning: {}", e);
                    self.warnings.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// `*.md` entries directly inside `dir` that are not directories, sorted by
/// file name. Broken symlinks are kept so the failed read shows up as a warning.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() && path.extension().map(|e| e == "md").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parse all custom and external agents
pub fn collect_agents(
    config: &GeneratorConfig,
    parser: &dyn HeaderParser,
) -> Result<AgentCollection> {
    if !config.agents_dir.is_dir() {
        return Err(Error::AgentsDirNotFound(config.agents_dir.clone()));
    }

    let mut collection = AgentCollection::default();
    collection.add_dir(&config.agents_dir, Provenance::Custom, None, parser)?;

    let external_dir = config.external_path();
    if external_dir.is_dir() {
        collection.add_dir(
            &external_dir,
            Provenance::External,
            Some(&config.external_readme),
            parser,
        )?;
    }

    Ok(collection)
}

/// Generate AGENTS.md from all agent files
pub fn generate_docs(
    config: &GeneratorConfig,
    parser: &dyn HeaderParser,
) -> Result<GenerateOutcome> {
    debug!(
        "Generating agent docs from {} with {} header parser",
        config.agents_dir.display(),
        parser.name()
    );

    let AgentCollection { agents, warnings } = collect_agents(config, parser)?;
    if agents.is_empty() {
        return Ok(GenerateOutcome::NoAgents { warnings });
    }

    let external = agents.iter().filter(|a| a.is_external()).count();
    let categories = group_by_category(&agents).len();
    let content = render_agents_doc(&agents, &config.report);

    std::fs::write(&config.output_file, content).map_err(|source| Error::Write {
        path: config.output_file.clone(),
        source,
    })?;

    let summary = GenerateSummary {
        output: config.output_file.clone(),
        total: agents.len(),
        custom: agents.len() - external,
        external,
        categories,
        warnings,
    };
    info!(
        total = summary.total,
        custom = summary.custom,
        external = summary.external,
        "Wrote {}",
        summary.output.display()
    );

    Ok(GenerateOutcome::Generated(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::BasicHeaderParser;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> GeneratorConfig {
        GeneratorConfig::default().resolve(root)
    }

    #[test]
    fn test_list_markdown_files_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.md", "a.md", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("dir.md")).unwrap();

        let files = list_markdown_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_warned() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());
        std::fs::create_dir(&config.agents_dir).unwrap();
        std::fs::write(
            config.agents_dir.join("python-pro.md"),
            "---\nname: python-pro\n---\n",
        )
        .unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("does-not-exist.md"),
            config.agents_dir.join("ghost.md"),
        )
        .unwrap();

        let files = list_markdown_files(&config.agents_dir).unwrap();
        assert_eq!(files.len(), 2);

        let outcome = generate_docs(&config, &BasicHeaderParser).unwrap();
        let GenerateOutcome::Generated(summary) = outcome else {
            panic!("expected a generated report");
        };
        assert_eq!(summary.total, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("ghost.md"));
    }

    #[test]
    fn test_missing_agents_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = generate_docs(&config_for(temp_dir.path()), &BasicHeaderParser).unwrap_err();
        assert!(matches!(err, Error::AgentsDirNotFound(_)));
    }

    #[test]
    fn test_no_agents_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());
        std::fs::create_dir(&config.agents_dir).unwrap();
        std::fs::write(config.agents_dir.join("README.md"), "# Agents\n").unwrap();

        let outcome = generate_docs(&config, &BasicHeaderParser).unwrap();
        assert_eq!(outcome, GenerateOutcome::NoAgents { warnings: vec![] });
        assert!(!config.output_file.exists());
    }

    #[test]
    fn test_summary_message() {
        let mut summary = GenerateSummary {
            output: PathBuf::from("AGENTS.md"),
            total: 4,
            custom: 3,
            external: 1,
            categories: 2,
            warnings: vec![],
        };
        assert_eq!(summary.message(), "✓ Generated AGENTS.md (4 agents: 3 custom, 1 external)");
        summary.external = 0;
        summary.total = 3;
        assert_eq!(summary.message(), "✓ Generated AGENTS.md (3 agents: 3 custom)");
    }
}
