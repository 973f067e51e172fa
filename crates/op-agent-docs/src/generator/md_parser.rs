//! Markdown agent definition parser
//!
//! Turns one agent markdown file into an [`AgentRecord`]:
//! - header fields from the frontmatter (name, description, model, tools, version, tags)
//! - category from the file stem
//! - trigger phrases from an optional `## Trigger` section

use crate::categories::categorize;
use crate::error::{Error, Result};
use crate::frontmatter::{parse_header, Header, HeaderParser};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// Description used when the header has none
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Model placeholder used when the header has none
pub const DEFAULT_MODEL: &str = "-";

/// Maximum number of trigger phrases kept per agent
pub const MAX_TRIGGERS: usize = 4;

lazy_static! {
    static ref TRIGGER_HEADING: Regex =
        Regex::new(r"(?im)^(#+)[ \t]*Trigger[ \t]*\r?$").expect("trigger heading regex");
    static ref HEADING: Regex = Regex::new(r"^(#+)(?:\s|$)").expect("heading regex");
    static ref QUOTED_PHRASE: Regex = Regex::new(r#""([^"]+)""#).expect("quoted phrase regex");
}

/// Where an agent definition comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Authored in this repository
    Custom,
    /// Imported from the external agent collection
    External,
}

impl Provenance {
    pub fn is_external(self) -> bool {
        self == Provenance::External
    }

    /// Label used in the quick reference table
    pub fn label(self) -> &'static str {
        match self {
            Provenance::Custom => "custom",
            Provenance::External => "external",
        }
    }
}

/// One agent, normalized for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    /// File stem, used as identifier and for categorization
    pub filename: String,

    /// Display name (frontmatter `name` or the file stem)
    pub name: String,

    pub description: String,

    /// Model tag, [`DEFAULT_MODEL`] when unset
    pub model: String,

    /// Tool list as written in the header, possibly empty
    pub tools: String,

    pub emoji: &'static str,
    pub category: &'static str,

    /// Up to four quoted trigger phrases, comma separated
    pub triggers: Option<String>,

    /// Version string, empty when unset
    pub version: String,

    pub tags: Vec<String>,

    pub provenance: Provenance,
}

impl AgentRecord {
    pub fn is_external(&self) -> bool {
        self.provenance.is_external()
    }
}

/// Parse an agent markdown document.
///
/// Returns `None` when the document has no usable header; such files (a README,
/// notes) are not agents.
pub fn parse_agent_markdown(
    content: &str,
    filename: &str,
    provenance: Provenance,
    parser: &dyn HeaderParser,
) -> Option<AgentRecord> {
    let header = parse_header(content, parser);
    if header.is_empty() {
        return None;
    }

    let mut name = header_string(&header, "name").unwrap_or_else(|| filename.to_string());
    if let Some(stripped) = name.strip_suffix(".md") {
        name = stripped.to_string();
    }

    let (emoji, category) = categorize(filename);

    Some(AgentRecord {
        filename: filename.to_string(),
        name,
        description: header_string(&header, "description")
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        model: header_string(&header, "model").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        tools: header_string(&header, "tools").unwrap_or_default(),
        emoji,
        category,
        triggers: extract_triggers(content),
        version: header_string(&header, "version").unwrap_or_default(),
        tags: header_list(&header, "tags"),
        provenance,
    })
}

/// Read and parse an agent file.
///
/// A read failure is an error for this file only; `Ok(None)` means the file
/// is not an agent definition.
pub fn parse_agent_file(
    path: &Path,
    provenance: Provenance,
    parser: &dyn HeaderParser,
) -> Result<Option<AgentRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(parse_agent_markdown(&content, &filename, provenance, parser))
}

/// Extract trigger phrases from agent content.
///
/// Looks for a `Trigger` heading and returns the first [`MAX_TRIGGERS`]
/// double-quoted phrases of its section, re-quoted and joined with `", "`.
/// The section ends at the next heading of the same or a higher level.
pub fn extract_triggers(content: &str) -> Option<String> {
    let heading = TRIGGER_HEADING.captures(content)?;
    let level = heading.get(1)?.as_str().len();
    let rest = &content[heading.get(0)?.end()..];

    let section = rest
        .lines()
        .take_while(|line| heading_level(line).map_or(true, |l| l > level))
        .collect::<Vec<_>>()
        .join("\n");

    let phrases: Vec<String> = QUOTED_PHRASE
        .captures_iter(&section)
        .filter_map(|cap| cap.get(1))
        .take(MAX_TRIGGERS)
        .map(|m| format!("\"{}\"", m.as_str()))
        .collect();

    if phrases.is_empty() {
        None
    } else {
        Some(phrases.join(", "))
    }
}

/// Number of `#`s if `line` is a markdown heading
fn heading_level(line: &str) -> Option<usize> {
    HEADING
        .captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().len())
}

/// Scalar header value as a string; null and nested maps count as absent
fn header_string(header: &Header, key: &str) -> Option<String> {
    match header.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// List header value; a plain string such as `[a, b]` is split on commas
fn header_list(header: &Header, key: &str) -> Vec<String> {
    match header.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
