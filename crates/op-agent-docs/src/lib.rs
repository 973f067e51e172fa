//! op-agent-docs: AGENTS.md generator
//!
//! Scans markdown agent definitions, groups them by category and renders a
//! single reference page.

pub mod categories;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod generator;

// Re-export main types
pub use categories::{categorize, match_pattern, CategoryRule, CATEGORIES};
pub use config::{GeneratorConfig, ReportConfig};
pub use error::{Error, Result};
pub use frontmatter::{default_header_parser, parse_header, HeaderParser};
pub use generator::{generate_docs, AgentRecord, GenerateOutcome, GenerateSummary, Provenance};
