//! Agent documentation generation
//!
//! Provides tools for:
//! - Parsing markdown agent definitions
//! - Rendering the aggregated AGENTS.md page
//! - Scanning agent directories and writing the result

pub mod docs;
pub mod md_parser;
pub mod template;

pub use docs::{collect_agents, generate_docs, GenerateOutcome, GenerateSummary};
pub use md_parser::{extract_triggers, parse_agent_file, parse_agent_markdown, AgentRecord, Provenance};
pub use template::render_agents_doc;
