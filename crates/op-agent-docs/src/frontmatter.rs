//! Frontmatter header parsing
//!
//! Agent files start with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! name: python-pro
//! description: Master Python 3.12+ development
//! model: sonnet
//! ---
//! ```
//!
//! Two parsing strategies exist behind [`HeaderParser`]. The strict YAML parser is
//! compiled in with the `yaml` feature and falls back to the line-based parser when
//! the block is not valid YAML. [`default_header_parser`] picks one once at startup.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Header block delimiter
pub const DELIMITER: &str = "---";

/// Parsed header fields
pub type Header = BTreeMap<String, Value>;

/// Strategy for turning the raw header block into fields
pub trait HeaderParser: Send + Sync {
    /// Strategy name, for logs
    fn name(&self) -> &'static str;

    /// Parse the text between the delimiters. Never fails; unusable input yields
    /// an empty header.
    fn parse(&self, block: &str) -> Header;
}

/// Permissive `key: value` line parser
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicHeaderParser;

impl HeaderParser for BasicHeaderParser {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn parse(&self, block: &str) -> Header {
        let mut header = Header::new();
        for line in block.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            header.insert(
                key.trim().to_string(),
                Value::String(unquote(value.trim()).to_string()),
            );
        }
        header
    }
}

/// Strip one leading and one trailing quote character, single or double.
fn unquote(value: &str) -> &str {
    let value = value
        .strip_prefix(['"', '\''])
        .unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

/// Strict YAML parser, falling back to [`BasicHeaderParser`] on syntax errors
#[cfg(feature = "yaml")]
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlHeaderParser;

#[cfg(feature = "yaml")]
impl HeaderParser for YamlHeaderParser {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn parse(&self, block: &str) -> Header {
        let yaml = match serde_yaml::from_str::<serde_yaml::Value>(block) {
            Ok(serde_yaml::Value::Null) => return Header::new(),
            Ok(yaml) => yaml,
            Err(e) => {
                debug!("YAML frontmatter invalid ({}), using basic parser", e);
                return BasicHeaderParser.parse(block);
            }
        };

        match serde_json::to_value(yaml) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            Ok(_) => {
                debug!("YAML frontmatter is not a mapping, using basic parser");
                BasicHeaderParser.parse(block)
            }
            Err(e) => {
                debug!("YAML frontmatter not representable ({}), using basic parser", e);
                BasicHeaderParser.parse(block)
            }
        }
    }
}

/// The richest parser this build supports
pub fn default_header_parser() -> &'static dyn HeaderParser {
    #[cfg(feature = "yaml")]
    {
        &YamlHeaderParser
    }
    #[cfg(not(feature = "yaml"))]
    {
        &BasicHeaderParser
    }
}

/// Return the text between the opening and closing delimiter lines.
///
/// The opening delimiter must be the very first line.
pub fn extract_block(content: &str) -> Option<String> {
    let mut lines = content.split('\n');
    if lines.next()?.trim_end() != DELIMITER {
        return None;
    }

    let mut block = Vec::new();
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(block.join("\n"));
        }
        block.push(line);
    }
    None
}

/// Parse the header of an agent file. Empty when there is no header block.
pub fn parse_header(content: &str, parser: &dyn HeaderParser) -> Header {
    match extract_block(content) {
        Some(block) => parser.parse(&block),
        None => Header::new(),
    }
}
