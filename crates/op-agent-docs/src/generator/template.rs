//! AGENTS.md template
//!
//! Renders the aggregated reference page from parsed agent records:
//! - title and auto-generation notice
//! - overview table with counts
//! - category index
//! - quick reference table of every agent
//! - one section per category with a subsection per agent

use crate::categories::{anchor, display_order, Category};
use crate::config::ReportConfig;
use crate::generator::md_parser::{AgentRecord, DEFAULT_MODEL};
use std::collections::HashMap;

/// Maximum description length in the quick reference table
pub const QUICK_REF_DESCRIPTION_LEN: usize = 55;

/// Agents grouped by category
pub type AgentsByCategory<'a> = HashMap<Category, Vec<&'a AgentRecord>>;

/// Group agents by category; each group is sorted by file stem
pub fn group_by_category(agents: &[AgentRecord]) -> AgentsByCategory<'_> {
    let mut by_category: AgentsByCategory<'_> = HashMap::new();
    for agent in agents {
        by_category
            .entry((agent.emoji, agent.category))
            .or_default()
            .push(agent);
    }
    for group in by_category.values_mut() {
        group.sort_by(|a, b| a.filename.cmp(&b.filename));
    }
    by_category
}

/// Populated categories in display order
pub fn sorted_categories(by_category: &AgentsByCategory<'_>) -> Vec<Category> {
    display_order()
        .filter(|category| by_category.contains_key(category))
        .collect()
}

/// Shorten a description for the quick reference table
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > QUICK_REF_DESCRIPTION_LEN {
        let head: String = description.chars().take(QUICK_REF_DESCRIPTION_LEN).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

/// Render the full AGENTS.md document
pub fn render_agents_doc(agents: &[AgentRecord], report: &ReportConfig) -> String {
    let by_category = group_by_category(agents);
    let categories = sorted_categories(&by_category);

    let total = agents.len();
    let external = agents.iter().filter(|a| a.is_external()).count();
    let custom = total - external;

    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push(format!("# {}", report.title));
    lines.push(String::new());
    lines.push(report.notice.clone());
    lines.push(String::new());

    // Overview
    lines.push("## 📊 Overview".to_string());
    lines.push(String::new());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Total Agents | {} |", total));
    lines.push(format!("| {} | {} |", report.custom_label, custom));
    if external > 0 {
        lines.push(format!(
            "| External ({}) | {} |",
            report.external_source_link(),
            external
        ));
    }
    lines.push(format!("| Categories | {} |", by_category.len()));
    lines.push(String::new());

    // Category index
    lines.push("## 📑 Categories".to_string());
    lines.push(String::new());
    for (emoji, category) in &categories {
        let count = by_category[&(*emoji, *category)].len();
        lines.push(format!(
            "- [{} {}](#{}) ({})",
            emoji,
            category,
            anchor(category),
            count
        ));
    }
    lines.push(String::new());

    // Quick reference
    lines.push("## 📋 Quick Reference".to_string());
    lines.push(String::new());
    lines.push("| Agent | Description | Category | Source |".to_string());
    lines.push("|-------|-------------|----------|--------|".to_string());
    let mut sorted: Vec<&AgentRecord> = agents.iter().collect();
    sorted.sort_by(|a, b| a.filename.cmp(&b.filename));
    for agent in sorted {
        lines.push(format!(
            "| `{}` | {} | {} {} | {} |",
            agent.filename,
            truncate_description(&agent.description),
            agent.emoji,
            agent.category,
            agent.provenance.label()
        ));
    }
    lines.push(String::new());

    // Category sections
    for (emoji, category) in &categories {
        lines.push(format!("## {} {}", emoji, category));
        lines.push(String::new());

        for agent in &by_category[&(*emoji, *category)] {
            render_agent_section(&mut lines, agent, report);
        }
    }

    lines.join("\n")
}

fn render_agent_section(lines: &mut Vec<String>, agent: &AgentRecord, report: &ReportConfig) {
    let external_badge = if agent.is_external() { " ↗" } else { "" };
    lines.push(format!("### {}{}", agent.filename, external_badge));
    lines.push(String::new());
    lines.push(format!("> {}", agent.description));
    lines.push(String::new());

    let meta_items = metadata_items(agent, report);
    if !meta_items.is_empty() {
        lines.push(meta_items.join(" | "));
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
}

fn metadata_items(agent: &AgentRecord, report: &ReportConfig) -> Vec<String> {
    let mut items = Vec::new();
    if !agent.model.is_empty() && agent.model != DEFAULT_MODEL {
        items.push(format!("**Model:** `{}`", agent.model));
    }
    if let Some(triggers) = &agent.triggers {
        items.push(format!("**Triggers:** {}", triggers));
    }
    if !agent.version.is_empty() {
        items.push(format!("**Version:** {}", agent.version));
    }
    if agent.is_external() {
        items.push(format!("**Source:** {}", report.external_source_link()));
    }
    items
}
