//! Agent category taxonomy
//!
//! Agents are classified by their file stem against an ordered rule list.
//! The first rule with a matching pattern wins; the declaration order of
//! [`CATEGORIES`] is also the order categories are displayed in.

/// A category and the name patterns that select it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub glyph: &'static str,
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

/// (glyph, category name) pair used as a grouping key
pub type Category = (&'static str, &'static str);

/// Category rules, in display order
pub const CATEGORIES: &[CategoryRule] = &[
    CategoryRule { glyph: "🏢", name: "3Commas", patterns: &["github-pr", "jira-status-report"] },
    CategoryRule { glyph: "🎸", name: "Django", patterns: &["django-*", "django"] },
    CategoryRule { glyph: "💎", name: "Rails", patterns: &["rails-*"] },
    CategoryRule { glyph: "🟠", name: "Laravel", patterns: &["laravel-*"] },
    CategoryRule { glyph: "🐍", name: "Python", patterns: &["python-*", "fastapi-*"] },
    CategoryRule { glyph: "⚛️", name: "Frontend", patterns: &["vue-*", "react-*", "frontend-*"] },
    CategoryRule { glyph: "🔍", name: "Code Quality", patterns: &["code-reviewer", "code-archaeologist"] },
    CategoryRule { glyph: "⚡", name: "Performance", patterns: &["performance-*"] },
    CategoryRule {
        glyph: "🎯",
        name: "Orchestration",
        patterns: &["*-orchestrator", "*-configurator", "project-analyst"],
    },
    CategoryRule { glyph: "📊", name: "Data & ML", patterns: &["ml-*", "web-scraping-*"] },
    CategoryRule {
        glyph: "🛡️",
        name: "DevOps & Quality",
        patterns: &["security-*", "testing-*", "devops-*"],
    },
    CategoryRule { glyph: "🔧", name: "Backend & API", patterns: &["backend-*", "api-*"] },
    CategoryRule { glyph: "📝", name: "Other", patterns: &["documentation-*", "tailwind-*"] },
];

/// Fallback for agents no rule matches; always displayed last
pub const UNCATEGORIZED: CategoryRule = CategoryRule {
    glyph: "📦",
    name: "Uncategorized",
    patterns: &[],
};

impl CategoryRule {
    pub fn category(&self) -> Category {
        (self.glyph, self.name)
    }

    /// True if any of this rule's patterns matches `name`
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| match_pattern(name, pattern))
    }
}

/// Match an agent name against a glob-like pattern.
///
/// `*-x` matches by suffix, `x-*` by prefix, anything else exactly.
pub fn match_pattern(name: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        name.ends_with(suffix)
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        name.starts_with(prefix)
    } else {
        name == pattern
    }
}

/// Determine the category for an agent from its file stem
pub fn categorize(agent_name: &str) -> Category {
    CATEGORIES
        .iter()
        .find(|rule| rule.matches(agent_name))
        .unwrap_or(&UNCATEGORIZED)
        .category()
}

/// All categories in display order, Uncategorized last
pub fn display_order() -> impl Iterator<Item = Category> {
    CATEGORIES
        .iter()
        .chain(std::iter::once(&UNCATEGORIZED))
        .map(CategoryRule::category)
}

/// Markdown anchor for a category heading
pub fn anchor(category_name: &str) -> String {
    category_name.to_lowercase().replace(' ', "-").replace('&', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern() {
        assert!(match_pattern("django-api-developer", "django-*"));
        assert!(match_pattern("django-", "django-*"));
        assert!(!match_pattern("django", "django-*"));
        assert!(!match_pattern("my-django-dev", "django-*"));
    }

    #[test]
    fn test_suffix_pattern() {
        assert!(match_pattern("tech-lead-orchestrator", "*-orchestrator"));
        assert!(!match_pattern("orchestrator", "*-orchestrator"));
        assert!(!match_pattern("orchestrator-x", "*-orchestrator"));
    }

    #[test]
    fn test_exact_pattern() {
        assert!(match_pattern("django", "django"));
        assert!(!match_pattern("django2", "django"));
        assert!(!match_pattern("", "django"));
    }

    #[test]
    fn test_categorize_first_match_wins() {
        assert_eq!(categorize("python-pro"), ("🐍", "Python"));
        assert_eq!(categorize("fastapi-expert"), ("🐍", "Python"));
        assert_eq!(categorize("github-pr"), ("🏢", "3Commas"));
        assert_eq!(categorize("team-configurator"), ("🎯", "Orchestration"));
        // both "*-orchestrator" and "devops-*"; Orchestration is declared first
        assert_eq!(categorize("devops-orchestrator"), ("🎯", "Orchestration"));
    }

    #[test]
    fn test_categorize_is_total() {
        for name in ["", "*", "-", "unknown-agent", "README", "ünïcode"] {
            let (glyph, category) = categorize(name);
            assert!(!glyph.is_empty());
            assert!(!category.is_empty());
        }
        assert_eq!(categorize("mystery"), ("📦", "Uncategorized"));
    }

    #[test]
    fn test_display_order_ends_with_uncategorized() {
        let order: Vec<_> = display_order().collect();
        assert_eq!(order.len(), CATEGORIES.len() + 1);
        assert_eq!(order[0].1, "3Commas");
        assert_eq!(order.last().map(|c| c.1), Some("Uncategorized"));
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("Data & ML"), "data--ml");
        assert_eq!(anchor("Code Quality"), "code-quality");
        assert_eq!(anchor("3Commas"), "3commas");
    }
}
