//! Node selection criteria
//!
//! Implements the select/exclude grammar of [`RenderConfig`]: each entry is a
//! comma-separated list of criteria that must ALL match (AND); a node is
//! selected when ANY entry matches (OR). Exclusion is applied after
//! selection.

use skyform_core::RenderConfig;
use std::path::PathBuf;

use crate::node::DbtNode;

/// A single selection criterion
#[derive(Debug, Clone, PartialEq, Eq)]
enum Criterion {
    /// `tag:<t>` - node carries tag `t`
    Tag(String),

    /// `path:<prefix>` - node file path starts with `<prefix>`
    Path(PathBuf),

    /// `config.materialized:<m>` - node config materialization equals `<m>`
    Materialized(String),

    /// Bare token - node short name equals the token
    Name(String),
}

impl Criterion {
    fn parse(token: &str) -> Self {
        if let Some(tag) = token.strip_prefix("tag:") {
            Self::Tag(tag.to_string())
        } else if let Some(path) = token.strip_prefix("path:") {
            Self::Path(PathBuf::from(path))
        } else if let Some(materialized) = token.strip_prefix("config.materialized:") {
            Self::Materialized(materialized.to_string())
        } else {
            Self::Name(token.to_string())
        }
    }

    fn matches(&self, node: &DbtNode) -> bool {
        match self {
            Self::Tag(tag) => node.tags.iter().any(|t| t == tag),
            Self::Path(prefix) => node.file_path.starts_with(prefix),
            Self::Materialized(materialized) => {
                node.materialized() == Some(materialized.as_str())
            }
            Self::Name(name) => node.name() == name,
        }
    }
}

/// A conjunction of criteria parsed from one select/exclude entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct CriterionGroup(Vec<Criterion>);

impl CriterionGroup {
    fn parse(entry: &str) -> Self {
        Self(
            entry
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(Criterion::parse)
                .collect(),
        )
    }

    fn matches(&self, node: &DbtNode) -> bool {
        !self.0.is_empty() && self.0.iter().all(|criterion| criterion.matches(node))
    }
}

/// Compiled select/exclude configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorConfig {
    select: Vec<CriterionGroup>,
    exclude: Vec<CriterionGroup>,
}

impl SelectorConfig {
    /// Compile the select/exclude entries of a render configuration
    pub fn from_render_config(config: &RenderConfig) -> Self {
        Self {
            select: config.select.iter().map(|e| CriterionGroup::parse(e)).collect(),
            exclude: config.exclude.iter().map(|e| CriterionGroup::parse(e)).collect(),
        }
    }

    /// Whether a node survives selection
    ///
    /// An empty select list selects everything; exclusion always wins.
    pub fn is_selected(&self, node: &DbtNode) -> bool {
        let selected =
            self.select.is_empty() || self.select.iter().any(|group| group.matches(node));
        let excluded = self.exclude.iter().any(|group| group.matches(node));
        selected && !excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyform_core::DbtResourceType;

    fn node(name: &str, tags: &[&str], path: &str) -> DbtNode {
        let mut node = DbtNode::new(format!("model.jaffle_shop.{name}"), DbtResourceType::Model);
        node.tags = tags.iter().map(|t| t.to_string()).collect();
        node.file_path = PathBuf::from(path);
        node
    }

    fn selector(select: &[&str], exclude: &[&str]) -> SelectorConfig {
        SelectorConfig::from_render_config(&RenderConfig {
            select: select.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn empty_select_selects_everything() {
        let selector = selector(&[], &[]);
        assert!(selector.is_selected(&node("orders", &[], "models/orders.sql")));
    }

    #[test]
    fn tag_criterion() {
        let selector = selector(&["tag:nightly"], &[]);
        assert!(selector.is_selected(&node("orders", &["nightly"], "models/orders.sql")));
        assert!(!selector.is_selected(&node("orders", &["hourly"], "models/orders.sql")));
    }

    #[test]
    fn path_criterion_is_a_prefix_match() {
        let selector = selector(&["path:models/staging"], &[]);
        assert!(selector.is_selected(&node("stg", &[], "models/staging/stg.sql")));
        assert!(!selector.is_selected(&node("orders", &[], "models/orders.sql")));
    }

    #[test]
    fn materialized_criterion() {
        let selector = selector(&["config.materialized:view"], &[]);
        let mut view = node("orders", &[], "models/orders.sql");
        view.config = serde_json::json!({"materialized": "view"})
            .as_object()
            .cloned()
            .unwrap();
        assert!(selector.is_selected(&view));
        assert!(!selector.is_selected(&node("orders", &[], "models/orders.sql")));
    }

    #[test]
    fn bare_token_matches_name() {
        let selector = selector(&["orders"], &[]);
        assert!(selector.is_selected(&node("orders", &[], "models/orders.sql")));
        assert!(!selector.is_selected(&node("customers", &[], "models/customers.sql")));
    }

    #[test]
    fn comma_is_and_within_one_entry() {
        let selector = selector(&["tag:nightly,tag:core"], &[]);
        assert!(selector.is_selected(&node("orders", &["nightly", "core"], "m/o.sql")));
        assert!(!selector.is_selected(&node("orders", &["nightly"], "m/o.sql")));
    }

    #[test]
    fn entries_are_or_across_the_list() {
        let selector = selector(&["tag:nightly", "tag:hourly"], &[]);
        assert!(selector.is_selected(&node("a", &["nightly"], "m/a.sql")));
        assert!(selector.is_selected(&node("b", &["hourly"], "m/b.sql")));
        assert!(!selector.is_selected(&node("c", &["weekly"], "m/c.sql")));
    }

    #[test]
    fn exclude_wins_over_select() {
        let selector = selector(&["tag:nightly"], &["orders"]);
        assert!(!selector.is_selected(&node("orders", &["nightly"], "m/o.sql")));
        assert!(selector.is_selected(&node("customers", &["nightly"], "m/c.sql")));
    }
}
