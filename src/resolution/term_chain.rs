//! # Term Chain Resolver
//!
//! Walks a value up through its ancestors and renders the root-to-leaf path,
//! e.g. `news/local/city-hall` for a value three levels deep.
//!
//! The walk is iterative. Each call keeps its own visited set, seeded with the
//! starting id, and stops at a root, at a self-parented value, or at the first
//! revisited id, so a damaged hierarchy still yields a finite chain with every
//! value at most once.

use crate::accessors::{HierarchyAccessor, ResolutionLogger};
use crate::constants::{ChainDisplay, DEFAULT_CHAIN_SEPARATOR, MISSING_VALUE_SENTINEL};
use crate::models::{Value, ValueId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a chain is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOptions {
    pub separator: String,
    pub display: ChainDisplay,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_CHAIN_SEPARATOR.to_string(),
            display: ChainDisplay::Slug,
        }
    }
}

impl ChainOptions {
    pub fn new(separator: impl Into<String>, display: ChainDisplay) -> Self {
        Self {
            separator: separator.into(),
            display,
        }
    }
}

/// Builds ancestor chains through the host's hierarchy accessor
#[derive(Clone)]
pub struct TermChainResolver {
    hierarchy: Arc<dyn HierarchyAccessor>,
    logger: Arc<dyn ResolutionLogger>,
    missing_value_sentinel: String,
}

impl TermChainResolver {
    pub fn new(hierarchy: Arc<dyn HierarchyAccessor>, logger: Arc<dyn ResolutionLogger>) -> Self {
        Self {
            hierarchy,
            logger,
            missing_value_sentinel: MISSING_VALUE_SENTINEL.to_string(),
        }
    }

    pub fn with_missing_value_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.missing_value_sentinel = sentinel.into();
        self
    }

    /// Look up one value; accessor failures are logged and read as "not found"
    fn lookup(&self, family: &str, id: ValueId) -> Option<Value> {
        match self.hierarchy.get_value(family, id) {
            Ok(value) => value,
            Err(err) => {
                self.logger.accessor_failed("get_value", Some(family), &err);
                None
            }
        }
    }

    /// Values from the root down to `start_id`, or `None` when `start_id` does not exist.
    ///
    /// A missing ancestor truncates the chain at the last value found.
    pub fn walk(&self, family: &str, start_id: ValueId) -> Option<Vec<Value>> {
        let start = self.lookup(family, start_id)?;

        let mut visited: HashSet<ValueId> = HashSet::from([start.id]);
        let mut next_parent = start.parent();
        let mut nodes = vec![start];

        while let Some(parent_id) = next_parent {
            if !visited.insert(parent_id) {
                warn!(
                    family = family,
                    start_id = start_id,
                    parent_id = parent_id,
                    "Cycle in value hierarchy; truncating chain"
                );
                break;
            }

            let Some(parent) = self.lookup(family, parent_id) else {
                debug!(
                    family = family,
                    parent_id = parent_id,
                    "Ancestor not found; truncating chain"
                );
                break;
            };

            next_parent = parent.parent();
            nodes.push(parent);
        }

        nodes.reverse();
        Some(nodes)
    }

    /// Root-to-leaf chain joined with the option separator, or the sentinel for an unknown start
    pub fn chain(&self, family: &str, value_id: ValueId, options: &ChainOptions) -> String {
        self.chain_with(family, value_id, options, |_, segment| segment.to_string())
    }

    /// Root-to-leaf chain, or `None` when `value_id` does not exist
    pub fn try_chain(&self, family: &str, value_id: ValueId, options: &ChainOptions) -> Option<String> {
        self.walk(family, value_id)
            .map(|nodes| join_segments(&nodes, options, |_, segment| segment.to_string()))
    }

    /// Like [`chain`](Self::chain) but passes every segment through `format_segment`,
    /// e.g. to wrap each ancestor in a link
    pub fn chain_with<F>(
        &self,
        family: &str,
        value_id: ValueId,
        options: &ChainOptions,
        format_segment: F,
    ) -> String
    where
        F: Fn(&Value, &str) -> String,
    {
        match self.walk(family, value_id) {
            Some(nodes) => join_segments(&nodes, options, format_segment),
            None => self.missing_value_sentinel.clone(),
        }
    }
}

fn join_segments<F>(nodes: &[Value], options: &ChainOptions, format_segment: F) -> String
where
    F: Fn(&Value, &str) -> String,
{
    nodes
        .iter()
        .map(|node| format_segment(node, node.display(options.display)))
        .collect::<Vec<_>>()
        .join(&options.separator)
}

impl std::fmt::Debug for TermChainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermChainResolver")
            .field("missing_value_sentinel", &self.missing_value_sentinel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::{InMemoryHost, TracingResolutionLogger};

    fn resolver(host: Arc<InMemoryHost>) -> TermChainResolver {
        TermChainResolver::new(host, Arc::new(TracingResolutionLogger))
    }

    fn news_hierarchy() -> Arc<InMemoryHost> {
        let host = Arc::new(InMemoryHost::new());
        host.insert_value(Value::new(1, "News", "news", "category"))
            .insert_value(Value::new(2, "Local News", "local", "category").with_parent(1))
            .insert_value(Value::new(3, "City Hall", "city-hall", "category").with_parent(2));
        host
    }

    #[test]
    fn test_chain_root_to_leaf() {
        let chains = resolver(news_hierarchy());
        assert_eq!(
            chains.chain("category", 3, &ChainOptions::default()),
            "news/local/city-hall"
        );
        assert_eq!(chains.chain("category", 1, &ChainOptions::default()), "news");
    }

    #[test]
    fn test_chain_names_and_separator() {
        let chains = resolver(news_hierarchy());
        let options = ChainOptions::new(" > ", ChainDisplay::Name);
        assert_eq!(
            chains.chain("category", 3, &options),
            "News > Local News > City Hall"
        );
    }

    #[test]
    fn test_unknown_start_returns_sentinel() {
        let chains = resolver(news_hierarchy());
        assert_eq!(chains.chain("category", 99, &ChainOptions::default()), "-");
        assert_eq!(chains.chain("genre", 1, &ChainOptions::default()), "-");
        assert!(chains.walk("category", 99).is_none());
        assert!(chains
            .try_chain("category", 99, &ChainOptions::default())
            .is_none());

        let chains = resolver(news_hierarchy()).with_missing_value_sentinel("unknown");
        assert_eq!(chains.chain("category", 99, &ChainOptions::default()), "unknown");
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let host = Arc::new(InMemoryHost::new());
        host.insert_value(Value::new(10, "A", "a", "category").with_parent(11))
            .insert_value(Value::new(11, "B", "b", "category").with_parent(10));

        let chains = resolver(host);
        assert_eq!(chains.chain("category", 10, &ChainOptions::default()), "b/a");
        assert_eq!(chains.chain("category", 11, &ChainOptions::default()), "a/b");
    }

    #[test]
    fn test_self_parent_stops() {
        let host = Arc::new(InMemoryHost::new());
        host.insert_value(Value::new(4, "Loop", "loop", "category").with_parent(4));

        assert_eq!(
            resolver(host).chain("category", 4, &ChainOptions::default()),
            "loop"
        );
    }

    #[test]
    fn test_missing_ancestor_truncates() {
        let host = Arc::new(InMemoryHost::new());
        host.insert_value(Value::new(6, "Orphan", "orphan", "category").with_parent(404));

        assert_eq!(
            resolver(host).chain("category", 6, &ChainOptions::default()),
            "orphan"
        );
    }

    #[test]
    fn test_accessor_failure_reads_as_missing() {
        let host = news_hierarchy();
        host.fail_family("category");
        assert_eq!(
            resolver(host).chain("category", 3, &ChainOptions::default()),
            "-"
        );
    }

    #[test]
    fn test_chain_with_link_formatter() {
        let chains = resolver(news_hierarchy());
        let linked = chains.chain_with("category", 2, &ChainOptions::default(), |value, segment| {
            format!("<a href=\"/category/{}\">{}</a>", value.id, segment)
        });
        assert_eq!(
            linked,
            "<a href=\"/category/1\">news</a>/<a href=\"/category/2\">local</a>"
        );
    }
}
