use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Family represents a classification scheme (a taxonomy) and the item types it applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub name: String,
    #[serde(default)]
    pub applies_to: BTreeSet<String>,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default = "default_true")]
    pub hierarchical: bool,
    /// Whether the family takes part in url rewriting
    #[serde(default = "default_true")]
    pub rewrite: bool,
}

fn default_true() -> bool {
    true
}

impl Family {
    pub fn new<I, S>(name: impl Into<String>, applies_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            applies_to: applies_to.into_iter().map(Into::into).collect(),
            public: true,
            hierarchical: true,
            rewrite: true,
        }
    }

    pub fn applies_to(&self, item_type: &str) -> bool {
        self.applies_to.contains(item_type)
    }

    /// Public hierarchical families with rewriting enabled are eligible for placeholders
    pub fn is_permalink_eligible(&self) -> bool {
        self.public && self.hierarchical && self.rewrite
    }
}
