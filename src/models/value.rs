use serde::{Deserialize, Serialize};

use crate::constants::ChainDisplay;

/// Identifier of a value within a family. `0` means "no value".
pub type ValueId = u64;

/// Value represents one node (a term) in a hierarchical family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    pub id: ValueId,
    pub name: String,
    pub slug: String,
    /// `0` marks a root value
    #[serde(default)]
    pub parent_id: ValueId,
    pub family: String,
}

impl Value {
    pub fn new(
        id: ValueId,
        name: impl Into<String>,
        slug: impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            parent_id: 0,
            family: family.into(),
        }
    }

    pub fn with_parent(mut self, parent_id: ValueId) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == 0
    }

    /// Parent id worth following, if any. Self-parented values are treated as roots.
    pub fn parent(&self) -> Option<ValueId> {
        if self.parent_id == 0 || self.parent_id == self.id {
            None
        } else {
            Some(self.parent_id)
        }
    }

    pub fn display(&self, display: ChainDisplay) -> &str {
        match display {
            ChainDisplay::Name => &self.name,
            ChainDisplay::Slug => &self.slug,
        }
    }
}
