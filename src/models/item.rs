use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Snapshot of a content item as handed over by the host for one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: u64,
    pub item_type: String,
    /// Url slug of the item (the `%postname%` value)
    pub slug: String,
    /// Url-safe author name (the `%author%` value)
    pub author_nicename: String,
    pub published_at: NaiveDateTime,
}

/// Item type (post type) metadata relevant to url building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    pub name: String,
    #[serde(default)]
    pub builtin: bool,
    #[serde(default = "default_public")]
    pub public: bool,
    /// Rewrite slug, may itself contain family placeholders, e.g. `/%category%/%product_type%`
    #[serde(default)]
    pub rewrite_slug: Option<String>,
    /// Extra permalink structure registered for this type, e.g. `/shop/%product_type%/%product%`
    #[serde(default)]
    pub permalink_structure: Option<String>,
}

fn default_public() -> bool {
    true
}

impl ItemType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            builtin: false,
            public: true,
            rewrite_slug: None,
            permalink_structure: None,
        }
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            builtin: true,
            ..Self::new(name)
        }
    }

    pub fn with_rewrite_slug(mut self, slug: impl Into<String>) -> Self {
        self.rewrite_slug = Some(slug.into());
        self
    }

    pub fn with_permalink_structure(mut self, structure: impl Into<String>) -> Self {
        self.permalink_structure = Some(structure.into());
        self
    }

    /// `%<type>%` token, replaced with the item slug
    pub fn name_token(&self) -> String {
        format!("%{}%", self.name)
    }

    /// `%<type>_slug%` token, replaced with the rewrite slug
    pub fn slug_token(&self) -> String {
        format!("%{}_slug%", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_tokens() {
        let product = ItemType::new("product").with_rewrite_slug("shop/%product_type%");
        assert_eq!(product.name_token(), "%product%");
        assert_eq!(product.slug_token(), "%product_slug%");
        assert!(!product.builtin);
        assert!(ItemType::builtin("post").builtin);
    }
}
