//! # System Constants
//!
//! Storage keys, placeholder tokens, and substitution patterns shared by the
//! resolution and template layers.

use serde::{Deserialize, Serialize};

/// Item meta key holding the JSON-encoded primary term map, e.g. `{"category":9,"products_tax":42}`
pub const META_FIELD_NAME: &str = "_stmpc_term_ids";

/// The distinguished hierarchical family. Bare legacy ids decode into it and its
/// default id comes from the site-wide setting.
pub const DEFAULT_FAMILY: &str = "category";

/// Pattern for the substitute used when a family resolves to no value at all.
/// `%s` receives the family name with underscores turned into hyphens.
pub const DEFAULT_TERM_SUBSTITUTE: &str = "no-%s";

/// Chain returned when the starting value of a chain walk cannot be found
pub const MISSING_VALUE_SENTINEL: &str = "-";

/// Default separator between chain segments
pub const DEFAULT_CHAIN_SEPARATOR: &str = "/";

/// Delimiter surrounding every placeholder token
pub const TOKEN_DELIMITER: char = '%';

/// Built-in item type that is always supported, ahead of custom item types
pub const BUILTIN_ITEM_TYPE: &str = "post";

/// Standard non-family placeholder tokens
pub mod tokens {
    pub const YEAR: &str = "%year%";
    pub const MONTHNUM: &str = "%monthnum%";
    pub const DAY: &str = "%day%";
    pub const HOUR: &str = "%hour%";
    pub const MINUTE: &str = "%minute%";
    pub const SECOND: &str = "%second%";
    pub const POST_ID: &str = "%post_id%";
    pub const POSTNAME: &str = "%postname%";
    pub const AUTHOR: &str = "%author%";

    /// All standard tokens in the order they are registered
    pub const STANDARD: [&str; 9] = [
        YEAR, MONTHNUM, DAY, HOUR, MINUTE, SECOND, POST_ID, POSTNAME, AUTHOR,
    ];
}

/// Which field of a value is rendered into a chain segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChainDisplay {
    /// Human readable display name
    Name,
    /// URL-safe slug
    #[default]
    Slug,
}

impl ChainDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainDisplay::Name => "name",
            ChainDisplay::Slug => "slug",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(ChainDisplay::Name),
            "slug" | "nicename" => Some(ChainDisplay::Slug),
            _ => None,
        }
    }
}

/// Which source produced the winning value id for a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Explicitly chosen primary value from the stored map
    Primary,
    /// Lowest-id value among those assigned to the item
    Assigned,
    /// Default policy fallback
    Default,
    /// Nothing resolved; the family substitute string was used
    Substitute,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Primary => "primary",
            ResolutionSource::Assigned => "assigned",
            ResolutionSource::Default => "default",
            ResolutionSource::Substitute => "substitute",
        }
    }
}

/// Build the `%family%` token for a family name
pub fn family_token(family: &str) -> String {
    format!("{TOKEN_DELIMITER}{family}{TOKEN_DELIMITER}")
}
