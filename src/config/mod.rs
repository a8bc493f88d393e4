//! # Permalink Configuration
//!
//! Site-level knobs for primary term resolution: which family is the
//! distinguished default family, where the primary term map is stored, and
//! how chains and substitutes are rendered.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use primary_category_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration (environment auto-detected)
//! let manager = ConfigManager::load_from_directory(None)?;
//!
//! let default_family = &manager.config().default_family;
//! let separator = &manager.config().chain_separator;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{
    ChainDisplay, DEFAULT_CHAIN_SEPARATOR, DEFAULT_FAMILY, DEFAULT_TERM_SUBSTITUTE,
    META_FIELD_NAME, MISSING_VALUE_SENTINEL, TOKEN_DELIMITER,
};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration mirroring primary-category.yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkConfig {
    /// Family that bare legacy ids decode into and whose default comes from site settings
    pub default_family: String,

    /// Item meta key holding the encoded primary term map
    pub meta_field_name: String,

    /// Substitute pattern for families that resolve to nothing; `%s` is the family name
    pub substitute_pattern: String,

    /// Separator for breadcrumb chains; placeholders always use `/`
    pub chain_separator: String,

    /// Name or slug segments in breadcrumb chains; placeholders always use slugs
    pub chain_display: ChainDisplay,

    /// Chain returned when a chain walk starts from an unknown value
    pub missing_value_sentinel: String,

    /// Trim and force a single trailing slash on rendered urls
    pub normalize_trailing_slash: bool,
}

impl Default for PermalinkConfig {
    fn default() -> Self {
        Self {
            default_family: DEFAULT_FAMILY.to_string(),
            meta_field_name: META_FIELD_NAME.to_string(),
            substitute_pattern: DEFAULT_TERM_SUBSTITUTE.to_string(),
            chain_separator: DEFAULT_CHAIN_SEPARATOR.to_string(),
            chain_display: ChainDisplay::Slug,
            missing_value_sentinel: MISSING_VALUE_SENTINEL.to_string(),
            normalize_trailing_slash: true,
        }
    }
}

impl PermalinkConfig {
    /// Defaults with environment variable overrides applied
    pub fn from_environment() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides to configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(family) = env::var("PRIMARY_CATEGORY_DEFAULT_FAMILY") {
            if !family.trim().is_empty() {
                self.default_family = family.trim().to_string();
                info!("Default family override: {}", self.default_family);
            }
        }

        if let Ok(field) = env::var("PRIMARY_CATEGORY_META_FIELD") {
            if !field.trim().is_empty() {
                self.meta_field_name = field.trim().to_string();
                info!("Meta field override: {}", self.meta_field_name);
            }
        }

        if let Ok(pattern) = env::var("PRIMARY_CATEGORY_SUBSTITUTE_PATTERN") {
            self.substitute_pattern = pattern;
            info!("Substitute pattern override: {}", self.substitute_pattern);
        }

        if let Ok(separator) = env::var("PRIMARY_CATEGORY_CHAIN_SEPARATOR") {
            self.chain_separator = separator;
            info!("Chain separator override: {}", self.chain_separator);
        }

        if let Ok(display) = env::var("PRIMARY_CATEGORY_CHAIN_DISPLAY") {
            if let Some(parsed) = ChainDisplay::parse(&display) {
                self.chain_display = parsed;
                info!("Chain display override: {}", parsed.as_str());
            }
        }

        self
    }

    /// Render the substitute string for a family that resolved to no value
    pub fn substitute_for(&self, family: &str) -> String {
        self.substitute_pattern
            .replacen("%s", &family.replace('_', "-"), 1)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.default_family.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "default_family",
                "permalink configuration",
            ));
        }

        if self.meta_field_name.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "meta_field_name",
                "permalink configuration",
            ));
        }

        if self.chain_separator.is_empty() {
            return Err(ConfigurationError::invalid_value(
                "chain_separator",
                "",
                "separator must not be empty",
            ));
        }

        if self.substitute_pattern.matches("%s").count() != 1 {
            return Err(ConfigurationError::invalid_value(
                "substitute_pattern",
                self.substitute_pattern.clone(),
                "pattern must contain exactly one %s",
            ));
        }

        // a substitute must never re-introduce a placeholder delimiter
        if self
            .substitute_pattern
            .replacen("%s", "", 1)
            .contains(TOKEN_DELIMITER)
        {
            return Err(ConfigurationError::invalid_value(
                "substitute_pattern",
                self.substitute_pattern.clone(),
                "pattern must not contain % outside of %s",
            ));
        }

        if self.missing_value_sentinel.is_empty() {
            return Err(ConfigurationError::invalid_value(
                "missing_value_sentinel",
                "",
                "sentinel must not be empty",
            ));
        }

        Ok(())
    }

    /// Log current configuration for debugging
    pub fn log_configuration(&self) {
        info!("Permalink Configuration:");
        info!("  Default family: {}", self.default_family);
        info!("  Meta field: {}", self.meta_field_name);
        info!("  Substitute pattern: {}", self.substitute_pattern);
        info!(
            "  Chain: separator {:?}, display {}",
            self.chain_separator,
            self.chain_display.as_str()
        );
        info!("  Trailing slash normalization: {}", self.normalize_trailing_slash);
    }
}
