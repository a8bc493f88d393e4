//! # Default Policy
//!
//! Supplies the fallback value id of a family when an item has neither a
//! stored primary value nor any assigned value.
//!
//! The distinguished default family takes its id from the site-wide setting;
//! every other family starts at `0`. Either way the override hook gets the
//! final word. Results are memoized in a [`DefaultIdCache`] owned by the
//! caller, which resets it at the start of each request.

use crate::accessors::{DefaultIdOverride, ResolutionLogger, SiteSettings};
use crate::models::ValueId;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Request-scoped memo of computed default ids, keyed by family name
#[derive(Debug, Default)]
pub struct DefaultIdCache {
    entries: DashMap<String, ValueId>,
}

impl DefaultIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, family: &str) -> Option<ValueId> {
        self.entries.get(family).map(|entry| *entry)
    }

    /// Insert if absent and return whichever value ends up cached.
    ///
    /// Concurrent callers may both compute; the computed value is a pure function
    /// of site configuration so either result is correct.
    pub fn get_or_insert(&self, family: &str, id: ValueId) -> ValueId {
        *self.entries.entry(family.to_string()).or_insert(id)
    }

    /// Forget every memoized default; call at the start of each request
    pub fn reset(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes default value ids for families
#[derive(Clone)]
pub struct DefaultPolicy {
    default_family: String,
    settings: Arc<dyn SiteSettings>,
    default_override: Arc<dyn DefaultIdOverride>,
    logger: Arc<dyn ResolutionLogger>,
    cache: Arc<DefaultIdCache>,
}

impl DefaultPolicy {
    pub fn new(
        default_family: impl Into<String>,
        settings: Arc<dyn SiteSettings>,
        default_override: Arc<dyn DefaultIdOverride>,
        logger: Arc<dyn ResolutionLogger>,
        cache: Arc<DefaultIdCache>,
    ) -> Self {
        Self {
            default_family: default_family.into(),
            settings,
            default_override,
            logger,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<DefaultIdCache> {
        &self.cache
    }

    /// Default value id for `family`; `0` means there is no default
    pub fn default_value_id(&self, family: &str) -> ValueId {
        if let Some(id) = self.cache.get(family) {
            return id;
        }

        let base = if family == self.default_family {
            match self.settings.default_value_id(family) {
                Ok(id) => id,
                Err(err) => {
                    self.logger
                        .accessor_failed("default_value_id", Some(family), &err);
                    0
                }
            }
        } else {
            0
        };

        let id = self.default_override.override_default(family, base);
        debug!(family = family, base = base, default_id = id, "Computed default value id");

        self.cache.get_or_insert(family, id)
    }
}

impl std::fmt::Debug for DefaultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPolicy")
            .field("default_family", &self.default_family)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
