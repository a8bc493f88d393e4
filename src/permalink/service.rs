//! # Permalink Service
//!
//! Entry point for hosts: decodes stored primary term maps, renders
//! permalink templates for an item, and builds standalone term chains.
//!
//! A service is built once from a [`PermalinkConfig`] and the host's
//! [`HostAccessors`], then shared across requests. It owns the default id
//! cache; hosts call [`begin_request`](PermalinkService::begin_request) at the
//! start of every request so site setting changes are picked up.
//!
//! ## Usage
//!
//! ```rust
//! use primary_category_core::accessors::{HostAccessors, InMemoryHost};
//! use primary_category_core::config::PermalinkConfig;
//! use primary_category_core::models::Value;
//! use primary_category_core::permalink::PermalinkService;
//! use primary_category_core::template::ReplacementTable;
//! use std::sync::Arc;
//!
//! let host = Arc::new(InMemoryHost::new());
//! host.insert_value(Value::new(5, "News", "news", "category"))
//!     .assign(1, "category", &[5]);
//!
//! let service = PermalinkService::new(PermalinkConfig::default(), HostAccessors::from_host(host));
//!
//! let mut extra = ReplacementTable::new();
//! extra.insert("%postname%", "hello-world");
//!
//! let url = service.resolve_permalink("/%category%/%postname%/", 1, "post", &["category"], &extra);
//! assert_eq!(url, "/news/hello-world/");
//! ```

use crate::accessors::HostAccessors;
use crate::config::{ConfigManager, PermalinkConfig};
use crate::constants::{ChainDisplay, ResolutionSource};
use crate::error::Result;
use crate::logging::log_resolution_operation;
use crate::models::{Value, ValueId};
use crate::resolution::{
    ChainOptions, DefaultIdCache, DefaultPolicy, PlaceholderResolver, ResolvedPlaceholder,
    TermChainResolver,
};
use crate::storage::{PrimaryTermMap, PrimaryTermStore, RawStorageValue};
use crate::template::{ReplacementTable, TemplateEngine};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves primary terms and renders permalinks for one site
#[derive(Debug, Clone)]
pub struct PermalinkService {
    config: PermalinkConfig,
    accessors: HostAccessors,
    cache: Arc<DefaultIdCache>,
    chains: TermChainResolver,
    defaults: DefaultPolicy,
    placeholders: PlaceholderResolver,
    engine: TemplateEngine,
}

impl PermalinkService {
    pub fn new(config: PermalinkConfig, accessors: HostAccessors) -> Self {
        let cache = Arc::new(DefaultIdCache::new());

        let chains = TermChainResolver::new(accessors.hierarchy.clone(), accessors.logger.clone())
            .with_missing_value_sentinel(config.missing_value_sentinel.clone());

        let defaults = DefaultPolicy::new(
            config.default_family.clone(),
            accessors.settings.clone(),
            accessors.default_override.clone(),
            accessors.logger.clone(),
            cache.clone(),
        );

        let placeholders = PlaceholderResolver::new(
            config.clone(),
            accessors.blobs.clone(),
            accessors.assigned.clone(),
            chains.clone(),
            defaults.clone(),
            accessors.logger.clone(),
        );

        Self {
            engine: TemplateEngine::new(config.normalize_trailing_slash),
            config,
            accessors,
            cache,
            chains,
            defaults,
            placeholders,
        }
    }

    /// Build a service from a validated configuration manager
    pub fn from_config_manager(manager: &ConfigManager, accessors: HostAccessors) -> Self {
        Self::new(manager.config().clone(), accessors)
    }

    pub fn config(&self) -> &PermalinkConfig {
        &self.config
    }

    pub fn accessors(&self) -> &HostAccessors {
        &self.accessors
    }

    pub fn default_id_cache(&self) -> &Arc<DefaultIdCache> {
        &self.cache
    }

    /// Start a new request scope, forgetting memoized default ids
    pub fn begin_request(&self) {
        debug!(cached = self.cache.len(), "Resetting default id cache");
        self.cache.reset();
    }

    pub fn store(&self) -> &PrimaryTermStore {
        self.placeholders.store()
    }

    /// Decode a raw stored primary term value
    pub fn resolve_primary_term_ids(&self, raw: &RawStorageValue) -> PrimaryTermMap {
        self.store().decode(raw)
    }

    /// Stored primary term map of an item
    pub fn primary_term_ids(&self, item_id: u64) -> PrimaryTermMap {
        self.placeholders.primary_terms(item_id)
    }

    /// Encode a primary term map for storage; `None` means delete the stored value
    pub fn encode_primary_term_ids(&self, map: &PrimaryTermMap) -> Result<Option<String>> {
        self.store().encode_for_storage(map)
    }

    /// Default value id of a family for the current request (`0` = none)
    pub fn default_value_id(&self, family: &str) -> ValueId {
        self.defaults.default_value_id(family)
    }

    /// Family placeholder replacements for an item, one `%family%` entry per family
    pub fn resolve_placeholders<S: AsRef<str>>(
        &self,
        item_id: u64,
        families: &[S],
    ) -> ReplacementTable {
        self.placeholders.resolve(item_id, families)
    }

    /// Family placeholder resolutions including the source that won for each family
    pub fn resolve_placeholders_detailed<S: AsRef<str>>(
        &self,
        item_id: u64,
        families: &[S],
    ) -> Vec<ResolvedPlaceholder> {
        self.placeholders.resolve_detailed(item_id, families)
    }

    /// Render `template` for an item.
    ///
    /// `families` are the families relevant to `item_type`; `extra_tokens` holds
    /// the host's non-family tokens. Templates without any `%` are returned as is.
    #[instrument(skip(self, template, families, extra_tokens), fields(families = families.len()))]
    pub fn resolve_permalink<S: AsRef<str>>(
        &self,
        template: &str,
        item_id: u64,
        item_type: &str,
        families: &[S],
        extra_tokens: &ReplacementTable,
    ) -> String {
        if TemplateEngine::is_static(template) {
            return template.to_string();
        }

        let resolved = self.resolve_placeholders_detailed(item_id, families);
        for placeholder in resolved
            .iter()
            .filter(|placeholder| placeholder.source == ResolutionSource::Substitute)
        {
            log_resolution_operation(
                "resolve_permalink",
                Some(item_id),
                Some(placeholder.family.as_str()),
                "substituted",
                Some(placeholder.replacement.as_str()),
            );
        }

        let family_tokens: ReplacementTable = resolved
            .into_iter()
            .map(|placeholder| (placeholder.token, placeholder.replacement))
            .collect();

        let url = self
            .engine
            .render_with_extra(template, &family_tokens, extra_tokens);
        debug!(item_id = item_id, item_type = item_type, url = %url, "Rendered permalink");
        url
    }

    /// Render a template against a prepared table, with the service's normalization
    pub fn render(&self, template: &str, table: &ReplacementTable) -> String {
        self.engine.render(template, table)
    }

    /// Root-to-leaf chain using the configured separator and display mode
    pub fn breadcrumb_chain(&self, family: &str, value_id: ValueId) -> String {
        let options = ChainOptions::new(
            self.config.chain_separator.clone(),
            self.config.chain_display,
        );
        self.chains.chain(family, value_id, &options)
    }

    /// Root-to-leaf chain of a value, e.g. for breadcrumbs; `"-"` when the value is unknown
    pub fn term_chain(
        &self,
        family: &str,
        value_id: ValueId,
        separator: &str,
        use_slug: bool,
    ) -> String {
        self.chains
            .chain(family, value_id, &chain_options(separator, use_slug))
    }

    /// Like [`term_chain`](Self::term_chain) with each segment passed through `format_segment`
    pub fn term_chain_with<F>(
        &self,
        family: &str,
        value_id: ValueId,
        separator: &str,
        use_slug: bool,
        format_segment: F,
    ) -> String
    where
        F: Fn(&Value, &str) -> String,
    {
        self.chains.chain_with(
            family,
            value_id,
            &chain_options(separator, use_slug),
            format_segment,
        )
    }
}

fn chain_options(separator: &str, use_slug: bool) -> ChainOptions {
    let display = if use_slug {
        ChainDisplay::Slug
    } else {
        ChainDisplay::Name
    };
    ChainOptions::new(separator, display)
}
