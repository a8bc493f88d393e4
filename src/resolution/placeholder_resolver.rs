//! # Placeholder Resolver
//!
//! Decides, per family, which value stands in for the `%family%` token of an
//! item and renders it as a chain.
//!
//! Sources are tried in order and a source only wins if its id actually
//! resolves through the hierarchy accessor:
//!
//! 1. the stored primary value,
//! 2. the lowest-id assigned value,
//! 3. the family default,
//! 4. the family substitute string (`no-product-type` for `product_type`).
//!
//! Assigned values are ranked by id, not by assignment order.

use super::{ChainOptions, DefaultPolicy, TermChainResolver};
use crate::accessors::{AssignedValuesAccessor, PrimaryTermBlobAccessor, ResolutionLogger};
use crate::config::PermalinkConfig;
use crate::constants::{family_token, ResolutionSource};
use crate::models::ValueId;
use crate::storage::{PrimaryTermMap, PrimaryTermStore};
use crate::template::ReplacementTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of resolving one family placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlaceholder {
    pub family: String,
    /// `%family%`
    pub token: String,
    pub replacement: String,
    pub source: ResolutionSource,
    /// Winning value id, `0` when the substitute was used
    pub value_id: ValueId,
}

/// Builds the family part of a replacement table for an item
#[derive(Clone)]
pub struct PlaceholderResolver {
    store: PrimaryTermStore,
    blobs: Arc<dyn PrimaryTermBlobAccessor>,
    assigned: Arc<dyn AssignedValuesAccessor>,
    chains: TermChainResolver,
    defaults: DefaultPolicy,
    logger: Arc<dyn ResolutionLogger>,
    /// Placeholders always render as slugs joined with `/`
    chain_options: ChainOptions,
    config: PermalinkConfig,
}

impl PlaceholderResolver {
    pub fn new(
        config: PermalinkConfig,
        blobs: Arc<dyn PrimaryTermBlobAccessor>,
        assigned: Arc<dyn AssignedValuesAccessor>,
        chains: TermChainResolver,
        defaults: DefaultPolicy,
        logger: Arc<dyn ResolutionLogger>,
    ) -> Self {
        Self {
            store: PrimaryTermStore::new(config.default_family.clone()),
            blobs,
            assigned,
            chains,
            defaults,
            logger,
            chain_options: ChainOptions::default(),
            config,
        }
    }

    pub fn store(&self) -> &PrimaryTermStore {
        &self.store
    }

    /// Stored primary term map of an item, empty when unreadable
    pub fn primary_terms(&self, item_id: u64) -> PrimaryTermMap {
        self.store
            .load(self.blobs.as_ref(), self.logger.as_ref(), item_id)
    }

    /// Replacement table holding one `%family%` entry per family
    pub fn resolve<S: AsRef<str>>(&self, item_id: u64, families: &[S]) -> ReplacementTable {
        self.resolve_detailed(item_id, families)
            .into_iter()
            .map(|placeholder| (placeholder.token, placeholder.replacement))
            .collect()
    }

    /// Like [`resolve`](Self::resolve) but reports which source won for each family
    pub fn resolve_detailed<S: AsRef<str>>(
        &self,
        item_id: u64,
        families: &[S],
    ) -> Vec<ResolvedPlaceholder> {
        if families.is_empty() {
            return Vec::new();
        }

        let primary = self.primary_terms(item_id);
        families
            .iter()
            .map(|family| self.resolve_family(item_id, &primary, family.as_ref()))
            .collect()
    }

    /// Resolve a single family against an already-loaded primary term map
    pub fn resolve_family(
        &self,
        item_id: u64,
        primary: &PrimaryTermMap,
        family: &str,
    ) -> ResolvedPlaceholder {
        let token = family_token(family);

        for (source, candidate) in self.candidates(item_id, primary, family) {
            let Some(value_id) = candidate else {
                continue;
            };

            match self.chains.try_chain(family, value_id, &self.chain_options) {
                Some(replacement) => {
                    debug!(
                        item_id = item_id,
                        family = family,
                        value_id = value_id,
                        source = source.as_str(),
                        "Resolved family placeholder"
                    );
                    return ResolvedPlaceholder {
                        family: family.to_string(),
                        token,
                        replacement,
                        source,
                        value_id,
                    };
                }
                None => warn!(
                    item_id = item_id,
                    family = family,
                    value_id = value_id,
                    source = source.as_str(),
                    "Value does not resolve; trying next source"
                ),
            }
        }

        debug!(
            item_id = item_id,
            family = family,
            "No value for family; using substitute"
        );
        ResolvedPlaceholder {
            family: family.to_string(),
            token,
            replacement: self.config.substitute_for(family),
            source: ResolutionSource::Substitute,
            value_id: 0,
        }
    }

    /// Candidate ids in priority order. Later sources are only computed when
    /// the earlier ones failed to resolve.
    fn candidates<'a>(
        &'a self,
        item_id: u64,
        primary: &'a PrimaryTermMap,
        family: &'a str,
    ) -> impl Iterator<Item = (ResolutionSource, Option<ValueId>)> + 'a {
        let primary_id = std::iter::once_with(move || (ResolutionSource::Primary, primary.get(family)));
        let assigned_id = std::iter::once_with(move || {
            (ResolutionSource::Assigned, self.lowest_assigned_id(item_id, family))
        });
        let default_id = std::iter::once_with(move || {
            let id = self.defaults.default_value_id(family);
            (ResolutionSource::Default, (id > 0).then_some(id))
        });

        primary_id.chain(assigned_id).chain(default_id)
    }

    /// Lowest id among the assigned values; accessor failures read as "none assigned"
    fn lowest_assigned_id(&self, item_id: u64, family: &str) -> Option<ValueId> {
        match self.assigned.assigned_values(item_id, family) {
            Ok(values) => values
                .iter()
                .map(|value| value.id)
                .filter(|id| *id > 0)
                .min(),
            Err(err) => {
                self.logger
                    .accessor_failed("assigned_values", Some(family), &err);
                None
            }
        }
    }
}

impl std::fmt::Debug for PlaceholderResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderResolver")
            .field("store", &self.store)
            .field("chain_options", &self.chain_options)
            .finish_non_exhaustive()
    }
}
