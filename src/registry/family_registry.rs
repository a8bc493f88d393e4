//! # Family Registry
//!
//! Holds the families known to the host and decides which of them take part
//! in placeholder resolution.
//!
//! By default a family is supported when it is public, hierarchical, and has
//! url rewriting enabled. Hosts narrow or widen that selection with a
//! [`FamilyFilter`] installed at construction time.

use crate::accessors::FamilyProvider;
use crate::models::Family;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Receives the default selection and returns the families to support
pub type FamilyFilter = Arc<dyn Fn(Vec<Family>) -> Vec<Family> + Send + Sync>;

/// Registry of families, in registration order
#[derive(Default)]
pub struct FamilyRegistry {
    families: RwLock<Vec<Family>>,
    filter: Option<FamilyFilter>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose supported selection passes through `filter`
    pub fn with_filter(filter: FamilyFilter) -> Self {
        Self {
            families: RwLock::new(Vec::new()),
            filter: Some(filter),
        }
    }

    /// Register a family, replacing any family of the same name in place
    pub fn register(&self, family: Family) -> &Self {
        let mut families = self.families.write();
        match families.iter_mut().find(|existing| existing.name == family.name) {
            Some(existing) => {
                debug!(family = %family.name, "Replacing registered family");
                *existing = family;
            }
            None => {
                info!(
                    family = %family.name,
                    eligible = family.is_permalink_eligible(),
                    "Registered family"
                );
                families.push(family);
            }
        }
        self
    }

    pub fn unregister(&self, name: &str) -> Option<Family> {
        let mut families = self.families.write();
        let position = families.iter().position(|family| family.name == name)?;
        Some(families.remove(position))
    }

    pub fn get(&self, name: &str) -> Option<Family> {
        self.families
            .read()
            .iter()
            .find(|family| family.name == name)
            .cloned()
    }

    /// Every registered family, supported or not
    pub fn all(&self) -> Vec<Family> {
        self.families.read().clone()
    }

    pub fn supported_family_names(&self) -> Vec<String> {
        self.supported_families()
            .into_iter()
            .map(|family| family.name)
            .collect()
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.supported_families()
            .iter()
            .any(|family| family.name == name)
    }

    pub fn stats(&self) -> FamilyRegistryStats {
        let (total_families, eligible_families) = {
            let families = self.families.read();
            let eligible = families
                .iter()
                .filter(|family| family.is_permalink_eligible())
                .count();
            (families.len(), eligible)
        };

        FamilyRegistryStats {
            total_families,
            eligible_families,
            supported_families: self.supported_families().len(),
        }
    }
}

impl FamilyProvider for FamilyRegistry {
    fn supported_families(&self) -> Vec<Family> {
        let eligible: Vec<Family> = self
            .families
            .read()
            .iter()
            .filter(|family| family.is_permalink_eligible())
            .cloned()
            .collect();

        match &self.filter {
            Some(filter) => filter(eligible),
            None => eligible,
        }
    }
}

impl std::fmt::Debug for FamilyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyRegistry")
            .field("families", &*self.families.read())
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

/// Counts over the registered families
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyRegistryStats {
    pub total_families: usize,
    pub eligible_families: usize,
    pub supported_families: usize,
}
