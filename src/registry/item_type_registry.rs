//! # Item Type Registry
//!
//! Holds the item types known to the host and decides which of them get
//! taxonomy-aware permalinks. The built-in `post` type is always supported and
//! always listed first, followed by every public custom item type.

use crate::accessors::ItemTypeProvider;
use crate::constants::BUILTIN_ITEM_TYPE;
use crate::models::ItemType;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Receives the default selection and returns the item types to support
pub type ItemTypeFilter = Arc<dyn Fn(Vec<ItemType>) -> Vec<ItemType> + Send + Sync>;

/// Registry of item types, in registration order
#[derive(Default)]
pub struct ItemTypeRegistry {
    item_types: RwLock<Vec<ItemType>>,
    filter: Option<ItemTypeFilter>,
}

impl ItemTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: ItemTypeFilter) -> Self {
        Self {
            item_types: RwLock::new(Vec::new()),
            filter: Some(filter),
        }
    }

    /// Register an item type, replacing any type of the same name in place
    pub fn register(&self, item_type: ItemType) -> &Self {
        let mut item_types = self.item_types.write();
        match item_types
            .iter_mut()
            .find(|existing| existing.name == item_type.name)
        {
            Some(existing) => *existing = item_type,
            None => {
                info!(
                    item_type = %item_type.name,
                    builtin = item_type.builtin,
                    "Registered item type"
                );
                item_types.push(item_type);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<ItemType> {
        self.item_types
            .read()
            .iter()
            .find(|item_type| item_type.name == name)
            .cloned()
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.supported_item_types()
            .iter()
            .any(|item_type| item_type.name == name)
    }

    pub fn supported_item_type_names(&self) -> Vec<String> {
        self.supported_item_types()
            .into_iter()
            .map(|item_type| item_type.name)
            .collect()
    }

    /// Rewrite slug of a registered item type
    pub fn rewrite_slug(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|item_type| item_type.rewrite_slug)
    }
}

impl ItemTypeProvider for ItemTypeRegistry {
    fn supported_item_types(&self) -> Vec<ItemType> {
        let registered = self.item_types.read();

        let builtin = registered
            .iter()
            .find(|item_type| item_type.name == BUILTIN_ITEM_TYPE)
            .cloned()
            .unwrap_or_else(|| ItemType::builtin(BUILTIN_ITEM_TYPE));

        let mut supported = vec![builtin];
        supported.extend(
            registered
                .iter()
                .filter(|item_type| {
                    item_type.public && !item_type.builtin && item_type.name != BUILTIN_ITEM_TYPE
                })
                .cloned(),
        );
        drop(registered);

        match &self.filter {
            Some(filter) => filter(supported),
            None => supported,
        }
    }
}

impl std::fmt::Debug for ItemTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemTypeRegistry")
            .field("item_types", &*self.item_types.read())
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
