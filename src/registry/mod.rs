//! # Registries
//!
//! Families and item types known to the host, and the selection of those that
//! take part in permalink resolution.
//!
//! ```text
//! Registries
//! ├── FamilyRegistry     (supported families, FamilyProvider)
//! └── ItemTypeRegistry   (supported item types, ItemTypeProvider)
//! ```

pub mod family_registry;
pub mod item_type_registry;

// Re-export main types for easy access
pub use family_registry::{FamilyFilter, FamilyRegistry, FamilyRegistryStats};
pub use item_type_registry::{ItemTypeFilter, ItemTypeRegistry};
