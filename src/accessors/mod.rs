//! # Host Collaborators
//!
//! Traits the host implements to hand classification data to the core. All
//! I/O lives behind these traits; the core only reads through them and never
//! retains anything it receives beyond the call that asked for it.
//!
//! Every accessor returns [`AccessorResult`]. The core treats an error as an
//! empty result, reports it through [`ResolutionLogger`], and keeps rendering.

pub mod in_memory;

use crate::error::{AccessorError, AccessorResult};
use crate::models::{Family, ItemType, Value, ValueId};
use crate::storage::RawStorageValue;
use std::sync::Arc;

pub use in_memory::InMemoryHost;

/// Looks up single values of a hierarchical family
pub trait HierarchyAccessor: Send + Sync {
    /// Return the value with `id` in `family`, or `Ok(None)` when it does not exist
    fn get_value(&self, family: &str, id: ValueId) -> AccessorResult<Option<Value>>;
}

/// Lists the values of a family assigned to an item
pub trait AssignedValuesAccessor: Send + Sync {
    /// Values of `family` assigned to `item_id`, in the host's assignment order
    fn assigned_values(&self, item_id: u64, family: &str) -> AccessorResult<Vec<Value>>;
}

/// Reads the persisted primary term blob of an item
pub trait PrimaryTermBlobAccessor: Send + Sync {
    fn stored_primary_term_blob(&self, item_id: u64) -> AccessorResult<RawStorageValue>;
}

/// Site-wide settings
pub trait SiteSettings: Send + Sync {
    /// Site-configured default value id for `family` (`0` = none).
    ///
    /// Only consulted for the distinguished default family.
    fn default_value_id(&self, family: &str) -> AccessorResult<ValueId>;
}

/// Override point for default value ids
///
/// Receives the id computed from site settings (`0` for every family other than
/// the distinguished one) and returns the id to use.
pub trait DefaultIdOverride: Send + Sync {
    fn override_default(&self, family: &str, base: ValueId) -> ValueId {
        let _ = family;
        base
    }
}

/// Leaves every default untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDefaultOverride;

impl DefaultIdOverride for NoDefaultOverride {}

/// Closure-backed override, for hosts that express the override inline
impl<F> DefaultIdOverride for F
where
    F: Fn(&str, ValueId) -> ValueId + Send + Sync,
{
    fn override_default(&self, family: &str, base: ValueId) -> ValueId {
        self(family, base)
    }
}

/// Decides which families take part in placeholder resolution
pub trait FamilyProvider: Send + Sync {
    fn supported_families(&self) -> Vec<Family>;

    /// Supported families that apply to `item_type`
    fn families_for_item_type(&self, item_type: &str) -> Vec<Family> {
        self.supported_families()
            .into_iter()
            .filter(|family| family.applies_to(item_type))
            .collect()
    }
}

/// Decides which item types get taxonomy-aware links
pub trait ItemTypeProvider: Send + Sync {
    fn supported_item_types(&self) -> Vec<ItemType>;

    fn item_type(&self, name: &str) -> Option<ItemType> {
        self.supported_item_types()
            .into_iter()
            .find(|item_type| item_type.name == name)
    }
}

/// Hook receiving accessor failures that were absorbed during a render
pub trait ResolutionLogger: Send + Sync {
    fn accessor_failed(&self, operation: &str, family: Option<&str>, error: &AccessorError);
}

/// Default hook forwarding failures to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingResolutionLogger;

impl ResolutionLogger for TracingResolutionLogger {
    fn accessor_failed(&self, operation: &str, family: Option<&str>, error: &AccessorError) {
        crate::logging::log_error(
            "accessor",
            operation,
            &error.to_string(),
            family,
        );
    }
}

/// Bundle of the collaborators needed to resolve permalinks
#[derive(Clone)]
pub struct HostAccessors {
    pub hierarchy: Arc<dyn HierarchyAccessor>,
    pub assigned: Arc<dyn AssignedValuesAccessor>,
    pub blobs: Arc<dyn PrimaryTermBlobAccessor>,
    pub settings: Arc<dyn SiteSettings>,
    pub default_override: Arc<dyn DefaultIdOverride>,
    pub logger: Arc<dyn ResolutionLogger>,
}

impl HostAccessors {
    /// Use one host object for every data accessor, with no override and tracing logs
    pub fn from_host<H>(host: Arc<H>) -> Self
    where
        H: HierarchyAccessor
            + AssignedValuesAccessor
            + PrimaryTermBlobAccessor
            + SiteSettings
            + 'static,
    {
        Self {
            hierarchy: host.clone(),
            assigned: host.clone(),
            blobs: host.clone(),
            settings: host,
            default_override: Arc::new(NoDefaultOverride),
            logger: Arc::new(TracingResolutionLogger),
        }
    }

    pub fn with_default_override(mut self, default_override: Arc<dyn DefaultIdOverride>) -> Self {
        self.default_override = default_override;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResolutionLogger>) -> Self {
        self.logger = logger;
        self
    }
}

impl std::fmt::Debug for HostAccessors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostAccessors").finish_non_exhaustive()
    }
}
