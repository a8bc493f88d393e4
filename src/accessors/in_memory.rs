//! In-memory host
//!
//! Implements every data accessor over maps held in memory. Hosts that
//! pre-fetch their data per request can load it here; tests and benches use
//! it as the reference collaborator.

use super::{AssignedValuesAccessor, HierarchyAccessor, PrimaryTermBlobAccessor, SiteSettings};
use crate::error::{AccessorError, AccessorResult};
use crate::models::{Value, ValueId};
use crate::storage::RawStorageValue;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

type FamilyKey = (String, ValueId);
type AssignmentKey = (u64, String);

#[derive(Debug, Default)]
pub struct InMemoryHost {
    values: RwLock<HashMap<FamilyKey, Value>>,
    assignments: RwLock<HashMap<AssignmentKey, Vec<ValueId>>>,
    blobs: RwLock<HashMap<u64, RawStorageValue>>,
    default_ids: RwLock<HashMap<String, ValueId>>,
    failing_families: RwLock<HashSet<String>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keyed by its family and id
    pub fn insert_value(&self, value: Value) -> &Self {
        self.values
            .write()
            .insert((value.family.clone(), value.id), value);
        self
    }

    /// Assign values of `family` to an item, preserving the given order
    pub fn assign(&self, item_id: u64, family: &str, ids: &[ValueId]) -> &Self {
        self.assignments
            .write()
            .insert((item_id, family.to_string()), ids.to_vec());
        self
    }

    pub fn store_blob(&self, item_id: u64, raw: RawStorageValue) -> &Self {
        self.blobs.write().insert(item_id, raw);
        self
    }

    pub fn remove_blob(&self, item_id: u64) -> &Self {
        self.blobs.write().remove(&item_id);
        self
    }

    pub fn set_default_value_id(&self, family: &str, id: ValueId) -> &Self {
        self.default_ids.write().insert(family.to_string(), id);
        self
    }

    /// Make every accessor call touching `family` report a backend failure
    pub fn fail_family(&self, family: &str) -> &Self {
        self.failing_families.write().insert(family.to_string());
        self
    }

    fn check_family(&self, family: &str) -> AccessorResult<()> {
        if self.failing_families.read().contains(family) {
            return Err(AccessorError::backend(format!(
                "family {family} is unavailable"
            )));
        }
        Ok(())
    }
}

impl HierarchyAccessor for InMemoryHost {
    fn get_value(&self, family: &str, id: ValueId) -> AccessorResult<Option<Value>> {
        self.check_family(family)?;
        Ok(self.values.read().get(&(family.to_string(), id)).cloned())
    }
}

impl AssignedValuesAccessor for InMemoryHost {
    fn assigned_values(&self, item_id: u64, family: &str) -> AccessorResult<Vec<Value>> {
        self.check_family(family)?;

        let assignments = self.assignments.read();
        let Some(ids) = assignments.get(&(item_id, family.to_string())) else {
            return Ok(Vec::new());
        };

        let values = self.values.read();
        Ok(ids
            .iter()
            .filter_map(|id| values.get(&(family.to_string(), *id)).cloned())
            .collect())
    }
}

impl PrimaryTermBlobAccessor for InMemoryHost {
    fn stored_primary_term_blob(&self, item_id: u64) -> AccessorResult<RawStorageValue> {
        Ok(self
            .blobs
            .read()
            .get(&item_id)
            .cloned()
            .unwrap_or(RawStorageValue::Absent))
    }
}

impl SiteSettings for InMemoryHost {
    fn default_value_id(&self, family: &str) -> AccessorResult<ValueId> {
        Ok(self.default_ids.read().get(family).copied().unwrap_or(0))
    }
}
