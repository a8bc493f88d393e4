//! # Primary Term Store
//!
//! Decodes and encodes the per-item map of family name to chosen primary
//! value id. The persisted form is a JSON object such as
//! `{"category":9,"products_tax":42}`. Older records hold a bare id, which
//! always belongs to the default family.
//!
//! Decoding never fails: anything unreadable becomes an empty map.

use crate::accessors::{PrimaryTermBlobAccessor, ResolutionLogger};
use crate::error::Result;
use crate::models::ValueId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Raw stored value as the host's storage layer returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawStorageValue {
    Integer(i64),
    Text(String),
    #[default]
    Absent,
}

impl From<&str> for RawStorageValue {
    fn from(raw: &str) -> Self {
        RawStorageValue::Text(raw.to_string())
    }
}

impl From<String> for RawStorageValue {
    fn from(raw: String) -> Self {
        RawStorageValue::Text(raw)
    }
}

impl From<i64> for RawStorageValue {
    fn from(raw: i64) -> Self {
        RawStorageValue::Integer(raw)
    }
}

impl<T: Into<RawStorageValue>> From<Option<T>> for RawStorageValue {
    fn from(raw: Option<T>) -> Self {
        raw.map(Into::into).unwrap_or(RawStorageValue::Absent)
    }
}

/// Family name to primary value id. Only positive ids are ever held.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ValueId>",
    into = "BTreeMap<String, ValueId>"
)]
pub struct PrimaryTermMap(BTreeMap<String, ValueId>);

impl From<BTreeMap<String, ValueId>> for PrimaryTermMap {
    fn from(entries: BTreeMap<String, ValueId>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<PrimaryTermMap> for BTreeMap<String, ValueId> {
    fn from(map: PrimaryTermMap) -> Self {
        map.0
    }
}

impl PrimaryTermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary id for `family`, if one was chosen
    pub fn get(&self, family: &str) -> Option<ValueId> {
        self.0.get(family).copied().filter(|id| *id > 0)
    }

    /// Set the primary id of a family; `0` clears it
    pub fn insert(&mut self, family: impl Into<String>, id: ValueId) {
        let family = family.into();
        if id == 0 {
            self.0.remove(&family);
        } else {
            self.0.insert(family, id);
        }
    }

    pub fn remove(&mut self, family: &str) -> Option<ValueId> {
        self.0.remove(family)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueId)> {
        self.0.iter().map(|(family, id)| (family.as_str(), *id))
    }
}

impl<S: Into<String>> FromIterator<(S, ValueId)> for PrimaryTermMap {
    fn from_iter<I: IntoIterator<Item = (S, ValueId)>>(iter: I) -> Self {
        let mut map = PrimaryTermMap::new();
        for (family, id) in iter {
            map.insert(family, id);
        }
        map
    }
}

/// Codec for the persisted primary term map
#[derive(Debug, Clone)]
pub struct PrimaryTermStore {
    default_family: String,
}

impl PrimaryTermStore {
    /// `default_family` receives bare legacy ids
    pub fn new(default_family: impl Into<String>) -> Self {
        Self {
            default_family: default_family.into(),
        }
    }

    pub fn default_family(&self) -> &str {
        &self.default_family
    }

    /// Decode a stored value into a map, degrading anything unreadable to an empty map
    pub fn decode(&self, raw: &RawStorageValue) -> PrimaryTermMap {
        match raw {
            RawStorageValue::Absent => PrimaryTermMap::new(),
            RawStorageValue::Integer(id) => self.legacy_map(u64::try_from(*id).unwrap_or(0)),
            RawStorageValue::Text(text) => self.decode_text(text),
        }
    }

    fn decode_text(&self, text: &str) -> PrimaryTermMap {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return PrimaryTermMap::new();
        }

        match serde_json::from_str::<JsonValue>(trimmed) {
            Ok(JsonValue::Object(entries)) => {
                let mut map = PrimaryTermMap::new();
                for (family, value) in entries {
                    match json_value_id(&value) {
                        Some(id) => map.insert(family, id),
                        None => debug!(
                            family = %family,
                            value = %value,
                            "Dropping non-numeric primary term entry"
                        ),
                    }
                }
                map
            }
            Ok(scalar @ (JsonValue::Number(_) | JsonValue::String(_))) => {
                self.legacy_map(json_value_id(&scalar).unwrap_or(0))
            }
            Ok(JsonValue::Null) => PrimaryTermMap::new(),
            Ok(other) => {
                warn!(raw = %other, "Stored primary terms are not an object; ignoring");
                PrimaryTermMap::new()
            }
            Err(err) => match trimmed.parse::<u64>() {
                Ok(id) => self.legacy_map(id),
                Err(_) => {
                    warn!(
                        error = %err,
                        raw = trimmed,
                        "Malformed primary term storage; treating as empty"
                    );
                    PrimaryTermMap::new()
                }
            },
        }
    }

    fn legacy_map(&self, id: ValueId) -> PrimaryTermMap {
        let mut map = PrimaryTermMap::new();
        map.insert(self.default_family.clone(), id);
        map
    }

    /// Encode a map in the JSON object form. Never produces the legacy bare id form.
    pub fn encode(&self, map: &PrimaryTermMap) -> Result<String> {
        Ok(serde_json::to_string(map)?)
    }

    /// Encode for writing back to item storage; `None` means the key should be deleted
    pub fn encode_for_storage(&self, map: &PrimaryTermMap) -> Result<Option<String>> {
        if map.is_empty() {
            return Ok(None);
        }
        self.encode(map).map(Some)
    }

    /// Read and decode the stored map of an item, absorbing accessor failures
    pub fn load(
        &self,
        blobs: &dyn PrimaryTermBlobAccessor,
        logger: &dyn ResolutionLogger,
        item_id: u64,
    ) -> PrimaryTermMap {
        match blobs.stored_primary_term_blob(item_id) {
            Ok(raw) => self.decode(&raw),
            Err(err) => {
                logger.accessor_failed("stored_primary_term_blob", None, &err);
                PrimaryTermMap::new()
            }
        }
    }
}

/// Positive integer ids, written either as JSON numbers or numeric strings
fn json_value_id(value: &JsonValue) -> Option<ValueId> {
    let id = match value {
        JsonValue::Number(number) => number.as_u64(),
        JsonValue::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}
