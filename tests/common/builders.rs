//! Builders for in-memory hosts and services used across integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use primary_category_core::accessors::{HostAccessors, InMemoryHost};
use primary_category_core::config::PermalinkConfig;
use primary_category_core::models::{ItemSnapshot, Value, ValueId};
use primary_category_core::permalink::PermalinkService;
use primary_category_core::storage::RawStorageValue;
use std::sync::Arc;

/// Builder pattern for an in-memory host with a hierarchy and item assignments
pub struct HostBuilder {
    host: Arc<InMemoryHost>,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            host: Arc::new(InMemoryHost::new()),
        }
    }

    /// Add a value; `parent_id` of `0` makes it a root
    pub fn with_value(self, family: &str, id: ValueId, slug: &str, parent_id: ValueId) -> Self {
        let name = title_case(slug);
        self.host
            .insert_value(Value::new(id, name, slug, family).with_parent(parent_id));
        self
    }

    pub fn with_assignment(self, item_id: u64, family: &str, ids: &[ValueId]) -> Self {
        self.host.assign(item_id, family, ids);
        self
    }

    pub fn with_blob(self, item_id: u64, raw: impl Into<RawStorageValue>) -> Self {
        self.host.store_blob(item_id, raw.into());
        self
    }

    pub fn with_default(self, family: &str, id: ValueId) -> Self {
        self.host.set_default_value_id(family, id);
        self
    }

    pub fn failing(self, family: &str) -> Self {
        self.host.fail_family(family);
        self
    }

    pub fn build(self) -> Arc<InMemoryHost> {
        self.host
    }

    pub fn build_service(self) -> (Arc<InMemoryHost>, PermalinkService) {
        let host = self.build();
        let service = PermalinkService::new(
            PermalinkConfig::default(),
            HostAccessors::from_host(host.clone()),
        );
        (host, service)
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `news` > `local` > `city-hall`, plus a separate `sports` root
pub fn news_host() -> HostBuilder {
    HostBuilder::new()
        .with_value("category", 1, "news", 0)
        .with_value("category", 2, "local", 1)
        .with_value("category", 3, "city-hall", 2)
        .with_value("category", 4, "sports", 0)
}

pub fn published_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|date| date.and_hms_opt(9, 5, 1))
        .expect("valid test date")
}

pub fn item(item_id: u64, item_type: &str, slug: &str) -> ItemSnapshot {
    ItemSnapshot {
        item_id,
        item_type: item_type.to_string(),
        slug: slug.to_string(),
        author_nicename: "sam".to_string(),
        published_at: published_at(),
    }
}

fn title_case(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
