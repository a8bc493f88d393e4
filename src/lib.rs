#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Primary Category Core
//!
//! Primary term resolution and taxonomy-aware permalinks for hierarchical
//! content classifications.
//!
//! ## Overview
//!
//! Content items are classified with values from one or more hierarchical
//! families (taxonomies such as `category` or `product_type`). When an item
//! carries several values of a family, one of them is the **primary** value,
//! and permalink templates like `/%category%/%postname%/` are rendered with
//! the primary value's ancestor chain in place of the family placeholder.
//!
//! The host (content store, editor, routing) stays outside this crate. It
//! supplies data through the collaborator traits in [`accessors`] and calls
//! into [`permalink::PermalinkService`] whenever it needs a url.
//!
//! ## Resolution Order
//!
//! For every family placeholder of an item:
//!
//! 1. the stored primary value (decoded from the item's primary term map),
//! 2. the lowest-id value assigned to the item,
//! 3. the family default (site setting for the default family, override hook for all),
//! 4. a substitute string such as `no-product-type`.
//!
//! A candidate only wins if it resolves in the hierarchy. Nothing on this
//! path returns an error: damaged storage, dangling ids, cyclic hierarchies,
//! and failing accessors all degrade to the next source.
//!
//! ## Module Organization
//!
//! - [`accessors`] - Host collaborator traits and an in-memory host
//! - [`storage`] - Primary term map encoding and decoding
//! - [`resolution`] - Term chains, default policy, and placeholder fallback
//! - [`template`] - Replacement tables and the template engine
//! - [`permalink`] - Service facade and host link hooks
//! - [`registry`] - Supported families and item types
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use primary_category_core::accessors::{HostAccessors, InMemoryHost};
//! use primary_category_core::config::PermalinkConfig;
//! use primary_category_core::models::Value;
//! use primary_category_core::permalink::PermalinkService;
//! use primary_category_core::storage::RawStorageValue;
//! use primary_category_core::template::ReplacementTable;
//! use std::sync::Arc;
//!
//! let host = Arc::new(InMemoryHost::new());
//! host.insert_value(Value::new(1, "News", "news", "category"))
//!     .insert_value(Value::new(2, "Local", "local", "category").with_parent(1))
//!     .insert_value(Value::new(3, "Sports", "sports", "category"))
//!     .assign(7, "category", &[3, 2])
//!     .store_blob(7, RawStorageValue::from(r#"{"category":2}"#));
//!
//! let service = PermalinkService::new(PermalinkConfig::default(), HostAccessors::from_host(host));
//! service.begin_request();
//!
//! let extra: ReplacementTable = [("%postname%", "city-budget")].into_iter().collect();
//! let url = service.resolve_permalink("/%category%/%postname%/", 7, "post", &["category"], &extra);
//! assert_eq!(url, "/news/local/city-budget/");
//! ```

pub mod accessors;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod permalink;
pub mod registry;
pub mod resolution;
pub mod storage;
pub mod template;

pub use accessors::{
    AssignedValuesAccessor, DefaultIdOverride, FamilyProvider, HierarchyAccessor, HostAccessors,
    InMemoryHost, ItemTypeProvider, PrimaryTermBlobAccessor, ResolutionLogger, SiteSettings,
};
pub use config::{ConfigManager, PermalinkConfig};
pub use error::{AccessorError, PermalinkError, Result};
pub use models::{Family, ItemSnapshot, ItemType, Value, ValueId};
pub use permalink::{EditorParams, PermalinkHooks, PermalinkService};
pub use registry::{FamilyRegistry, ItemTypeRegistry};
pub use storage::{PrimaryTermMap, PrimaryTermStore, RawStorageValue};
pub use template::{ReplacementTable, TemplateEngine};
