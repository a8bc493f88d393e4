//! # Resolution
//!
//! Turns an item and its families into resolved placeholder replacements:
//! ancestor chains, default ids, and the per-family source fallback.

pub mod default_policy;
pub mod placeholder_resolver;
pub mod term_chain;

pub use default_policy::{DefaultIdCache, DefaultPolicy};
pub use placeholder_resolver::{PlaceholderResolver, ResolvedPlaceholder};
pub use term_chain::{ChainOptions, TermChainResolver};
