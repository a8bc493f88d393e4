//! # Storage
//!
//! The only persisted artifact the core defines: the per-item primary term map.

pub mod primary_term_store;

pub use primary_term_store::{PrimaryTermMap, PrimaryTermStore, RawStorageValue};
