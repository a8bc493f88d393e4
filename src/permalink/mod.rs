//! # Permalinks
//!
//! The host-facing surface: [`PermalinkService`] for decoding, rendering, and
//! chain building, and [`PermalinkHooks`] adapting it to host link events.

pub mod hooks;
pub mod service;

pub use hooks::{EditorParams, PermalinkHooks};
pub use service::PermalinkService;
