//! # Data Models
//!
//! Read-only snapshots of the host's classification data. The core never
//! constructs or mutates these beyond what the host hands it.

pub mod family;
pub mod item;
pub mod value;

// Re-export core models for easy access
pub use family::Family;
pub use item::{ItemSnapshot, ItemType};
pub use value::{Value, ValueId};
