//! # Template Layer
//!
//! Find/replace tables and the engine that renders permalink templates
//! against them.

pub mod engine;
pub mod replacement_table;
pub mod standard_tokens;

pub use engine::{normalize_path, substitute, TemplateEngine};
pub use replacement_table::ReplacementTable;
pub use standard_tokens::StandardTokens;
