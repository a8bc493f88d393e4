//! Proptest strategies for families, primary term maps, hierarchies, and templates.

#![allow(dead_code)]

use primary_category_core::models::{Value, ValueId};
use primary_category_core::storage::PrimaryTermMap;
use proptest::prelude::*;
use proptest::strategy::Just;

/// Strategy for generating family names such as `category` or `product_type`
pub fn family_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,23}"
}

/// Strategy for generating value ids
pub fn value_id_strategy() -> impl Strategy<Value = ValueId> {
    1u64..=100_000
}

/// Strategy for generating primary term maps
pub fn primary_term_map_strategy() -> impl Strategy<Value = PrimaryTermMap> {
    prop::collection::btree_map(family_name_strategy(), value_id_strategy(), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for generating a single-family hierarchy with arbitrary parent links.
///
/// Parents may point anywhere in `1..=size` (or to `0`), so cycles, self
/// parents and long chains all occur.
pub fn hierarchy_strategy() -> impl Strategy<Value = Vec<Value>> {
    (1usize..24).prop_flat_map(|size| {
        prop::collection::vec(0u64..=size as u64, size).prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(index, parent)| {
                    let id = index as u64 + 1;
                    Value::new(id, format!("Value {id}"), format!("v{id}"), "category")
                        .with_parent(parent)
                })
                .collect()
        })
    })
}

/// Strategy for generating templates that contain no placeholder delimiter
pub fn static_template_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/:._?=&#-]{0,64}"
}

/// Strategy for generating templates mixing known and unknown tokens with literal text
pub fn template_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("%category%".to_string()),
        Just("%postname%".to_string()),
        Just("%product_type%".to_string()),
        Just("%totally_unknown%".to_string()),
        Just("%".to_string()),
        "[a-z0-9-]{1,8}",
    ];
    prop::collection::vec(segment, 0..8).prop_map(|segments| format!("/{}", segments.join("/")))
}
