mod common;

use common::*;
use primary_category_core::accessors::{InMemoryHost, TracingResolutionLogger};
use primary_category_core::resolution::{ChainOptions, TermChainResolver};
use primary_category_core::storage::{PrimaryTermStore, RawStorageValue};
use primary_category_core::template::ReplacementTable;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

proptest! {
    /// Property: encoded primary term maps decode back to the same map
    #[test]
    fn primary_term_maps_round_trip(map in primary_term_map_strategy()) {
        let store = PrimaryTermStore::new("category");
        let encoded = store.encode(&map).unwrap();
        prop_assert_eq!(store.decode(&RawStorageValue::from(encoded)), map);
    }

    /// Property: bare ids always decode into the default family
    #[test]
    fn legacy_ids_decode_into_default_family(id in value_id_strategy()) {
        let store = PrimaryTermStore::new("category");
        let from_text = store.decode(&RawStorageValue::from(id.to_string()));
        let from_integer = store.decode(&RawStorageValue::Integer(id as i64));

        prop_assert_eq!(from_text.get("category"), Some(id));
        prop_assert_eq!(from_text.len(), 1);
        prop_assert_eq!(from_text, from_integer);
    }

    /// Property: arbitrary text never makes decoding fail, and only positive ids survive
    #[test]
    fn decoding_never_fails(raw in ".{0,48}") {
        let map = PrimaryTermStore::new("category").decode(&RawStorageValue::from(raw));
        prop_assert!(map.iter().all(|(_, id)| id > 0));
    }

    /// Property: chain walks terminate, visit each value at most once, and end at the start value
    #[test]
    fn chain_walks_terminate_without_repeats(values in hierarchy_strategy(), start in 1u64..24) {
        let host = Arc::new(InMemoryHost::new());
        for value in &values {
            host.insert_value(value.clone());
        }
        let chains = TermChainResolver::new(host, Arc::new(TracingResolutionLogger));

        match chains.walk("category", start) {
            Some(nodes) => {
                let ids: Vec<u64> = nodes.iter().map(|node| node.id).collect();
                let unique: HashSet<u64> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
                prop_assert_eq!(ids.last().copied(), Some(start));
                prop_assert!(ids.len() <= values.len());
            }
            None => prop_assert!(start as usize > values.len()),
        }

        let chain = chains.chain("category", start, &ChainOptions::default());
        prop_assert!(!chain.is_empty());
    }

    /// Property: templates without `%` come back unchanged
    #[test]
    fn static_templates_are_unchanged(template in static_template_strategy()) {
        let (_, service) = news_host().with_assignment(1, "category", &[3]).build_service();
        let url = service.resolve_permalink(&template, 1, "post", &["category"], &ReplacementTable::new());
        prop_assert_eq!(url, template);
    }

    /// Property: known family tokens never survive rendering, unknown ones always do
    #[test]
    fn known_tokens_resolved_unknown_kept(template in template_strategy()) {
        let (_, service) = news_host().with_assignment(1, "category", &[3]).build_service();
        let url = service.resolve_permalink(
            &template,
            1,
            "post",
            &["category", "product_type"],
            &ReplacementTable::new(),
        );

        prop_assert!(!url.contains("%category%"));
        prop_assert!(!url.contains("%product_type%"));
        if template.contains("%totally_unknown%") {
            prop_assert!(url.contains("%totally_unknown%"));
        }
        if template.contains('%') {
            prop_assert!(url.ends_with('/'));
            prop_assert!(!url.ends_with("//"));
        }
    }

    /// Property: rendering twice with unchanged data yields identical output
    #[test]
    fn rendering_is_idempotent(template in template_strategy(), assigned in prop::collection::vec(1u64..=4, 0..4)) {
        let (_, service) = news_host().with_assignment(1, "category", &assigned).build_service();
        let extra: ReplacementTable = [("%postname%", "hello-world")].into_iter().collect();

        let first = service.resolve_permalink(&template, 1, "post", &["category"], &extra);
        service.begin_request();
        let second = service.resolve_permalink(&template, 1, "post", &["category"], &extra);
        prop_assert_eq!(first, second);
    }
}
