//! # Permalink Hooks
//!
//! Thin adapter between host link events and [`PermalinkService`]. Each
//! method corresponds to one host event: building a regular item link,
//! building a custom item type link, choosing the default-family value used
//! by the host's own link builder, and handing parameters to the editor.

use super::PermalinkService;
use crate::accessors::{FamilyProvider, ItemTypeProvider};
use crate::models::{ItemSnapshot, ItemType, Value};
use crate::template::{normalize_path, substitute, ReplacementTable, StandardTokens, TemplateEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Parameters handed to the host's editor integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorParams {
    /// Item meta key the editor writes the primary term map into
    pub metafield_name: String,
    pub supported_taxonomies: Vec<String>,
}

/// Link-building entry points wired to host events
#[derive(Clone)]
pub struct PermalinkHooks {
    service: Arc<PermalinkService>,
    families: Arc<dyn FamilyProvider>,
    item_types: Arc<dyn ItemTypeProvider>,
}

impl PermalinkHooks {
    pub fn new(
        service: Arc<PermalinkService>,
        families: Arc<dyn FamilyProvider>,
        item_types: Arc<dyn ItemTypeProvider>,
    ) -> Self {
        Self {
            service,
            families,
            item_types,
        }
    }

    pub fn service(&self) -> &Arc<PermalinkService> {
        &self.service
    }

    /// Names of the supported families that apply to `item_type`
    pub fn families_for(&self, item_type: &str) -> Vec<String> {
        self.families
            .families_for_item_type(item_type)
            .into_iter()
            .map(|family| family.name)
            .collect()
    }

    /// Pick the candidate matching the stored primary value of the default family.
    ///
    /// Returns `fallback` when no primary value is stored or none of the
    /// candidates carries it.
    pub fn primary_value_for_default_family<'a>(
        &self,
        item_id: u64,
        candidates: &'a [Value],
        fallback: &'a Value,
    ) -> &'a Value {
        let default_family = &self.service.config().default_family;
        let Some(primary_id) = self.service.primary_term_ids(item_id).get(default_family) else {
            return fallback;
        };

        candidates
            .iter()
            .find(|candidate| candidate.id == primary_id)
            .unwrap_or(fallback)
    }

    /// Fill family placeholders left in a regular item permalink
    pub fn item_link(&self, permalink: &str, item: &ItemSnapshot) -> String {
        if TemplateEngine::is_static(permalink) {
            return permalink.to_string();
        }

        let families = self.families_for(&item.item_type);
        self.service.resolve_permalink(
            permalink,
            item.item_id,
            &item.item_type,
            &families,
            &ReplacementTable::new(),
        )
    }

    /// Build the permalink of an item of a custom item type.
    ///
    /// The url is rendered from the item type's permalink structure rather
    /// than from `url`, which is returned untouched for unsupported types.
    /// With `leave_name` the `%<type>%` token stays in place for the host's
    /// sample permalink editor.
    pub fn item_type_link(
        &self,
        url: &str,
        item: &ItemSnapshot,
        leave_name: bool,
        site_url: &str,
    ) -> String {
        let Some(item_type) = self.item_types.item_type(&item.item_type) else {
            return url.to_string();
        };

        let Some(structure) = permalink_structure(&item_type) else {
            debug!(item_type = %item_type.name, "Item type has no permalink structure");
            return url.to_string();
        };

        let families = self.families_for(&item.item_type);
        let family_tokens = self.service.resolve_placeholders(item.item_id, &families);

        let mut table = StandardTokens::for_item(item).table();
        table.extend(family_tokens.clone());

        if !leave_name {
            table.insert(item_type.name_token(), item.slug.clone());
        }

        let rewrite_slug = item_type.rewrite_slug.as_deref().unwrap_or_default();
        table.insert(item_type.slug_token(), substitute(rewrite_slug, &family_tokens));

        let path = substitute(&structure, &table);
        normalize_path(&join_site_url(site_url, &path))
    }

    /// Parameters for the host's editor integration
    pub fn editor_params(&self) -> EditorParams {
        EditorParams {
            metafield_name: self.service.config().meta_field_name.clone(),
            supported_taxonomies: self
                .families
                .supported_families()
                .into_iter()
                .map(|family| family.name)
                .collect(),
        }
    }
}

impl std::fmt::Debug for PermalinkHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermalinkHooks")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Registered structure, or `<rewrite slug>/%postname%` when only a slug is known
fn permalink_structure(item_type: &ItemType) -> Option<String> {
    item_type.permalink_structure.clone().or_else(|| {
        item_type
            .rewrite_slug
            .as_deref()
            .map(|slug| format!("{}/%postname%", slug.trim_end_matches('/')))
    })
}

fn join_site_url(site_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::{HostAccessors, InMemoryHost};
    use crate::config::PermalinkConfig;
    use crate::models::Family;
    use crate::registry::{FamilyRegistry, ItemTypeRegistry};
    use crate::storage::RawStorageValue;
    use chrono::NaiveDate;

    fn item(item_id: u64, item_type: &str, slug: &str) -> ItemSnapshot {
        ItemSnapshot {
            item_id,
            item_type: item_type.to_string(),
            slug: slug.to_string(),
            author_nicename: "sam".to_string(),
            published_at: NaiveDate::from_ymd_opt(2024, 3, 7)
                .and_then(|date| date.and_hms_opt(9, 5, 1))
                .unwrap(),
        }
    }

    fn hooks() -> (Arc<InMemoryHost>, PermalinkHooks) {
        let host = Arc::new(InMemoryHost::new());
        host.insert_value(Value::new(5, "News", "news", "category"))
            .insert_value(Value::new(6, "Local", "local", "category").with_parent(5))
            .insert_value(Value::new(20, "Apparel", "apparel", "product_type"))
            .insert_value(Value::new(21, "Shirts", "shirts", "product_type").with_parent(20));

        let families = FamilyRegistry::new();
        families
            .register(Family::new("category", ["post"]))
            .register(Family::new("product_type", ["product"]));

        let item_types = ItemTypeRegistry::new();
        item_types
            .register(
                ItemType::new("product")
                    .with_rewrite_slug("shop/%product_type%")
                    .with_permalink_structure("%product_slug%/%product%"),
            )
            .register(ItemType::new("event").with_rewrite_slug("events"))
            .register(ItemType::new("note"));

        let service = PermalinkService::new(
            PermalinkConfig::default(),
            HostAccessors::from_host(host.clone()),
        );
        let hooks = PermalinkHooks::new(
            Arc::new(service),
            Arc::new(families),
            Arc::new(item_types),
        );
        (host, hooks)
    }

    #[test]
    fn test_item_link_fills_family_placeholders() {
        let (host, hooks) = hooks();
        host.assign(1, "category", &[6]);

        assert_eq!(
            hooks.item_link(" http://site.test/%category%/hello-world ", &item(1, "post", "hello-world")),
            "http://site.test/news/local/hello-world/"
        );
        assert_eq!(
            hooks.item_link("http://site.test/?p=1", &item(1, "post", "hello-world")),
            "http://site.test/?p=1"
        );
    }

    #[test]
    fn test_item_type_link_uses_structure_and_rewrite_slug() {
        let (host, hooks) = hooks();
        host.assign(9, "product_type", &[21]);

        let url = hooks.item_type_link(
            "http://site.test/?product=blue-shirt",
            &item(9, "product", "blue-shirt"),
            false,
            "http://site.test/",
        );
        assert_eq!(url, "http://site.test/shop/apparel/shirts/blue-shirt/");
    }

    #[test]
    fn test_item_type_link_leave_name() {
        let (host, hooks) = hooks();
        host.assign(9, "product_type", &[21]);

        let url = hooks.item_type_link("", &item(9, "product", "blue-shirt"), true, "http://site.test");
        assert_eq!(url, "http://site.test/shop/apparel/shirts/%product%/");
    }

    #[test]
    fn test_item_type_link_falls_back_to_rewrite_slug() {
        let (_, hooks) = hooks();
        let url = hooks.item_type_link("", &item(4, "event", "launch"), false, "http://site.test");
        assert_eq!(url, "http://site.test/events/launch/");
    }

    #[test]
    fn test_item_type_link_unsupported_or_unstructured_passthrough() {
        let (_, hooks) = hooks();
        let original = "http://site.test/?p=3";
        assert_eq!(
            hooks.item_type_link(original, &item(3, "page", "about"), false, "http://site.test"),
            original
        );
        assert_eq!(
            hooks.item_type_link(original, &item(3, "note", "memo"), false, "http://site.test"),
            original
        );
    }

    #[test]
    fn test_primary_value_for_default_family() {
        let (host, hooks) = hooks();
        let news = Value::new(5, "News", "news", "category");
        let local = Value::new(6, "Local", "local", "category").with_parent(5);
        let candidates = vec![news.clone(), local.clone()];

        assert_eq!(
            hooks.primary_value_for_default_family(1, &candidates, &news).id,
            5
        );

        host.store_blob(1, RawStorageValue::from(r#"{"category":6}"#));
        assert_eq!(
            hooks.primary_value_for_default_family(1, &candidates, &news).id,
            6
        );

        host.store_blob(1, RawStorageValue::from(r#"{"category":99}"#));
        assert_eq!(
            hooks.primary_value_for_default_family(1, &candidates, &news).id,
            5
        );
    }

    #[test]
    fn test_editor_params_serialization() {
        let (_, hooks) = hooks();
        let params = serde_json::to_value(hooks.editor_params()).unwrap();
        assert_eq!(
            params,
            serde_json::json!({
                "metafieldName": "_stmpc_term_ids",
                "supportedTaxonomies": ["category", "product_type"]
            })
        );
    }
}
