//! Non-family tokens derived from the item itself (date parts, id, slug, author).

use super::ReplacementTable;
use crate::constants::tokens;
use crate::models::ItemSnapshot;

/// Builder for the standard token table of one item
#[derive(Debug, Clone, Copy)]
pub struct StandardTokens<'a> {
    item: &'a ItemSnapshot,
}

impl<'a> StandardTokens<'a> {
    pub fn for_item(item: &'a ItemSnapshot) -> Self {
        Self { item }
    }

    /// Replacement for each token in [`tokens::STANDARD`], in the same order
    pub fn replacements(&self) -> [String; 9] {
        let published = self.item.published_at;
        [
            published.format("%Y").to_string(),
            published.format("%m").to_string(),
            published.format("%d").to_string(),
            published.format("%H").to_string(),
            published.format("%M").to_string(),
            published.format("%S").to_string(),
            self.item.item_id.to_string(),
            self.item.slug.clone(),
            self.item.author_nicename.clone(),
        ]
    }

    pub fn table(&self) -> ReplacementTable {
        tokens::STANDARD
            .into_iter()
            .zip(self.replacements())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item() -> ItemSnapshot {
        ItemSnapshot {
            item_id: 42,
            item_type: "post".to_string(),
            slug: "hello-world".to_string(),
            author_nicename: "sam".to_string(),
            published_at: NaiveDate::from_ymd_opt(2024, 3, 7)
                .and_then(|date| date.and_hms_opt(9, 5, 1))
                .unwrap(),
        }
    }

    #[test]
    fn test_standard_tokens_zero_padded() {
        let item = item();
        let table = StandardTokens::for_item(&item).table();

        assert_eq!(table.get(tokens::YEAR), Some("2024"));
        assert_eq!(table.get(tokens::MONTHNUM), Some("03"));
        assert_eq!(table.get(tokens::DAY), Some("07"));
        assert_eq!(table.get(tokens::HOUR), Some("09"));
        assert_eq!(table.get(tokens::MINUTE), Some("05"));
        assert_eq!(table.get(tokens::SECOND), Some("01"));
        assert_eq!(table.get(tokens::POST_ID), Some("42"));
        assert_eq!(table.get(tokens::POSTNAME), Some("hello-world"));
        assert_eq!(table.get(tokens::AUTHOR), Some("sam"));
        assert_eq!(table.len(), tokens::STANDARD.len());
    }
}
