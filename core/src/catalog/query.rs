//! Read-side helpers used by list and search views.

use super::types::CatalogItem;

/// Pseudo-category that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// `"All"` followed by each distinct item name in first-seen order.
pub fn categories<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !out[1..].iter().any(|c| *c == item.name) {
            out.push(item.name.clone());
        }
    }
    out
}

pub fn filter_by_category<'a, I>(items: I, category: &str) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    if category == ALL_CATEGORIES {
        return items.into_iter().collect();
    }
    items.into_iter().filter(|i| i.name == category).collect()
}

/// Case-insensitive match on name, description or special ingredient.
/// Blank input returns everything.
pub fn search<'a, I>(items: I, text: &str) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|i| {
            i.name.to_lowercase().contains(&needle)
                || i.description.to_lowercase().contains(&needle)
                || i.special_ingredient.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{ImageRef, ItemKind};

    fn item(id: &str, name: &str, special: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            description: format!("A cup of {name}"),
            roasted: String::new(),
            image_square: ImageRef::unresolved(),
            image_portrait: ImageRef::unresolved(),
            ingredients: String::new(),
            special_ingredient: special.into(),
            prices: Vec::new(),
            average_rating: 0.0,
            ratings_count: String::new(),
            favorite: false,
            kind: ItemKind::Coffee,
            index: 0,
        }
    }

    fn items() -> Vec<CatalogItem> {
        vec![
            item("C1", "Americano", "With Steamed Milk"),
            item("C2", "Cappuccino", "With Foam"),
            item("C3", "Americano", "With Chocolate"),
            item("C4", "Latte", "With Oat Milk"),
        ]
    }

    #[test]
    fn test_categories_first_seen_order() {
        let items = items();
        assert_eq!(
            categories(&items),
            vec!["All", "Americano", "Cappuccino", "Latte"]
        );
    }

    #[test]
    fn test_filter_by_category() {
        let items = items();
        assert_eq!(filter_by_category(&items, ALL_CATEGORIES).len(), 4);
        let ids: Vec<_> = filter_by_category(&items, "Americano")
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert!(filter_by_category(&items, "Mocha").is_empty());
    }

    #[test]
    fn test_search_fields_and_blank() {
        let items = items();
        assert_eq!(search(&items, "   ").len(), 4);
        let ids: Vec<_> = search(&items, " MILK ").into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C4"]);
        assert_eq!(search(&items, "cup of latte").len(), 1);
    }
}
