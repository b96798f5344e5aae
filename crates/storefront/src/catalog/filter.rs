//! Menu filtering and meal categorization.

use crate::models::{Category, FoodItem};

/// In-memory filter over a fetched menu.
///
/// Both dimensions are optional and compose with AND. The search term
/// matches case-insensitively against name and description.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl MenuFilter {
    /// Filter restricted to one category.
    #[must_use]
    pub const fn by_category(category: Category) -> Self {
        Self {
            category: Some(category),
            search: None,
        }
    }

    /// Filter by a free-text search term.
    #[must_use]
    pub fn by_search(term: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(term.into()),
        }
    }

    /// Whether a single item passes the filter.
    #[must_use]
    pub fn matches(&self, item: &FoodItem) -> bool {
        if let Some(category) = self.category
            && item.category != category
        {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            return item.name.to_lowercase().contains(&term)
                || item.description.to_lowercase().contains(&term);
        }
        true
    }

    /// Apply the filter to a menu, preserving order.
    #[must_use]
    pub fn apply(&self, items: &[FoodItem]) -> Vec<FoodItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Assign a category to a provider meal by keywords in its name.
///
/// Rules are checked in order and the first hit wins. Unmatched names
/// land in `Chinese`, which keeps that tab populated.
#[must_use]
pub fn categorize(meal_name: &str) -> Category {
    let name = meal_name.to_lowercase();
    let has = |needle: &str| name.contains(needle);

    if has("pizza") {
        return Category::Pizza;
    }
    if has("burger") || (has("beef") && !has("cake")) {
        return Category::Burgers;
    }
    if has("chicken") || has("noodle") || has("rice") || has("stir") || has("asian") {
        return Category::Chinese;
    }
    if has("cake") || has("dessert") || has("sweet") || has("ice") || has("chocolate") || has("cookie")
    {
        return Category::Desserts;
    }
    if has("juice") || has("coffee") || has("drink") || has("cocktail") || has("tea") {
        return Category::Beverages;
    }
    if has("seafood") || has("fish") || has("salmon") || has("tuna") {
        return Category::Chinese;
    }
    if has("pasta") || has("spaghetti") || has("lasagna") {
        return Category::Pizza;
    }

    Category::Chinese
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use foodflame_core::ItemId;

    use super::*;

    fn item(name: &str, description: &str, category: Category) -> FoodItem {
        FoodItem {
            id: ItemId::new(name),
            name: name.to_owned(),
            description: description.to_owned(),
            price: Decimal::from(10),
            image: String::new(),
            category,
            rating: 4.0,
            prep_time: "10-15 min".to_owned(),
        }
    }

    #[test]
    fn test_categorize_keyword_precedence() {
        assert_eq!(categorize("Seafood Pizza"), Category::Pizza);
        assert_eq!(categorize("Beef Wellington"), Category::Burgers);
        // "cake" suppresses the beef rule, then matches desserts
        assert_eq!(categorize("Beef Cake"), Category::Desserts);
        assert_eq!(categorize("Chicken Noodle Soup"), Category::Chinese);
        assert_eq!(categorize("Chocolate Gateau"), Category::Desserts);
        assert_eq!(categorize("Iced Tea"), Category::Desserts); // "ice" wins over "tea"
        assert_eq!(categorize("Green Tea"), Category::Beverages);
        assert_eq!(categorize("Grilled Salmon"), Category::Chinese);
        assert_eq!(categorize("Spaghetti Carbonara"), Category::Pizza);
    }

    #[test]
    fn test_categorize_default_bucket() {
        assert_eq!(categorize("Ratatouille"), Category::Chinese);
    }

    #[test]
    fn test_filter_by_category() {
        let menu = vec![
            item("Margherita", "classic", Category::Pizza),
            item("Cola", "fizzy", Category::Beverages),
        ];

        let filtered = MenuFilter::by_category(Category::Pizza).apply(&menu);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|i| i.category == Category::Pizza));
    }

    #[test]
    fn test_search_matches_name_and_description_case_insensitively() {
        let menu = vec![
            item("Margherita", "fresh BASIL on top", Category::Pizza),
            item("Basil Lemonade", "refreshing", Category::Beverages),
            item("Cola", "fizzy", Category::Beverages),
        ];

        let filtered = MenuFilter::by_search("basil").apply(&menu);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_dimensions_compose_with_and() {
        let menu = vec![
            item("Basil Lemonade", "refreshing", Category::Beverages),
            item("Margherita", "fresh basil", Category::Pizza),
        ];

        let filter = MenuFilter {
            category: Some(Category::Pizza),
            search: Some("basil".to_owned()),
        };
        let filtered = filter.apply(&menu);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|i| i.name.as_str()), Some("Margherita"));
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let menu = vec![item("Cola", "fizzy", Category::Beverages)];
        assert_eq!(MenuFilter::default().apply(&menu).len(), 1);
    }
}
