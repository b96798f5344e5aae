//! Menu catalog assembled from public food APIs.
//!
//! Items come from two upstream providers (a meal database and a drink
//! database) plus a small house list of pizzas and burgers. The providers
//! only give names and images; prices, ratings, and preparation windows
//! are synthesized per fetch. Assembled menus are cached with `moka`
//! (5-minute TTL).

mod filter;
pub mod providers;

pub use filter::{MenuFilter, categorize};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use foodflame_core::ItemId;

use crate::config::CatalogConfig;
use crate::models::{Category, FoodItem};
use providers::{DrinkListResponse, MealListResponse};

/// Items taken per meal category.
const MEALS_PER_CATEGORY: usize = 4;
/// Items taken from the drink provider.
const DRINK_COUNT: usize = 8;
/// Batch size returned by [`MenuClient::load_more`].
const PAGE_SIZE: usize = 12;
/// Last page that still yields a batch.
const MAX_PAGES: u32 = 4;

/// Errors from the upstream catalog providers.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport or decode failure talking to a provider.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
}

// =============================================================================
// MenuClient
// =============================================================================

/// Client for the upstream catalog providers.
///
/// Cheap to clone; assembled menus are cached for 5 minutes.
#[derive(Clone)]
pub struct MenuClient {
    inner: Arc<MenuClientInner>,
}

struct MenuClientInner {
    client: reqwest::Client,
    config: CatalogConfig,
    cache: Cache<CacheKey, Arc<Vec<FoodItem>>>,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Menu,
}

impl MenuClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(MenuClientInner {
                client: reqwest::Client::new(),
                config,
                cache,
            }),
        }
    }

    /// Fetch and assemble the full menu.
    ///
    /// Each provider call that fails contributes nothing and is logged.
    /// When every provider call fails the fixed fallback list is returned
    /// instead, so the menu is never empty. Successful assemblies are
    /// cached.
    #[instrument(skip(self))]
    pub async fn fetch_menu(&self) -> Vec<FoodItem> {
        if let Some(menu) = self.inner.cache.get(&CacheKey::Menu).await {
            debug!("Cache hit for menu");
            return menu.as_ref().clone();
        }

        // All provider calls in flight at once, results kept in menu order.
        let (beef, chicken, dessert, pasta, seafood, vegetarian, drinks) = tokio::join!(
            self.meals_in_category("Beef"),
            self.meals_in_category("Chicken"),
            self.meals_in_category("Dessert"),
            self.meals_in_category("Pasta"),
            self.meals_in_category("Seafood"),
            self.meals_in_category("Vegetarian"),
            self.ordinary_drinks(),
        );

        let mut items = Vec::new();
        let mut any_provider_ok = false;

        let meal_results = [
            ("Beef", beef),
            ("Chicken", chicken),
            ("Dessert", dessert),
            ("Pasta", pasta),
            ("Seafood", seafood),
            ("Vegetarian", vegetarian),
        ];
        for (category, result) in meal_results {
            match result {
                Ok(meals) => {
                    any_provider_ok = true;
                    items.extend(meals.into_iter().take(MEALS_PER_CATEGORY));
                }
                Err(err) => {
                    warn!(category, error = %err, "meal provider request failed");
                }
            }
        }

        match drinks {
            Ok(drinks) => {
                any_provider_ok = true;
                items.extend(drinks.into_iter().take(DRINK_COUNT));
            }
            Err(err) => {
                warn!(error = %err, "drink provider request failed");
            }
        }

        if !any_provider_ok {
            warn!("all catalog providers failed, serving fallback menu");
            return fallback_items();
        }

        items.extend(house_pizzas());
        items.extend(house_burgers());

        self.inner
            .cache
            .insert(CacheKey::Menu, Arc::new(items.clone()))
            .await;

        items
    }

    /// One more shuffled batch of the menu pool, or `None` past the last
    /// page.
    ///
    /// Page 1 is the initial menu; pages 2 through 4 each return a batch.
    #[instrument(skip(self))]
    pub async fn load_more(&self, page: u32) -> Option<Vec<FoodItem>> {
        if page > MAX_PAGES {
            return None;
        }

        let mut pool = self.fetch_menu().await;
        let mut rng = rand::rng();
        pool.shuffle(&mut rng);
        pool.truncate(PAGE_SIZE);
        Some(pool)
    }

    /// Meals in one provider category, with synthesized storefront fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport or decode failure.
    pub async fn meals_in_category(&self, category: &str) -> Result<Vec<FoodItem>, CatalogError> {
        let url = format!(
            "{}/filter.php?c={category}",
            self.inner.config.mealdb_base_url
        );
        let response: MealListResponse = self
            .inner
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut rng = rand::rng();
        let items = response
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(|meal| FoodItem {
                id: ItemId::new(format!("meal-{}", meal.id)),
                description: format!(
                    "Delicious {} prepared with fresh ingredients and authentic spices",
                    meal.name
                ),
                category: categorize(&meal.name),
                price: Decimal::from(rng.random_range(8..28)),
                rating: round_rating(rng.random_range(3.5..5.0)),
                prep_time: format!(
                    "{}-{} min",
                    rng.random_range(15..35),
                    rng.random_range(35..55)
                ),
                name: meal.name,
                image: meal.thumb,
            })
            .collect();

        Ok(items)
    }

    /// Drinks from the "Ordinary Drink" provider category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport or decode failure.
    pub async fn ordinary_drinks(&self) -> Result<Vec<FoodItem>, CatalogError> {
        let url = format!(
            "{}/filter.php?c=Ordinary_Drink",
            self.inner.config.cocktaildb_base_url
        );
        let response: DrinkListResponse = self
            .inner
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut rng = rand::rng();
        let items = response
            .drinks
            .unwrap_or_default()
            .into_iter()
            .map(|drink| FoodItem {
                id: ItemId::new(format!("drink-{}", drink.id)),
                description: format!(
                    "Refreshing {} - perfect to complement your meal",
                    drink.name
                ),
                category: Category::Beverages,
                price: Decimal::from(rng.random_range(3..11)),
                rating: round_rating(rng.random_range(4.0..5.0)),
                prep_time: "2-5 min".to_owned(),
                name: drink.name,
                image: drink.thumb,
            })
            .collect();

        Ok(items)
    }
}

/// Round a synthesized rating to one decimal place.
fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

// =============================================================================
// House items and fallback
// =============================================================================

fn house_item(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    image: &str,
    category: Category,
    rating: f64,
    prep_time: &str,
) -> FoodItem {
    FoodItem {
        id: ItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image: image.to_owned(),
        category,
        rating,
        prep_time: prep_time.to_owned(),
    }
}

/// House pizzas appended to every assembled menu.
fn house_pizzas() -> Vec<FoodItem> {
    vec![
        house_item(
            "pizza-1",
            "Margherita Pizza",
            "Classic Italian pizza with fresh tomatoes, mozzarella, and basil",
            Decimal::new(1299, 2),
            "https://images.unsplash.com/photo-1604068549290-dea0e4a305ca?w=500&h=500&fit=crop",
            Category::Pizza,
            4.8,
            "15-20 min",
        ),
        house_item(
            "pizza-2",
            "Pepperoni Pizza",
            "Loaded with premium pepperoni and melted cheese",
            Decimal::new(1599, 2),
            "https://images.unsplash.com/photo-1628840042765-356cda07504e?w=500&h=500&fit=crop",
            Category::Pizza,
            4.7,
            "15-20 min",
        ),
        house_item(
            "pizza-3",
            "Veggie Supreme Pizza",
            "Fresh vegetables, bell peppers, mushrooms, and olives",
            Decimal::new(1499, 2),
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=500&h=500&fit=crop",
            Category::Pizza,
            4.6,
            "15-20 min",
        ),
    ]
}

/// House burgers appended to every assembled menu.
fn house_burgers() -> Vec<FoodItem> {
    vec![
        house_item(
            "burger-1",
            "Classic Beef Burger",
            "Juicy beef patty with lettuce, tomato, onion, and special sauce",
            Decimal::new(1199, 2),
            "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=500&h=500&fit=crop",
            Category::Burgers,
            4.5,
            "10-15 min",
        ),
        house_item(
            "burger-2",
            "Chicken Deluxe Burger",
            "Crispy chicken breast with mayo, lettuce, and pickles",
            Decimal::new(1099, 2),
            "https://images.unsplash.com/photo-1606755962773-d324e2dabd05?w=500&h=500&fit=crop",
            Category::Burgers,
            4.4,
            "10-15 min",
        ),
        house_item(
            "burger-3",
            "Double Cheese Burger",
            "Two beef patties with double cheese and caramelized onions",
            Decimal::new(1699, 2),
            "https://images.unsplash.com/photo-1551615593-ef5fe247e8f7?w=500&h=500&fit=crop",
            Category::Burgers,
            4.8,
            "12-18 min",
        ),
    ]
}

/// Minimal static menu served when every provider is unreachable.
#[must_use]
pub fn fallback_items() -> Vec<FoodItem> {
    vec![
        house_item(
            "1",
            "Margherita Pizza",
            "Fresh tomato sauce, mozzarella, and basil",
            Decimal::new(1299, 2),
            "https://images.unsplash.com/photo-1604068549290-dea0e4a305ca?w=400",
            Category::Pizza,
            4.8,
            "20-30 min",
        ),
        house_item(
            "2",
            "Classic Burger",
            "Beef patty, lettuce, tomato, cheese, and sauce",
            Decimal::new(999, 2),
            "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400",
            Category::Burgers,
            4.6,
            "15-25 min",
        ),
    ]
}
