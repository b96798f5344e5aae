//! Wire types for the upstream catalog providers.
//!
//! Both providers speak the same shape: a single optional array under a
//! provider-specific key, `null` when a filter matches nothing.

use serde::Deserialize;

/// Response of the meal API's `filter.php` endpoint.
#[derive(Debug, Deserialize)]
pub struct MealListResponse {
    pub meals: Option<Vec<MealSummary>>,
}

/// One meal row from a category filter.
#[derive(Debug, Clone, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumb: String,
}

/// Response of the drink API's `filter.php` endpoint.
#[derive(Debug, Deserialize)]
pub struct DrinkListResponse {
    pub drinks: Option<Vec<DrinkSummary>>,
}

/// One drink row from a category filter.
#[derive(Debug, Clone, Deserialize)]
pub struct DrinkSummary {
    #[serde(rename = "idDrink")]
    pub id: String,
    #[serde(rename = "strDrink")]
    pub name: String,
    #[serde(rename = "strDrinkThumb")]
    pub thumb: String,
}
