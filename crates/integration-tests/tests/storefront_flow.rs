//! Integration tests for the main storefront journeys.
//!
//! Everything runs against a throwaway data directory. Provider URLs are
//! unroutable, so menu assembly exercises the fallback path.

use rust_decimal::Decimal;

use foodflame_core::ItemId;
use foodflame_integration_tests::TestContext;
use foodflame_storefront::catalog::MenuFilter;
use foodflame_storefront::models::{Category, FoodItem, NewAddress};
use foodflame_storefront::services::{CheckoutService, DeliveryAddress};
use foodflame_storefront::stores::AccountError;

fn food(id: &str, price: Decimal) -> FoodItem {
    FoodItem {
        id: ItemId::new(id),
        name: format!("Item {id}"),
        description: "test dish".to_owned(),
        price,
        image: String::new(),
        category: Category::Pizza,
        rating: 4.5,
        prep_time: "15-20 min".to_owned(),
    }
}

fn address(street: &str) -> NewAddress {
    NewAddress {
        street: street.to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62701".to_owned(),
    }
}

// ============================================================================
// Account Journeys
// ============================================================================

#[test]
fn test_register_logout_login_journey() {
    let ctx = TestContext::new();
    let accounts = ctx.state.accounts();

    let user = accounts
        .register("ann@example.com", "hunter2", "Ann", "First pet?", "Rex")
        .expect("registration should succeed");
    assert_eq!(user.name, "Ann");
    assert!(accounts.current_user().is_some());

    accounts.logout().expect("logout should succeed");
    assert!(accounts.current_user().is_none());

    // Wrong password, then the right one
    assert!(matches!(
        accounts.authenticate("ann@example.com", "wrong"),
        Err(AccountError::InvalidCredentials)
    ));
    let user = accounts
        .authenticate("ann@example.com", "hunter2")
        .expect("login should succeed");
    assert_eq!(user.email.as_str(), "ann@example.com");
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let ctx = TestContext::new();
    let accounts = ctx.state.accounts();

    accounts
        .register("ann@example.com", "hunter2", "Ann", "First pet?", "Rex")
        .expect("first registration should succeed");
    assert!(matches!(
        accounts.register("ann@example.com", "other", "Imposter", "q", "a"),
        Err(AccountError::DuplicateAccount)
    ));
}

#[test]
fn test_password_recovery_journey() {
    let ctx = TestContext::new();
    let accounts = ctx.state.accounts();
    accounts
        .register("ann@example.com", "hunter2", "Ann", "First pet?", "Rex")
        .expect("registration should succeed");
    accounts.logout().expect("logout should succeed");

    assert!(matches!(
        accounts.recover_password("ghost@example.com", "Rex"),
        Err(AccountError::AccountNotFound)
    ));
    assert!(matches!(
        accounts.recover_password("ann@example.com", "Fido"),
        Err(AccountError::SecurityAnswerMismatch)
    ));

    // The stored answer was normalized, so case and padding do not matter
    let password = accounts
        .recover_password("ann@example.com", "  REX ")
        .expect("recovery should succeed");
    assert_eq!(password, "hunter2");
}

// ============================================================================
// Basket Journeys
// ============================================================================

#[test]
fn test_basket_merge_and_quantity_journey() {
    let ctx = TestContext::new();
    let cart = ctx.state.cart();
    let item = food("p1", Decimal::from(10));

    cart.add_item(&item).expect("add should succeed");
    cart.add_item(&item).expect("second add should succeed");
    cart.update_quantity(&item.id, 3).expect("update should succeed");

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::from(30));
}

#[test]
fn test_basket_survives_login_and_logout() {
    let ctx = TestContext::new();
    ctx.state
        .cart()
        .add_item(&food("p1", Decimal::from(10)))
        .expect("add should succeed");

    ctx.state
        .accounts()
        .register("ann@example.com", "hunter2", "Ann", "q", "a")
        .expect("registration should succeed");
    ctx.state.accounts().logout().expect("logout should succeed");

    assert_eq!(ctx.state.cart().item_count(), 1);
}

// ============================================================================
// Checkout Journey
// ============================================================================

#[test]
fn test_full_checkout_journey() {
    let ctx = TestContext::new();
    ctx.state
        .accounts()
        .register("ann@example.com", "hunter2", "Ann", "q", "a")
        .expect("registration should succeed");
    ctx.state
        .cart()
        .add_item(&food("p1", Decimal::from(10)))
        .expect("add should succeed");
    ctx.state
        .cart()
        .update_quantity(&ItemId::new("p1"), 3)
        .expect("update should succeed");

    let service = CheckoutService::new(
        ctx.state.accounts(),
        ctx.state.cart(),
        ctx.notifier.clone(),
    );
    let order = service
        .place_order(DeliveryAddress::New {
            address: address("1 Main St"),
            save: true,
        })
        .expect("checkout should succeed");

    // 30 + 2.99 delivery + 8% tax
    assert_eq!(order.total, Decimal::new(3539, 2));
    assert!(ctx.state.cart().items().is_empty());

    let user = ctx
        .state
        .accounts()
        .current_user()
        .expect("session should survive checkout");
    assert_eq!(user.orders.len(), 1);
    assert_eq!(user.addresses.len(), 1);
    assert!(user.addresses.iter().any(|a| a.is_default));
}

// ============================================================================
// Menu Fallback
// ============================================================================

#[tokio::test]
async fn test_menu_falls_back_when_providers_unreachable() {
    let ctx = TestContext::new();

    let menu = ctx.state.menu().fetch_menu().await;
    assert!(!menu.is_empty());

    // The fallback list still supports category filtering
    let pizzas = MenuFilter::by_category(Category::Pizza).apply(&menu);
    assert!(!pizzas.is_empty());

    let batch = ctx.state.menu().load_more(2).await;
    assert!(batch.is_some());
    assert!(ctx.state.menu().load_more(5).await.is_none());
}
