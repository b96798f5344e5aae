//! Integration tests for state surviving a restart.
//!
//! Every store writes through to flat JSON files, so rebuilding the
//! application state over the same directory must restore session,
//! basket, and order history.

use rust_decimal::Decimal;

use foodflame_core::ItemId;
use foodflame_integration_tests::TestContext;
use foodflame_storefront::models::{Category, FoodItem, NewAddress};
use foodflame_storefront::services::{CheckoutService, DeliveryAddress};

fn food(id: &str, price: Decimal) -> FoodItem {
    FoodItem {
        id: ItemId::new(id),
        name: format!("Item {id}"),
        description: "test dish".to_owned(),
        price,
        image: String::new(),
        category: Category::Burgers,
        rating: 4.0,
        prep_time: "10-15 min".to_owned(),
    }
}

#[test]
fn test_session_survives_restart() {
    let mut ctx = TestContext::new();
    ctx.state
        .accounts()
        .register("ann@example.com", "hunter2", "Ann", "q", "a")
        .expect("registration should succeed");

    ctx.restart();
    let user = ctx
        .state
        .accounts()
        .current_user()
        .expect("session should be restored");
    assert_eq!(user.email.as_str(), "ann@example.com");

    ctx.state.accounts().logout().expect("logout should succeed");
    ctx.restart();
    assert!(ctx.state.accounts().current_user().is_none());
}

#[test]
fn test_basket_survives_restart() {
    let mut ctx = TestContext::new();
    ctx.state
        .cart()
        .add_item(&food("b1", Decimal::new(1199, 2)))
        .expect("add should succeed");
    ctx.state
        .cart()
        .update_quantity(&ItemId::new("b1"), 2)
        .expect("update should succeed");

    ctx.restart();
    assert_eq!(ctx.state.cart().item_count(), 2);
    assert_eq!(ctx.state.cart().total(), Decimal::new(2398, 2));
}

#[test]
fn test_order_history_survives_restart() {
    let mut ctx = TestContext::new();
    ctx.state
        .accounts()
        .register("ann@example.com", "hunter2", "Ann", "q", "a")
        .expect("registration should succeed");
    ctx.state
        .cart()
        .add_item(&food("b1", Decimal::from(10)))
        .expect("add should succeed");

    let order = CheckoutService::new(
        ctx.state.accounts(),
        ctx.state.cart(),
        ctx.notifier.clone(),
    )
    .place_order(DeliveryAddress::New {
        address: NewAddress {
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
        },
        save: false,
    })
    .expect("checkout should succeed");

    ctx.restart();
    let user = ctx
        .state
        .accounts()
        .current_user()
        .expect("session should be restored");
    assert_eq!(user.orders.len(), 1);
    let persisted = user.orders.first().expect("order should be restored");
    assert_eq!(persisted.id, order.id);
    assert_eq!(persisted.total, order.total);
    assert!(ctx.state.cart().items().is_empty());
}

#[test]
fn test_logging_in_again_sees_profile_changes() {
    let mut ctx = TestContext::new();
    ctx.state
        .accounts()
        .register("ann@example.com", "hunter2", "Ann", "q", "a")
        .expect("registration should succeed");
    ctx.state
        .accounts()
        .add_address(NewAddress {
            street: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
        })
        .expect("add address should succeed");
    ctx.state.accounts().logout().expect("logout should succeed");

    ctx.restart();
    let user = ctx
        .state
        .accounts()
        .authenticate("ann@example.com", "hunter2")
        .expect("login should succeed");
    assert_eq!(user.addresses.len(), 1);
    assert!(user.addresses.iter().all(|a| a.is_default));
}
