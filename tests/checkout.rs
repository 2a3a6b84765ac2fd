//! Checkout from the cart and direct purchases.

use storefront::{
    AssetMap, Catalog, Checkout, CheckoutSource, Config, DirectPurchase, StoreError, Storefront,
    Theme,
};

fn store() -> Storefront {
    Storefront::from_config(&Config::default()).unwrap()
}

fn cart_ids(store: &Storefront) -> Vec<String> {
    store.cart().items().iter().map(|i| i.id().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Cart checkout
// ---------------------------------------------------------------------------

#[test]
fn cart_checkout_lists_selected_lines() {
    let mut store = store();
    store.add_to_cart_by_id("1", 1);
    store.add_to_cart_by_id("2", 2);
    store.add_to_cart_by_id("3", 1);
    store.cart_mut().toggle_select("2");

    let checkout = store.begin_checkout();
    assert!(!checkout.is_direct());
    let lines: Vec<String> = store
        .checkout_lines(&checkout)
        .iter()
        .map(|l| l.id().to_string())
        .collect();
    assert_eq!(lines, ["1", "3"]);
    assert_eq!(store.checkout_total(&checkout), 55000 + 8990);
}

#[test]
fn confirming_cart_checkout_removes_ordered_lines() {
    let mut store = store();
    store.add_to_cart_by_id("1", 1);
    store.add_to_cart_by_id("2", 2);
    store.cart_mut().toggle_select("2");

    let checkout = store.begin_checkout();
    let receipt = store.place_order(checkout).unwrap();
    assert_eq!(receipt.total, 55000);
    assert!(!receipt.direct);
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(cart_ids(&store), ["2"]);
    assert_eq!(store.cart().get("2").unwrap().quantity, 2);
}

#[test]
fn cart_checkout_quantity_goes_through_cart() {
    let mut store = store();
    store.add_to_cart_by_id("4", 1);
    let mut checkout = store.begin_checkout();

    store.adjust_checkout_quantity(&mut checkout, "4", 1);
    assert_eq!(store.cart().get("4").unwrap().quantity, 2);
    assert_eq!(store.checkout_total(&checkout), 4900);

    store.adjust_checkout_quantity(&mut checkout, "4", -2);
    assert!(store.cart().is_empty());
    assert!(store.checkout_lines(&checkout).is_empty());
}

#[test]
fn empty_checkout_cannot_be_confirmed() {
    let mut store = store();
    store.add_to_cart_by_id("1", 1);
    store.cart_mut().toggle_all(false);

    let checkout = store.begin_checkout();
    assert!(matches!(
        store.place_order(checkout),
        Err(StoreError::EmptyCheckout)
    ));
    assert_eq!(cart_ids(&store), ["1"]);
}

// ---------------------------------------------------------------------------
// Direct purchase
// ---------------------------------------------------------------------------

#[test]
fn direct_purchase_is_a_single_synthetic_line() {
    let store = store();
    let checkout = store.buy_now("3", 2);
    assert_eq!(
        checkout.source(),
        &CheckoutSource::Direct(DirectPurchase::new("3", 2))
    );

    let lines = store.checkout_lines(&checkout);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id(), "3");
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(store.checkout_total(&checkout), 2 * 8990);
}

#[test]
fn direct_purchase_never_touches_cart() {
    let mut store = store();
    store.add_to_cart_by_id("1", 1);
    store.add_to_cart_by_id("3", 4);
    let before = store.cart().items().to_vec();

    let mut checkout = store.buy_now("3", 2);
    store.adjust_checkout_quantity(&mut checkout, "3", 1);
    assert_eq!(store.cart().items(), &before[..]);
    assert_eq!(store.checkout_lines(&checkout)[0].quantity, 3);

    let receipt = store.place_order(checkout).unwrap();
    assert!(receipt.direct);
    assert_eq!(receipt.total, 3 * 8990);
    assert_eq!(store.cart().items(), &before[..]);
}

#[test]
fn direct_quantity_floor_is_one() {
    let mut store = store();
    assert_eq!(DirectPurchase::new("3", 0).quantity, 1);

    let mut checkout = store.buy_now("3", 1);
    store.adjust_checkout_quantity(&mut checkout, "3", -1);
    store.adjust_checkout_quantity(&mut checkout, "3", -5);
    assert_eq!(store.checkout_lines(&checkout)[0].quantity, 1);
}

#[test]
fn direct_purchase_of_unknown_product_is_empty() {
    let mut store = store();
    let checkout = store.buy_now("missing", 1);
    assert!(store.checkout_lines(&checkout).is_empty());
    assert_eq!(store.checkout_total(&checkout), 0);
    assert!(matches!(
        store.place_order(checkout),
        Err(StoreError::EmptyCheckout)
    ));
}

#[test]
fn checkout_works_against_plain_catalog_and_cart() {
    let catalog = Catalog::builtin().unwrap();
    let mut cart = storefront::Cart::new();
    cart.add_to_cart(catalog.find_product("9").unwrap(), 1);

    let checkout = Checkout::from_cart();
    let receipt = checkout.confirm(&catalog, &mut cart).unwrap();
    assert_eq!(receipt.total, 5200);
    assert!(cart.is_empty());
}

// ---------------------------------------------------------------------------
// Session container
// ---------------------------------------------------------------------------

#[test]
fn add_by_unknown_id_is_ignored() {
    let mut store = store();
    assert!(!store.add_to_cart_by_id("nope", 1));
    assert!(store.cart().is_empty());
    assert!(store.add_to_cart_by_id("4", 0));
    assert_eq!(store.cart().get("4").unwrap().quantity, 1);
}

#[test]
fn theme_toggles_back_and_forth() {
    let catalog = Catalog::builtin().unwrap();
    let assets = AssetMap::for_catalog(&catalog, "img");
    let mut store = Storefront::new(catalog, assets, Theme::Dark);
    store.toggle_theme();
    assert_eq!(store.theme(), Theme::Light);
    store.toggle_theme();
    assert!(store.theme().is_dark());
}
