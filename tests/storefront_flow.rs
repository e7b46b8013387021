//! End-to-end shopping flow over the bundled supplements fixture: identity
//! resolution and route guarding, validated cart requests and checkout.

use std::path::PathBuf;

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use storefront::{
    auth::{AdminStatus, AuthState, Identity, Role, Route, RouteDecision},
    cart::Variant,
    checkout::{CheckoutError, Customer, MemoryOrderBook, OrderStatus, ShippingDetails},
    fixtures::CatalogFixture,
    products::{Product, ProductId},
    storefront::{Storefront, StorefrontError},
};

type Store = Storefront<'static, MemoryOrderBook<'static>>;

fn store() -> TestResult<Store> {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let catalog = CatalogFixture::load(fixtures, "supplements")?.catalog()?;

    Ok(Storefront::new(catalog, MemoryOrderBook::new()))
}

#[test]
fn admin_status_is_unknown_until_identity_resolves() -> TestResult {
    let mut store = store()?;

    assert_eq!(store.admin_status(), AdminStatus::Pending);
    assert_eq!(store.admin_status().resolved(), None);
    assert_eq!(store.guard(Route::Admin), RouteDecision::Loading);

    store.set_auth(AuthState::SignedIn(Identity::new("shopper")));

    assert_eq!(store.admin_status().resolved(), Some(false));
    assert_eq!(store.guard(Route::Admin), RouteDecision::Redirect(Route::Home));
    assert_eq!(store.guard(Route::Login), RouteDecision::Redirect(Route::Home));
    assert_eq!(store.guard(Route::Shop), RouteDecision::Render);

    store.set_auth(AuthState::SignedIn(Identity::new("owner").with_role(Role::Admin)));

    assert_eq!(store.admin_status().resolved(), Some(true));
    assert_eq!(store.guard(Route::Admin), RouteDecision::Render);
    assert_eq!(store.guard(Route::Signup), RouteDecision::Redirect(Route::Admin));

    Ok(())
}

#[test]
fn signed_in_shopper_places_an_order() -> TestResult {
    let mut store = store()?;
    let whey = ProductId::from("static-1");
    let creatine = ProductId::from("static-5");

    store.set_auth(AuthState::SignedIn(
        Identity::new("u-42").with_email("ada@example.com"),
    ));

    store.add_to_cart(&whey, Variant::new(Some("Chocolate"), Some("5lb")), 2)?;
    store.add_to_cart(&whey, Variant::new(Some("Chocolate"), Some("5lb")), 1)?;
    store.add_to_cart(&whey, Variant::new(Some("Vanilla"), Some("2lb")), 1)?;
    store.add_to_cart(&creatine, Variant::size("1kg"), 2)?;

    assert_eq!(store.cart().len(), 3);
    assert_eq!(store.cart().item_count(), 6);

    let confirmation = store.place_order(ShippingDetails::new(
        "  Ada Lovelace ",
        "555-0100",
        "1 Analytical Way",
    ))?;

    // 4 x 59.99 + 2 x 29.99
    assert_eq!(confirmation.total, Money::from_minor(29_994, USD));
    assert_eq!(confirmation.item_count, 6);
    assert!(store.cart().is_empty());

    let order = store
        .orders()
        .get(confirmation.order_id)
        .ok_or("Expected stored order")?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.shipping.full_name, "Ada Lovelace");
    assert_eq!(
        order.customer,
        Customer::Account {
            uid: "u-42".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    );

    Ok(())
}

#[test]
fn invalid_requests_leave_the_cart_alone() -> TestResult {
    let mut store = store()?;
    let whey = ProductId::from("static-1");

    assert_eq!(
        store.add_to_cart(&whey, Variant::flavor("Pickle"), 1),
        Err(StorefrontError::UnavailableVariant(
            whey.clone(),
            Variant::flavor("Pickle")
        ))
    );
    assert_eq!(
        store.add_to_cart(&ProductId::from("static-99"), Variant::default(), 1),
        Err(StorefrontError::UnknownProduct(ProductId::from("static-99")))
    );
    assert!(store.cart().is_empty());

    store.set_auth(AuthState::SignedOut);

    assert_eq!(
        store.place_order(ShippingDetails::new("Ada", "555-0100", "1 Analytical Way")),
        Err(CheckoutError::EmptyCart)
    );

    store.add_to_cart(&whey, Variant::flavor("Vanilla"), 1)?;

    assert_eq!(
        store.place_order(ShippingDetails::new("Ada", "", "1 Analytical Way")),
        Err(CheckoutError::MissingField("phone_number"))
    );
    assert_eq!(store.cart().item_count(), 1);
    assert!(store.orders().is_empty());

    Ok(())
}

#[test]
fn admin_manages_products_and_orders() -> TestResult {
    let mut store = store()?;
    let creatine = ProductId::from("static-5");
    let shipping = || ShippingDetails::new("Ada", "555-0100", "1 Analytical Way");

    store.set_auth(AuthState::SignedIn(Identity::new("u-1")));
    store.add_to_cart(&creatine, Variant::size("1kg"), 1)?;
    let first = store.place_order(shipping())?.order_id;

    store.set_auth(AuthState::SignedIn(Identity::new("u-2")));
    store.add_to_cart(&creatine, Variant::size("1kg"), 2)?;
    store.place_order(shipping())?;

    assert_eq!(store.order_history().len(), 1);
    assert_eq!(
        store.set_order_status(first, OrderStatus::Shipped),
        Err(StorefrontError::NotAdmin)
    );

    store.set_auth(AuthState::SignedIn(Identity::new("owner").with_role(Role::Admin)));

    assert_eq!(store.all_orders()?.len(), 2);

    store.set_order_status(first, OrderStatus::Delivered)?;
    store.upsert_product(
        Product::new("live-1", "Pre-Workout", Money::from_minor(3499, USD))
            .with_category("Pre-Workout"),
    )?;

    assert_eq!(
        store.catalog().products().first().map(|p| p.id.as_str()),
        Some("live-1")
    );

    store.set_auth(AuthState::SignedIn(Identity::new("u-1")));

    let history = store.order_history();
    let (_, order) = history.first().ok_or("Expected an order for u-1")?;

    assert_eq!(history.len(), 1);
    assert_eq!(order.status, OrderStatus::Delivered);

    Ok(())
}
