//! Integration tests for the catalog query pipeline, the live/static catalog
//! source and the shop view, against both hand-built products and the bundled
//! supplements fixture.

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use storefront::{
    catalog::{Catalog, CategoryFilter, QueryState, ShopView, SortKey, query},
    fixtures::CatalogFixture,
    products::Product,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn abc() -> Vec<Product<'static>> {
    vec![
        Product::new("a", "A", Money::from_minor(3000, USD)),
        Product::new("b", "B", Money::from_minor(1000, USD)),
        Product::new("c", "C", Money::from_minor(2000, USD)),
    ]
}

fn names(products: &[&Product<'_>]) -> Vec<String> {
    products.iter().map(|product| product.name.clone()).collect()
}

#[test]
fn price_low_pages_are_deterministic() {
    let products = abc();
    let mut state = QueryState::default();

    state.set_sort(SortKey::PriceLow);

    let pages: Vec<Vec<String>> = (1..=3)
        .map(|number| {
            state.set_page(number);

            names(query(&products, &state, 2).items())
        })
        .collect();

    assert_eq!(
        pages,
        vec![
            vec!["B".to_string(), "C".to_string()],
            vec!["A".to_string()],
            Vec::<String>::new(),
        ]
    );
}

#[test]
fn search_is_case_insensitive() {
    let products = vec![
        Product::new("w", "Whey Protein Isolate", Money::from_minor(5999, USD)),
        Product::new("c", "Creatine", Money::from_minor(2999, USD)),
    ];
    let mut state = QueryState::default();

    state.set_search_term("whey");

    assert_eq!(names(query(&products, &state, 10).items()), vec!["Whey Protein Isolate"]);

    state.set_search_term("WHEY");

    assert_eq!(query(&products, &state, 10).len(), 1);
}

#[test]
fn changing_category_resets_page() {
    let mut state = QueryState::default();

    state.set_page(3);
    state.set_category(CategoryFilter::from_selection("Protein"));

    assert_eq!(state.page(), 1);
}

#[test]
fn fixture_catalog_filters_and_sorts() -> TestResult {
    let catalog = CatalogFixture::load(fixtures_dir(), "supplements")?.catalog()?;
    let mut state = QueryState::default();

    state.set_category(CategoryFilter::from_selection("Creatine"));
    state.set_sort(SortKey::PriceHigh);

    let page = query(catalog.products(), &state, 10);
    let ids: Vec<&str> = page.iter().map(|product| product.id.as_str()).collect();

    assert_eq!(ids, vec!["static-6", "static-5"]);

    state.set_category(CategoryFilter::All);
    state.set_sort(SortKey::Rating);

    let top = query(catalog.products(), &state, 1);

    assert_eq!(top.iter().map(|product| product.rating).next(), Some(Decimal::new(49, 1)));
    assert_eq!(top.total_pages(), catalog.products().len());

    Ok(())
}

#[test]
fn fixture_catalog_categories_in_first_seen_order() -> TestResult {
    let fixture = CatalogFixture::load(fixtures_dir(), "supplements")?;
    let view = {
        let mut view = ShopView::new(5);

        view.on_catalog_change(fixture.products());

        view
    };

    assert_eq!(
        view.categories(),
        vec![
            "all",
            "Protein",
            "Mass Gainer",
            "Creatine",
            "Pre-Workout",
            "Accessories",
            "Vitamins"
        ]
    );

    Ok(())
}

#[test]
fn live_snapshot_drives_subscribed_view() -> TestResult {
    let mut catalog = CatalogFixture::load(fixtures_dir(), "supplements")?.catalog()?;
    let static_count = catalog.products().len();
    let view = Rc::new(RefCell::new(ShopView::default()));

    let listener_view = Rc::clone(&view);
    let key = catalog.subscribe(move |products| listener_view.borrow_mut().on_catalog_change(products));

    assert_eq!(view.borrow().products().len(), static_count);

    view.borrow_mut().state_mut().set_page(2);

    catalog.publish(vec![
        Product::new("live-1", "Live Whey", Money::from_minor(4500, USD)).with_category("Protein"),
    ])?;

    {
        let view = view.borrow();

        assert_eq!(view.state().page(), 1);
        assert_eq!(view.products().len(), static_count + 1);
        assert_eq!(
            view.page().iter().next().map(|product| product.id.as_str()),
            Some("live-1")
        );
    }

    catalog.publish_error("permission denied");

    assert_eq!(view.borrow().products().len(), static_count);
    assert_eq!(catalog.last_error(), Some("permission denied"));
    assert!(catalog.unsubscribe(key));

    Ok(())
}
