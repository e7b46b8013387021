//! Storefront CLI
//!
//! Browse a fixture catalog, build a cart and place orders from the terminal.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront::{
    auth::{AuthState, Identity},
    cart::{Cart, snapshot::CartSnapshot},
    catalog::{CategoryFilter, ShopView, categories},
    checkout::{MemoryOrderBook, ShippingDetails},
    fixtures::CatalogFixture,
    render::{write_cart, write_categories, write_page},
    storefront::Storefront,
};

use crate::config::{CartArgs, Command, Config};

mod config;
mod request;

type Store = Storefront<'static, MemoryOrderBook<'static>>;

/// Storefront CLI entry point
fn main() -> Result<()> {
    // Load configuration from .env and CLI arguments
    let config = Config::load().unwrap_or_else(|err| err.exit());

    // Initialize logging; tables go to stdout, events to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let catalog = CatalogFixture::load(&config.fixtures, &config.catalog)?.catalog()?;

    info!(
        catalog = %config.catalog,
        products = catalog.products().len(),
        currency = catalog.currency().iso_alpha_code,
        "loaded catalog"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.command {
        Command::Browse {
            search,
            category,
            sort,
            page,
        } => {
            let mut view = ShopView::new(config.page_size);

            view.on_catalog_change(catalog.products());

            let state = view.state_mut();

            state.set_search_term(search);
            state.set_category(CategoryFilter::from_selection(&category));
            state.set_sort(sort);
            state.set_page(page);

            write_page(&mut out, &view.page())?;
        }
        Command::Categories => {
            write_categories(&mut out, &categories(catalog.products()))?;
        }
        Command::Cart { cart, save } => {
            let mut store = Storefront::new(catalog, MemoryOrderBook::new());

            fill_cart(&mut store, cart)?;

            if let Some(path) = save {
                save_cart(store.cart(), &path)?;
            }

            write_cart(&mut out, store.cart())?;
        }
        Command::Checkout {
            cart,
            name,
            phone,
            address,
            uid,
            email,
        } => {
            let mut store = Storefront::new(catalog, MemoryOrderBook::new());

            fill_cart(&mut store, cart)?;
            write_cart(&mut out, store.cart())?;

            store.set_auth(match uid {
                Some(uid) => {
                    let identity = Identity::new(uid);

                    AuthState::SignedIn(match email {
                        Some(email) => identity.with_email(email),
                        None => identity,
                    })
                }
                None => AuthState::SignedOut,
            });

            let confirmation = store.place_order(ShippingDetails::new(name, phone, address))?;

            writeln!(
                out,
                " Placed {} for {} ({} items)\n",
                confirmation.order_id, confirmation.total, confirmation.item_count
            )?;
        }
    }

    Ok(())
}

fn fill_cart(store: &mut Store, args: CartArgs) -> Result<()> {
    if let Some(path) = args.load {
        let snapshot = CartSnapshot::from_yaml(&fs::read_to_string(path)?)?;

        *store.cart_mut() = Cart::restore(snapshot)?;
    }

    for request in args.add {
        store.add_to_cart(&request.product_id, request.variant, request.quantity)?;
    }

    Ok(())
}

fn save_cart(cart: &Cart<'_>, path: &Path) -> Result<()> {
    fs::write(path, cart.snapshot().to_yaml()?)?;

    info!(path = %path.display(), lines = cart.len(), "saved cart");

    Ok(())
}
