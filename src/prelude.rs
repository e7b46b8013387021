//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AdminStatus, AuthState, Identity, Role, Route, RouteDecision, guard, is_admin},
    cart::{
        Cart, LineItem, Variant,
        snapshot::{CartSnapshot, SnapshotError},
    },
    catalog::{
        Catalog, CatalogError, CategoryFilter, Page, QueryState, ShopView, SortKey,
        SubscriptionKey, categories, query,
    },
    checkout::{
        CheckoutError, Confirmation, Customer, MemoryOrderBook, Order, OrderId, OrderSink,
        OrderStatus, ShippingDetails, UnknownOrder, checkout,
    },
    fixtures::{CatalogFixture, FixtureError},
    products::{Product, ProductId, StockLevel},
    render::{RenderError, write_cart, write_categories, write_page},
    storefront::{Storefront, StorefrontError},
    tags::StringTagCollection,
};
