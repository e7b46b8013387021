//! Storefront
//!
//! An explicitly constructed context that bundles the catalog, the cart, the
//! current auth state and the order sink, so views receive one object instead
//! of reaching for globals. It is also the validating layer in front of the
//! cart.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    auth::{AdminStatus, AuthState, Route, RouteDecision, guard, is_admin},
    cart::{Cart, Variant},
    catalog::{Catalog, CatalogError},
    checkout::{
        CheckoutError, Confirmation, MemoryOrderBook, Order, OrderId, OrderSink, OrderStatus,
        ShippingDetails, UnknownOrder, checkout,
    },
    products::{Product, ProductId},
};

/// Errors raised while validating a cart request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// The product is not in the catalog.
    #[error("Product {0} not found")]
    UnknownProduct(ProductId),

    /// The product is priced in a different currency from the cart (product id, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The product does not offer the requested flavor or size.
    #[error("Product {0} is not available as {1}")]
    UnavailableVariant(ProductId, Variant),

    /// A quantity of zero was requested.
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    /// An admin operation was attempted without a resolved admin identity.
    #[error("Admin access required")]
    NotAdmin,

    /// The catalog refused a product.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No stored order has the given id.
    #[error(transparent)]
    UnknownOrder(#[from] UnknownOrder),
}

/// Storefront
#[derive(Debug)]
pub struct Storefront<'a, S> {
    catalog: Catalog<'a>,
    cart: Cart<'a>,
    auth: AuthState,
    orders: S,
}

impl<'a, S: OrderSink<'a>> Storefront<'a, S> {
    /// Create a storefront with an empty cart in the catalog currency and an
    /// unresolved identity.
    pub fn new(catalog: Catalog<'a>, orders: S) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            cart,
            auth: AuthState::Loading,
            orders,
        }
    }

    /// The product catalog.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Mutable access to the catalog, for publishing snapshots and subscribing.
    pub fn catalog_mut(&mut self) -> &mut Catalog<'a> {
        &mut self.catalog
    }

    /// The cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Mutable access to the cart, for quantity updates and removals.
    pub fn cart_mut(&mut self) -> &mut Cart<'a> {
        &mut self.cart
    }

    /// The current auth state.
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Record a change in identity resolution.
    pub fn set_auth(&mut self, auth: AuthState) {
        self.auth = auth;
    }

    /// The order sink.
    pub fn orders(&self) -> &S {
        &self.orders
    }

    /// Admin status of the current identity.
    pub fn admin_status(&self) -> AdminStatus {
        is_admin(&self.auth)
    }

    /// Route decision for the current identity.
    pub fn guard(&self, route: Route) -> RouteDecision {
        guard(route, &self.auth)
    }

    /// Validate a request and add it to the cart.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::ZeroQuantity`]: `quantity` is zero.
    /// - [`StorefrontError::UnknownProduct`]: no visible product has this id.
    /// - [`StorefrontError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`StorefrontError::UnavailableVariant`]: the product does not offer the variant.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        variant: Variant,
        quantity: u32,
    ) -> Result<(), StorefrontError> {
        if quantity == 0 {
            return Err(StorefrontError::ZeroQuantity);
        }

        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| StorefrontError::UnknownProduct(product_id.clone()))?;

        let product_currency = product.price.currency();

        if product_currency != self.cart.currency() {
            return Err(StorefrontError::CurrencyMismatch(
                product_id.clone(),
                product_currency.iso_alpha_code,
                self.cart.currency().iso_alpha_code,
            ));
        }

        if !product.offers(&variant) {
            return Err(StorefrontError::UnavailableVariant(product_id.clone(), variant));
        }

        debug!(product = %product_id, %variant, quantity, "validated cart request");

        self.cart.add_item(product, variant, quantity);

        Ok(())
    }

    /// Place an order for the cart's contents.
    ///
    /// # Errors
    ///
    /// See [`checkout`].
    pub fn place_order(
        &mut self,
        shipping: ShippingDetails,
    ) -> Result<Confirmation<'a>, CheckoutError> {
        checkout(&mut self.cart, &self.auth, shipping, &mut self.orders)
    }

    /// Add or replace a live product.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotAdmin`]: the current identity is not a resolved admin.
    /// - [`StorefrontError::Catalog`]: the product is priced in another currency.
    pub fn upsert_product(&mut self, product: Product<'a>) -> Result<(), StorefrontError> {
        self.require_admin()?;

        Ok(self.catalog.upsert_product(product)?)
    }

    /// Delete a live product. Returns `false` if no live product has this id.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAdmin`] unless the current identity is a resolved admin.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<bool, StorefrontError> {
        self.require_admin()?;

        Ok(self.catalog.remove_product(id))
    }

    fn require_admin(&self) -> Result<(), StorefrontError> {
        match self.admin_status() {
            AdminStatus::Admin => Ok(()),
            AdminStatus::NotAdmin | AdminStatus::Pending => {
                warn!(auth = ?self.auth, "admin operation refused");

                Err(StorefrontError::NotAdmin)
            }
        }
    }
}

impl<'a> Storefront<'a, MemoryOrderBook<'a>> {
    /// The signed-in shopper's own orders, in the order they were placed.
    /// Empty while signed out or still resolving.
    pub fn order_history(&self) -> Vec<(OrderId, &Order<'a>)> {
        match self.auth.identity() {
            Some(identity) => self.orders.orders_for(&identity.uid).collect(),
            None => Vec::new(),
        }
    }

    /// Every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAdmin`] unless the current identity is a resolved admin.
    pub fn all_orders(&self) -> Result<Vec<(OrderId, &Order<'a>)>, StorefrontError> {
        self.require_admin()?;

        Ok(self.orders.recent())
    }

    /// Change an order's fulfilment status.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotAdmin`]: the current identity is not a resolved admin.
    /// - [`StorefrontError::UnknownOrder`]: no order has this id.
    pub fn set_order_status(
        &mut self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), StorefrontError> {
        self.require_admin()?;

        Ok(self.orders.set_status(id, status)?)
    }

    /// Delete an order and return it.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::NotAdmin`]: the current identity is not a resolved admin.
    /// - [`StorefrontError::UnknownOrder`]: no order has this id.
    pub fn delete_order(&mut self, id: OrderId) -> Result<Order<'a>, StorefrontError> {
        self.require_admin()?;

        self.orders
            .remove(id)
            .ok_or(StorefrontError::UnknownOrder(UnknownOrder(id)))
    }
}
