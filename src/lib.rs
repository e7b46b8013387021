//! Storefront
//!
//! Storefront is the domain core of a small supplement shop: a product catalog
//! with search, filtering, sorting and pagination, a variant-aware shopping
//! cart, checkout into an order sink, and role-based route guarding.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod money;
pub mod prelude;
pub mod products;
pub mod render;
pub mod storefront;
pub mod tags;
