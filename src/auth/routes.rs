//! Route gating
//!
//! Decides, for a route and the current auth state, whether to show a loading
//! view, render the route, or redirect elsewhere.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::identity::{AdminStatus, AuthState, is_admin};

/// Error returned when parsing an unknown route path.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(String);

/// Storefront routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,

    /// `/shop`
    Shop,

    /// `/about`
    About,

    /// `/contact`
    Contact,

    /// `/login`
    Login,

    /// `/signup`
    Signup,

    /// `/admin`, restricted to admins
    Admin,

    /// `/user`
    User,
}

impl Route {
    /// URL path of the route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Shop => "/shop",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Admin => "/admin",
            Route::User => "/user",
        }
    }

    /// Check whether this is a sign-in or sign-up page.
    pub fn is_auth_page(self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/" | "" => Ok(Route::Home),
            "/shop" => Ok(Route::Shop),
            "/about" => Ok(Route::About),
            "/contact" => Ok(Route::Contact),
            "/login" => Ok(Route::Login),
            "/signup" => Ok(Route::Signup),
            "/admin" => Ok(Route::Admin),
            "/user" => Ok(Route::User),
            other => Err(UnknownRoute(other.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the router should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Identity is unresolved; show a neutral loading view.
    Loading,

    /// Render the requested route.
    Render,

    /// Navigate to another route instead, replacing history.
    Redirect(Route),
}

/// Decide how to handle a visit to `route`.
pub fn guard(route: Route, auth: &AuthState) -> RouteDecision {
    let admin = is_admin(auth);

    let decision = match (route, admin) {
        (_, AdminStatus::Pending) => RouteDecision::Loading,
        (Route::Admin, AdminStatus::Admin) => RouteDecision::Render,
        (Route::Admin, AdminStatus::NotAdmin) => {
            warn!(uid = auth.identity().map(|identity| identity.uid.as_str()), "admin access denied");

            RouteDecision::Redirect(Route::Home)
        }
        (route, AdminStatus::Admin) if route.is_auth_page() => RouteDecision::Redirect(Route::Admin),
        (route, AdminStatus::NotAdmin) if route.is_auth_page() && auth.identity().is_some() => {
            RouteDecision::Redirect(Route::Home)
        }
        (Route::User, AdminStatus::NotAdmin) if auth.identity().is_none() => {
            RouteDecision::Redirect(Route::Login)
        }
        _ => RouteDecision::Render,
    };

    debug!(%route, ?decision, "route guarded");

    decision
}
