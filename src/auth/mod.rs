//! Auth
//!
//! Claims-based admin checks and route gating. Identity resolution itself is
//! done by an external provider; this module only interprets its result.

pub mod identity;
pub mod routes;

pub use identity::{AdminStatus, AuthState, Identity, Role, is_admin};
pub use routes::{Route, RouteDecision, UnknownRoute, guard};
