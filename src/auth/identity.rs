//! Identity and admin status

use std::fmt;

use smallvec::SmallVec;

/// Authorization claim carried by an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// May open the admin panel.
    Admin,

    /// A regular shopper.
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Customer => f.write_str("customer"),
        }
    }
}

/// A resolved, signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user id issued by the identity provider
    pub uid: String,

    /// Email address, if the provider shares it
    pub email: Option<String>,

    /// Display name
    pub display_name: Option<String>,

    /// Granted roles
    roles: SmallVec<[Role; 2]>,
}

impl Identity {
    /// Create an identity with no email and no roles.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            roles: SmallVec::new(),
        }
    }

    /// Set the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Grant a role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Check whether the identity holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Granted roles.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}

/// Where identity resolution currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The identity provider has not answered yet.
    #[default]
    Loading,

    /// Resolved: nobody is signed in.
    SignedOut,

    /// Resolved: someone is signed in.
    SignedIn(Identity),
}

impl AuthState {
    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::SignedIn(identity) => Some(identity),
            AuthState::Loading | AuthState::SignedOut => None,
        }
    }

    /// Check whether resolution is still pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}

/// Outcome of an admin check. `Pending` is neither admin nor guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    /// Identity resolution has not finished.
    Pending,

    /// The identity holds the admin claim.
    Admin,

    /// Signed out, or signed in without the admin claim.
    NotAdmin,
}

impl AdminStatus {
    /// Collapse to a boolean once resolved; `None` while pending.
    pub fn resolved(self) -> Option<bool> {
        match self {
            AdminStatus::Pending => None,
            AdminStatus::Admin => Some(true),
            AdminStatus::NotAdmin => Some(false),
        }
    }
}

/// Decide admin status from the identity's role claims.
pub fn is_admin(auth: &AuthState) -> AdminStatus {
    match auth {
        AuthState::Loading => AdminStatus::Pending,
        AuthState::SignedIn(identity) if identity.has_role(Role::Admin) => AdminStatus::Admin,
        AuthState::SignedIn(_) | AuthState::SignedOut => AdminStatus::NotAdmin,
    }
}
