// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session and role-based access control.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};

/// Path prefix of the administrator views.
pub const ADMIN_AREA_PREFIX: &str = "/admin";

/// Path prefix of the contractor views.
pub const CONTRACTOR_AREA_PREFIX: &str = "/contractor";

/// User roles issued by the authentication provider.
///
/// A user may hold several roles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrator: manages tenders and reads reports.
    ///
    /// Admins may:
    /// - create, edit and delete tenders
    /// - read the tender counts
    /// - read the offers report of any tender
    Admin,
    /// Contractor: bids on open tenders.
    ///
    /// Contractors may:
    /// - list open tenders
    /// - submit, update and withdraw their own offers
    Contractor,
}

impl Role {
    /// Parses a role name as the authentication provider spells it.
    ///
    /// Matching ignores ASCII case. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name: &str = name.trim();
        if name.eq_ignore_ascii_case("admin") {
            Some(Self::Admin)
        } else if name.eq_ignore_ascii_case("contractor") {
            Some(Self::Contractor)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Contractor => write!(f, "Contractor"),
        }
    }
}

/// The logged-in user as the authentication provider described them.
///
/// An empty token means nobody is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    /// Bearer token sent with every request.
    pub token: String,
    /// The user's identifier, if disclosed.
    pub user_id: Option<i64>,
    /// The user's login name.
    pub username: String,
    /// Roles granted to the user.
    pub roles: Vec<Role>,
}

impl UserSession {
    /// Creates the logged-out session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns whether a token is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Returns whether the user holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the bearer token, if logged in.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.is_logged_in().then_some(self.token.as_str())
    }

    /// Forgets the token, user and roles.
    pub fn clear(&mut self) {
        *self = Self::anonymous();
    }

    /// Checks that the user may perform `action`, which needs `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] without a token and
    /// [`AuthError::Unauthorized`] when the role is missing.
    pub fn require(&self, role: Role, action: &str) -> Result<(), AuthError> {
        if !self.is_logged_in() {
            return Err(AuthError::NotLoggedIn);
        }
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: role,
            })
        }
    }

    /// Checks that the user may open the view at `path`.
    ///
    /// Views under [`ADMIN_AREA_PREFIX`] need [`Role::Admin`], views under
    /// [`CONTRACTOR_AREA_PREFIX`] need [`Role::Contractor`]. Any other path
    /// is open to everyone.
    ///
    /// # Errors
    ///
    /// Returns the error [`UserSession::require`] reports for the area's role.
    pub fn authorize_path(&self, path: &str) -> Result<(), AuthError> {
        match required_role_for_path(path) {
            Some(role) => self.require(role, path),
            None => Ok(()),
        }
    }
}

/// Returns the role a view path requires, if any.
#[must_use]
pub fn required_role_for_path(path: &str) -> Option<Role> {
    if path.starts_with(ADMIN_AREA_PREFIX) {
        Some(Role::Admin)
    } else if path.starts_with(CONTRACTOR_AREA_PREFIX) {
        Some(Role::Contractor)
    } else {
        None
    }
}
