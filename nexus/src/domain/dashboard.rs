//! Which dashboard perspective to render.

use super::identity::{Identity, Role};

/// Role the dashboard is rendered for.
///
/// The role switcher lets any visitor preview another perspective, so the
/// dashboard role is not always the signed-in identity's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRole(Role);

impl DashboardRole {
    /// Pick the switched role, else the identity's role, else alumni.
    ///
    /// # Examples
    /// ```
    /// use nexus::domain::{DashboardRole, Role};
    ///
    /// assert_eq!(DashboardRole::resolve(None, None).role(), Role::Alumni);
    /// assert_eq!(DashboardRole::resolve(Some(Role::Admin), None).label(), "Institute Admin");
    /// ```
    pub fn resolve(switched: Option<Role>, identity: Option<&Identity>) -> Self {
        Self(
            switched
                .or_else(|| identity.map(|current| current.role))
                .unwrap_or_default(),
        )
    }

    /// Resolved role.
    pub const fn role(self) -> Role {
        self.0
    }

    /// Display name of the resolved role.
    pub const fn label(self) -> &'static str {
        self.0.label()
    }

    /// Options offered by the role switcher, in order.
    pub const fn options() -> [Role; 4] {
        Role::ALL
    }
}
