//! Route guarding for role-protected pages.

use eduzone_models::UserRole;

use crate::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Who may open a route. The default admits any signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteAccess {
    pub required_role: Option<UserRole>,
    pub allowed_roles: Option<Vec<UserRole>>,
}

impl RouteAccess {
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn role(role: UserRole) -> Self {
        Self {
            required_role: Some(role),
            allowed_roles: None,
        }
    }

    pub fn any_of(roles: impl Into<Vec<UserRole>>) -> Self {
        Self {
            required_role: None,
            allowed_roles: Some(roles.into()),
        }
    }

    pub fn admits(&self, role: UserRole) -> bool {
        if let Some(required) = self.required_role
            && required != role
        {
            return false;
        }

        match &self.allowed_roles {
            Some(allowed) => allowed.contains(&role),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Still restoring the session; show a placeholder.
    Wait,
    /// Not signed in. `from` is where to return after login.
    RedirectToLogin { from: String },
    RedirectToUnauthorized,
}

impl GuardDecision {
    /// Path to navigate to, if the route may not be shown.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin { .. } => Some(LOGIN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Allow | Self::Wait => None,
        }
    }
}

pub fn authorize(state: &SessionState, access: &RouteAccess, attempted_path: &str) -> GuardDecision {
    match state {
        SessionState::Loading => GuardDecision::Wait,
        SessionState::Unauthenticated => GuardDecision::RedirectToLogin {
            from: attempted_path.to_string(),
        },
        SessionState::Authenticated(user) if access.admits(user.role) => GuardDecision::Allow,
        SessionState::Authenticated(_) => GuardDecision::RedirectToUnauthorized,
    }
}
