//! Selection of the active view from the session.

use crate::{Role, Session};

/// The screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    Login,
    DeveloperConsole,
    AdminConsole,
    UnknownRoleFallback,
}

impl View {
    /// Pick the view for `session`. Pure: equal sessions give equal views.
    pub fn route(session: &Session) -> Self {
        match session {
            Session::LoggedOut => View::Login,
            Session::LoggedIn { role, .. } => match role {
                Role::Developer => View::DeveloperConsole,
                Role::Admin => View::AdminConsole,
                Role::Unknown(_) => View::UnknownRoleFallback,
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Login | View::DeveloperConsole => {
                "Nginx Deployment Platform (multi-cloud, multi-tenant)"
            }
            View::AdminConsole => "Admin Dashboard",
            View::UnknownRoleFallback => "Welcome!",
        }
    }

    /// Every view but the login form offers a logout action.
    pub fn can_logout(&self) -> bool {
        !matches!(self, View::Login)
    }

    pub fn can_deploy(&self) -> bool {
        matches!(self, View::DeveloperConsole)
    }
}
