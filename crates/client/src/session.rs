//! Authentication state and the login/logout transitions.

use std::time::Duration;

use crate::{AccessToken, AuthApi, AuthError};

/// Access tier of an authenticated user.
///
/// Parsed from the control plane's role string; names other than
/// `developer` and `admin` are kept verbatim in [`Role::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Developer,
    Admin,
    #[strum(default)]
    Unknown(String),
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "developer" => Role::Developer,
            "admin" => Role::Admin,
            other => Role::Unknown(other.to_string()),
        }
    }
}

/// The single client session.
///
/// A role only exists while logged in, so an unauthenticated session can never
/// carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
        role: Role,
        access_token: Option<AccessToken>,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    /// `None` while logged out.
    pub fn role(&self) -> Option<&Role> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { role, .. } => Some(role),
        }
    }

    /// Empty while logged out.
    pub fn username(&self) -> &str {
        match self {
            Session::LoggedOut => "",
            Session::LoggedIn { username, .. } => username,
        }
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn { access_token, .. } => access_token.as_ref(),
        }
    }
}

/// Owns the [`Session`] and drives it through the auth collaborator.
#[derive(Debug)]
pub struct SessionController<A> {
    auth: A,
    session: Session,
    timeout: Duration,
}

impl<A> SessionController<A> {
    /// Create a logged-out controller; `timeout` bounds each login exchange.
    pub fn new(auth: A, timeout: Duration) -> Self {
        Self {
            auth,
            session: Session::LoggedOut,
            timeout,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Return to [`Session::LoggedOut`] from any state. Purely local.
    pub fn logout(&mut self) {
        if let Session::LoggedIn { username, .. } = &self.session {
            tracing::info!(username = %username, "Logged out");
        }
        self.session = Session::LoggedOut;
    }
}

impl<A: AuthApi> SessionController<A> {
    /// Check the credentials with the control plane and log in on success.
    ///
    /// On any error the session is left exactly as it was.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Role, AuthError> {
        tracing::debug!(username = %username, "Logging in...");

        let response =
            match tokio::time::timeout(self.timeout, self.auth.login(username, password)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    tracing::warn!(username = %username, error = %e, "Login request failed");
                    return Err(AuthError::AuthUnavailable);
                }
                Err(_) => {
                    tracing::warn!(
                        username = %username,
                        timeout = ?self.timeout,
                        "Login request timed out"
                    );
                    return Err(AuthError::AuthUnavailable);
                }
            };

        if !response.success {
            tracing::info!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let role = Role::from(response.role.as_str());
        tracing::info!(username = %username, role = %role, "Logged in");

        self.session = Session::LoggedIn {
            username: username.to_string(),
            role: role.clone(),
            access_token: response.access_token.map(AccessToken::from),
        };

        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{AuthBehavior, MockAuth};

    const TIMEOUT: Duration = Duration::from_millis(50);

    fn controller(auth: MockAuth) -> SessionController<MockAuth> {
        SessionController::new(auth, TIMEOUT)
    }

    #[test]
    fn test_role_from_wire_name() {
        assert_eq!(Role::from("developer"), Role::Developer);
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("dev"), Role::Unknown("dev".to_string()));
        assert_eq!(Role::from(""), Role::Unknown(String::new()));
    }

    #[test]
    fn test_starts_logged_out() {
        let controller = controller(MockAuth::accepting("developer"));
        let session = controller.session();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
        assert_eq!(session.username(), "");
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut controller = controller(MockAuth::accepting("developer"));

        let role = controller.login("alice", "secret").await.unwrap();
        assert_eq!(role, Role::Developer);

        let session = controller.session();
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(&Role::Developer));
        assert_eq!(session.username(), "alice");
        assert_eq!(
            session.access_token().map(|t| t.as_str()),
            Some("test-token")
        );
    }

    #[tokio::test]
    async fn test_login_unknown_role() {
        let mut controller = controller(MockAuth::accepting("auditor"));
        let role = controller.login("bob", "pw").await.unwrap();
        assert_eq!(role, Role::Unknown("auditor".to_string()));
        assert!(controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejected_stays_logged_out() {
        let mut controller = controller(MockAuth::new(AuthBehavior::Reject));
        let err = controller.login("alice", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(controller.session(), &Session::LoggedOut);
    }

    #[tokio::test]
    async fn test_login_transport_failure() {
        let mut controller = controller(MockAuth::new(AuthBehavior::Fail));
        let err = controller.login("alice", "secret").await.unwrap_err();
        assert_eq!(err, AuthError::AuthUnavailable);
        assert_eq!(controller.session(), &Session::LoggedOut);
    }

    #[tokio::test]
    async fn test_login_timeout() {
        let auth = MockAuth::new(AuthBehavior::Hang);
        let mut controller = controller(auth.clone());
        let err = controller.login("alice", "secret").await.unwrap_err();
        assert_eq!(err, AuthError::AuthUnavailable);
        assert_eq!(auth.calls(), 1);
        assert!(!controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_from_any_state() {
        let mut controller = controller(MockAuth::accepting("admin"));
        controller.logout();
        assert_eq!(controller.session(), &Session::LoggedOut);

        controller.login("root", "pw").await.unwrap();
        controller.logout();
        assert_eq!(controller.session(), &Session::LoggedOut);
        assert_eq!(controller.session().role(), None);
        assert_eq!(controller.session().access_token(), None);
    }
}
