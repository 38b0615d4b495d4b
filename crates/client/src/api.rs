//! Contracts of the two control-plane exchanges consumed by the controllers.

use std::{fmt, future::Future};

use derive_more::{Deref, From};
use serde::Deserialize;

use crate::{DeploymentRequest, DeploymentResult, TransportError};

/// Bearer token handed out by a successful login.
#[derive(Clone, PartialEq, Eq, Deref, From)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Body of a `login` answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Raw role name; only meaningful when `success` is true.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// An application-level rejection of the submitted credentials.
    pub fn rejected() -> Self {
        Self {
            success: false,
            role: String::new(),
            access_token: None,
        }
    }
}

/// Credential check performed by the control plane.
pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, TransportError>> + Send;
}

/// Deployment endpoint of the control plane.
pub trait DeployApi: Send + Sync {
    fn deploy(
        &self,
        request: &DeploymentRequest,
        token: Option<&AccessToken>,
    ) -> impl Future<Output = Result<DeploymentResult, TransportError>> + Send;
}
