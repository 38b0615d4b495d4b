//! In-memory control plane used by unit tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    AccessToken, AuthApi, DeployApi, DeploymentRequest, DeploymentResult, LoginResponse,
    TransportError,
};

#[derive(Debug, Clone)]
pub(crate) enum AuthBehavior {
    Accept {
        role: &'static str,
        token: Option<&'static str>,
    },
    Reject,
    Fail,
    Hang,
}

#[derive(Debug, Clone)]
pub(crate) struct MockAuth {
    behavior: AuthBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockAuth {
    pub(crate) fn new(behavior: AuthBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn accepting(role: &'static str) -> Self {
        Self::new(AuthBehavior::Accept {
            role,
            token: Some("test-token"),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthApi for MockAuth {
    async fn login(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<LoginResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            AuthBehavior::Accept { role, token } => Ok(LoginResponse {
                success: true,
                role: role.to_string(),
                access_token: token.map(String::from),
            }),
            AuthBehavior::Reject => Ok(LoginResponse::rejected()),
            AuthBehavior::Fail => Err(TransportError::Connect("connection refused".to_string())),
            AuthBehavior::Hang => std::future::pending().await,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum DeployBehavior {
    Succeed(&'static str),
    Fail,
    Hang,
}

#[derive(Debug, Clone)]
pub(crate) struct MockDeployer {
    behavior: DeployBehavior,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(DeploymentRequest, Option<String>)>>>,
}

impl MockDeployer {
    pub(crate) fn new(behavior: DeployBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<DeploymentRequest> {
        self.last.lock().unwrap().as_ref().map(|(r, _)| r.clone())
    }

    pub(crate) fn last_token(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().and_then(|(_, t)| t.clone())
    }
}

impl DeployApi for MockDeployer {
    async fn deploy(
        &self,
        request: &DeploymentRequest,
        token: Option<&AccessToken>,
    ) -> Result<DeploymentResult, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() =
            Some((request.clone(), token.map(|t| t.as_str().to_string())));

        match &self.behavior {
            DeployBehavior::Succeed(url) => Ok(DeploymentResult {
                public_url: url.to_string(),
            }),
            DeployBehavior::Fail => Err(TransportError::Status(500)),
            DeployBehavior::Hang => std::future::pending().await,
        }
    }
}
