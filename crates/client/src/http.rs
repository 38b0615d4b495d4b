//! HTTP transport to the control plane.

use anyhow::Context;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    AccessToken, AuthApi, ClientConfig, DeployApi, DeploymentRequest, DeploymentResult,
    LoginResponse, TransportError,
};

/// Create an HTTP client bounded by the configured request timeout.
pub fn create_client(config: &ClientConfig) -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("Failed to create HTTP client")
}

/// JSON-over-HTTP implementation of both control plane exchanges.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpControlPlane {
    client: reqwest::Client,
    login_url: Url,
    deploy_url: Url,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

impl HttpControlPlane {
    pub fn new(config: &ClientConfig) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: create_client(config)?,
            login_url: config.login_url()?,
            deploy_url: config.deploy_url()?,
        })
    }

    /// POST `body` as JSON and decode a JSON answer.
    ///
    /// Any non-2xx status is a [`TransportError::Status`].
    async fn post_json<B, T>(
        &self,
        url: &Url,
        body: &B,
        token: Option<&AccessToken>,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Control plane returned an error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl AuthApi for HttpControlPlane {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, TransportError> {
        let body = LoginBody { username, password };
        match self.post_json(&self.login_url, &body, None).await {
            // The control plane answers bad credentials with 401 and an error body.
            Err(TransportError::Status(code)) if code == StatusCode::UNAUTHORIZED.as_u16() => {
                Ok(LoginResponse::rejected())
            }
            other => other,
        }
    }
}

impl DeployApi for HttpControlPlane {
    async fn deploy(
        &self,
        request: &DeploymentRequest,
        token: Option<&AccessToken>,
    ) -> Result<DeploymentResult, TransportError> {
        self.post_json(&self.deploy_url, request, token).await
    }
}
