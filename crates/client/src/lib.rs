//! cloudnginx-client - Client core for the multi-cloud Nginx deployment platform.
//!
//! This crate holds the session/role state machine, the deployment form with its
//! real-time validation, view routing and the HTTP adapter to the control plane.
//! Presentation is left to the embedding binary.

mod api;
mod app;
mod config;
pub mod domain;
mod error;
mod form;
mod http;
mod session;
pub mod status;
mod view;

#[cfg(test)]
mod mock;

pub use api::{AccessToken, AuthApi, DeployApi, LoginResponse};
pub use app::{App, Event};
pub use config::{
    CONFIG_FILENAME, ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_PREFIX,
};
pub use error::{AuthError, DeployError, TransportError, ValidationError};
pub use form::{
    CloudProvider, DeploymentForm, DeploymentFormController, DeploymentRequest, DeploymentResult,
    INVALID_APP_NAME_MESSAGE, INVALID_DOMAIN_MESSAGE, INVALID_NAMESPACE_MESSAGE, InputField,
    ValidationOutcome,
};
pub use http::{HttpControlPlane, create_client};
pub use session::{Role, Session, SessionController};
pub use view::View;

/// Build an [`App`] talking HTTP to the control plane described by `config`.
pub fn connect(config: &ClientConfig) -> anyhow::Result<App<HttpControlPlane, HttpControlPlane>> {
    let control_plane = HttpControlPlane::new(config)?;
    let timeout = config.request_timeout();

    tracing::debug!(base_url = %config.base_url, ?timeout, "Control plane configured");

    Ok(App::new(
        SessionController::new(control_plane.clone(), timeout),
        DeploymentFormController::new(control_plane, timeout),
    ))
}
