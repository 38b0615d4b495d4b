//! Error kinds surfaced by the session and deployment controllers.

/// Failure of a `login` exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The control plane answered and rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The control plane could not be reached or did not answer in time.
    #[error("authentication service unavailable")]
    AuthUnavailable,
}

impl AuthError {
    /// Message shown in the login view's error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid username or password.",
            AuthError::AuthUnavailable => "Failed to login. Please try again.",
        }
    }
}

/// A deployment form field that blocks request construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid domain")]
    InvalidDomain,
    #[error("invalid namespace")]
    InvalidNamespace,
    #[error("invalid app name")]
    InvalidAppName,
}

impl ValidationError {
    /// Message shown when a submission is blocked by this field.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidDomain => {
                "Please enter a valid domain name, e.g. example.com example123.ch etc."
            }
            ValidationError::InvalidNamespace => "Please enter a valid namespace, e.g. awscloud",
            ValidationError::InvalidAppName => "Please enter a valid app name, e.g. nginx-12345",
        }
    }
}

/// Failure of a deployment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeployError {
    /// The form did not validate; no request was sent.
    #[error(transparent)]
    InvalidRequest(#[from] ValidationError),
    /// The control plane could not be reached, rejected the request or did not answer in time.
    #[error("deployment service unavailable")]
    DeployUnavailable,
}

impl DeployError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DeployError::InvalidRequest(e) => e.user_message(),
            DeployError::DeployUnavailable => "Failed to deploy Nginx. Please try again.",
        }
    }
}

/// Transport-level failure talking to the control plane.
///
/// Always distinct from an application-level rejection such as `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("failed to reach the control plane: {0}")]
    Connect(String),
    #[error("control plane answered with status {0}")]
    Status(u16),
    #[error("failed to decode control plane response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Connect(err.to_string())
        }
    }
}
