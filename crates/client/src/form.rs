//! Deployment form state, real-time validation and submission.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    AccessToken, DeployApi, DeployError, ValidationError,
    domain::{is_valid_dns_label, is_valid_domain},
};

/// Inline message shown under the domain input while it is invalid.
pub const INVALID_DOMAIN_MESSAGE: &str = "Please enter a valid domain name.";

/// Inline message for an invalid namespace.
pub const INVALID_NAMESPACE_MESSAGE: &str =
    "Namespaces use lowercase letters, digits and hyphens (max 63).";

/// Inline message for an invalid app name.
pub const INVALID_APP_NAME_MESSAGE: &str =
    "App names use lowercase letters, digits and hyphens (max 63).";

/// Target managed-Kubernetes service.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CloudProvider {
    Aws,
    #[default]
    Gcp,
    Azure,
}

impl CloudProvider {
    /// Human-readable name of the managed Kubernetes offering.
    pub fn service_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS (EKS)",
            CloudProvider::Gcp => "GCP (GKE)",
            CloudProvider::Azure => "Azure (AKS)",
        }
    }
}

/// Result of re-validating a field after its value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { message: &'static str },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// A text input whose validity is derived from its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    value: String,
    is_valid: bool,
    error_message: &'static str,
}

impl InputField {
    fn new(value: String, outcome: ValidationOutcome) -> Self {
        let (is_valid, error_message) = match outcome {
            ValidationOutcome::Valid => (true, ""),
            ValidationOutcome::Invalid { message } => (false, message),
        };
        Self {
            value,
            is_valid,
            error_message,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Empty while the field is valid.
    pub fn error_message(&self) -> &'static str {
        self.error_message
    }
}

fn check_domain(value: &str) -> ValidationOutcome {
    if is_valid_domain(value) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid {
            message: INVALID_DOMAIN_MESSAGE,
        }
    }
}

/// Optional label fields accept the empty string (control plane default).
fn check_optional_label(value: &str, message: &'static str) -> ValidationOutcome {
    if value.is_empty() || is_valid_dns_label(value) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid { message }
    }
}

/// All user input of the deployment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentForm {
    cloud_provider: CloudProvider,
    domain: InputField,
    namespace: InputField,
    app_name: InputField,
}

impl Default for DeploymentForm {
    fn default() -> Self {
        Self {
            cloud_provider: CloudProvider::default(),
            domain: InputField::new(String::new(), check_domain("")),
            namespace: InputField::new(String::new(), ValidationOutcome::Valid),
            app_name: InputField::new(String::new(), ValidationOutcome::Valid),
        }
    }
}

impl DeploymentForm {
    pub fn cloud_provider(&self) -> CloudProvider {
        self.cloud_provider
    }

    pub fn domain(&self) -> &InputField {
        &self.domain
    }

    pub fn namespace(&self) -> &InputField {
        &self.namespace
    }

    pub fn app_name(&self) -> &InputField {
        &self.app_name
    }

    pub fn set_cloud_provider(&mut self, provider: CloudProvider) {
        self.cloud_provider = provider;
    }

    pub fn set_domain(&mut self, value: impl Into<String>) -> ValidationOutcome {
        let value = value.into();
        let outcome = check_domain(&value);
        self.domain = InputField::new(value, outcome);
        outcome
    }

    pub fn set_namespace(&mut self, value: impl Into<String>) -> ValidationOutcome {
        let value = value.into();
        let outcome = check_optional_label(&value, INVALID_NAMESPACE_MESSAGE);
        self.namespace = InputField::new(value, outcome);
        outcome
    }

    pub fn set_app_name(&mut self, value: impl Into<String>) -> ValidationOutcome {
        let value = value.into();
        let outcome = check_optional_label(&value, INVALID_APP_NAME_MESSAGE);
        self.app_name = InputField::new(value, outcome);
        outcome
    }

    /// Build the wire request, failing on the first invalid field.
    pub fn build_request(&self) -> Result<DeploymentRequest, ValidationError> {
        if !self.domain.is_valid() {
            return Err(ValidationError::InvalidDomain);
        }
        if !self.namespace.is_valid() {
            return Err(ValidationError::InvalidNamespace);
        }
        if !self.app_name.is_valid() {
            return Err(ValidationError::InvalidAppName);
        }

        let non_empty =
            |field: &InputField| (!field.value().is_empty()).then(|| field.value().to_string());

        Ok(DeploymentRequest {
            cloud_provider: self.cloud_provider,
            domain: self.domain.value().to_string(),
            namespace: non_empty(&self.namespace),
            app_name: non_empty(&self.app_name),
        })
    }
}

/// A validated deployment request, as sent to the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    cloud_provider: CloudProvider,
    domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(rename = "appname", skip_serializing_if = "Option::is_none")]
    app_name: Option<String>,
}

impl DeploymentRequest {
    pub fn cloud_provider(&self) -> CloudProvider {
        self.cloud_provider
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }
}

/// Outcome of a successful deployment. `public_url` stays empty until one arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    #[serde(default)]
    pub public_url: String,
}

impl DeploymentResult {
    pub fn is_empty(&self) -> bool {
        self.public_url.is_empty()
    }
}

/// Owns the [`DeploymentForm`] and submits it to the deploy collaborator.
///
/// `submit` takes `&mut self`, so at most one deployment is outstanding per
/// controller.
#[derive(Debug)]
pub struct DeploymentFormController<D> {
    deployer: D,
    form: DeploymentForm,
    timeout: Duration,
}

impl<D> DeploymentFormController<D> {
    /// Create a controller with an empty form; `timeout` bounds each submission.
    pub fn new(deployer: D, timeout: Duration) -> Self {
        Self {
            deployer,
            form: DeploymentForm::default(),
            timeout,
        }
    }

    pub fn form(&self) -> &DeploymentForm {
        &self.form
    }

    pub fn set_cloud_provider(&mut self, provider: CloudProvider) {
        tracing::debug!(provider = %provider, "Cloud provider selected");
        self.form.set_cloud_provider(provider);
    }

    pub fn set_domain(&mut self, value: impl Into<String>) -> ValidationOutcome {
        self.form.set_domain(value)
    }

    pub fn set_namespace(&mut self, value: impl Into<String>) -> ValidationOutcome {
        self.form.set_namespace(value)
    }

    pub fn set_app_name(&mut self, value: impl Into<String>) -> ValidationOutcome {
        self.form.set_app_name(value)
    }

    pub fn build_request(&self) -> Result<DeploymentRequest, ValidationError> {
        self.form.build_request()
    }

    /// Discard all input, back to the defaults.
    pub fn reset(&mut self) {
        self.form = DeploymentForm::default();
    }
}

impl<D: DeployApi> DeploymentFormController<D> {
    /// Validate the form and submit it.
    ///
    /// An invalid form fails with [`DeployError::InvalidRequest`] without contacting
    /// the collaborator. The form is never modified by this call.
    pub async fn submit(
        &mut self,
        token: Option<&AccessToken>,
    ) -> Result<DeploymentResult, DeployError> {
        let request = self.build_request()?;

        tracing::info!(
            provider = %request.cloud_provider(),
            domain = %request.domain(),
            namespace = request.namespace().unwrap_or("<default>"),
            app_name = request.app_name().unwrap_or("<default>"),
            "Submitting deployment..."
        );

        match tokio::time::timeout(self.timeout, self.deployer.deploy(&request, token)).await {
            Ok(Ok(result)) => {
                tracing::info!(public_url = %result.public_url, "Deployment succeeded");
                Ok(result)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Deployment request failed");
                Err(DeployError::DeployUnavailable)
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Deployment request timed out");
                Err(DeployError::DeployUnavailable)
            }
        }
    }
}
