//! Client configuration: control plane endpoints and request bounds.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// The default name for the client configuration file.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "CLOUDNGINX_";

/// Default control plane address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default bound on a single login or deploy exchange.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the control plane.
    pub base_url: String,
    /// Path of the login endpoint, relative to `base_url`.
    pub login_path: String,
    /// Path of the deploy endpoint, relative to `base_url`.
    pub deploy_path: String,
    /// Upper bound in seconds on each login/deploy exchange.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: "/login".to_string(),
            deploy_path: "/deploy".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// `<config dir>/cloudnginx/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cloudnginx").join(CONFIG_FILENAME))
    }

    /// Layered sources: defaults, then the TOML file (if any), then `CLOUDNGINX_*`.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)
            .extract()
            .context("Failed to load client configuration")?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create {}", parent.display()))?;
        }
        let content =
            toml::to_string_pretty(self).context("Failed to serialize client config to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(&self.login_path)
    }

    pub fn deploy_url(&self) -> Result<Url> {
        self.endpoint(&self.deploy_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid control plane URL: {}", self.base_url))?;
        base.join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }
}
