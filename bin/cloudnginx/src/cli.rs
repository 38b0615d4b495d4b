use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cloudnginx_client::CloudProvider;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "cloudnginx")]
#[command(
    author,
    version,
    about = "Deploy Nginx to AWS, GCP or Azure through the platform control plane"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(
        short,
        long,
        global = true,
        env = "CLOUDNGINX_VERBOSITY",
        default_value_t = LevelFilter::INFO
    )]
    pub verbosity: LevelFilter,

    /// Path to a configuration file.
    ///
    /// If not provided, `<config dir>/cloudnginx/config.toml` is used when it exists.
    #[arg(long, alias = "conf", global = true, env = "CLOUDNGINX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the control plane. Overrides the configuration file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Upper bound in seconds on each login or deploy request.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// What to do. Defaults to the interactive console.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive console: log in, fill the deployment form, deploy.
    Console,

    /// Log in and deploy in one go, then print the public URL.
    Deploy(DeployArgs),

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// Platform username.
    #[arg(short, long, env = "CLOUDNGINX_USERNAME")]
    pub username: String,

    /// Platform password.
    #[arg(long, env = "CLOUDNGINX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// The target cloud provider (aws, gcp or azure).
    #[arg(long, default_value_t = CloudProvider::Gcp)]
    pub provider: CloudProvider,

    /// The domain to serve, e.g. example.com.
    #[arg(long)]
    pub domain: String,

    /// Kubernetes namespace. The control plane picks `default` if not provided.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Application name. The control plane picks `default-app` if not provided.
    #[arg(long)]
    pub app_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write the effective configuration to the configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration.
    Show,
}
