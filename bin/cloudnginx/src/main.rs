//! cloudnginx is a terminal client for the multi-cloud Nginx deployment platform.

mod cli;
mod console;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command, ConfigCommand, DeployArgs};
use cloudnginx_client::{
    ClientConfig, DeploymentFormController, HttpControlPlane, SessionController, View, connect,
    status,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger. Stdout belongs to the console.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().or_else(ClientConfig::default_path);
    let mut config = ClientConfig::load(config_path.as_deref())?;

    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }

    match cli.command.unwrap_or(Command::Console) {
        Command::Console => console::run(connect(&config)?).await,
        Command::Deploy(args) => deploy(&config, args).await,
        Command::Config { action } => match action {
            ConfigCommand::Init { force } => init_config(&config, config_path, force),
            ConfigCommand::Show => {
                let content = toml::to_string_pretty(&config)
                    .context("Failed to serialize client config to TOML")?;
                print!("{}", content);
                Ok(())
            }
        },
    }
}

/// Log in, check the role grants the developer console, then submit one deployment.
async fn deploy(config: &ClientConfig, args: DeployArgs) -> Result<()> {
    let control_plane = HttpControlPlane::new(config)?;
    let timeout = config.request_timeout();

    let mut session = SessionController::new(control_plane.clone(), timeout);
    session
        .login(&args.username, &args.password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let view = View::route(session.session());
    if !view.can_deploy() {
        anyhow::bail!(
            "User '{}' with role '{}' cannot deploy (view: {})",
            args.username,
            session.session().role().map(|r| r.to_string()).unwrap_or_default(),
            view
        );
    }

    let mut form = DeploymentFormController::new(control_plane, timeout);
    form.set_cloud_provider(args.provider);
    form.set_domain(args.domain);
    if let Some(namespace) = args.namespace {
        form.set_namespace(namespace);
    }
    if let Some(app_name) = args.app_name {
        form.set_app_name(app_name);
    }

    let result = form
        .submit(session.session().access_token())
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    match status::render(&result) {
        Some(fragment) => println!("{}", fragment),
        None => tracing::warn!("Deployment accepted but no public URL was returned"),
    }

    Ok(())
}

fn init_config(config: &ClientConfig, path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.context("No configuration directory found, pass --config")?;

    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    config.save_to_file(&path)?;
    println!("Configuration written to {}", path.display());

    Ok(())
}
