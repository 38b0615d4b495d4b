//! Line-driven interactive console.
//!
//! Stdin is read on its own task and turned into [`Input`]s that are queued on a
//! channel. The app consumes them one at a time, so a second `login` or `deploy`
//! typed while one is outstanding runs after the first completes.

use anyhow::{Context, Result};
use cloudnginx_client::{App, AuthApi, CloudProvider, DeployApi, Event};
use strum::IntoEnumIterator;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::render::Screen;

/// Maximum number of inputs waiting behind an outstanding request.
const INPUT_QUEUE_CAPACITY: usize = 32;

pub const HELP: &str = "\
Commands:
  user <name>          set the username
  password <password>  set the password
  login                log in
  logout               log out
  provider <name>      select the cloud provider (aws, gcp, azure)
  domain <domain>      set the domain, e.g. example.com
  namespace <name>     set the Kubernetes namespace (empty for default)
  app <name>           set the application name (empty for default)
  deploy               deploy Nginx
  help                 show this help
  quit                 leave the console";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(Event),
    Help,
    Quit,
}

/// Parse a console line. Blank lines yield `None`.
pub fn parse_input(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "user" | "username" => Input::Event(Event::UsernameChanged(arg.to_string())),
        "password" | "pass" => Input::Event(Event::PasswordChanged(arg.to_string())),
        "login" => Input::Event(Event::LoginClicked),
        "logout" => Input::Event(Event::LogoutClicked),
        "provider" => {
            let provider: CloudProvider = arg.parse().map_err(|_| {
                let known: Vec<String> = CloudProvider::iter().map(|p| p.to_string()).collect();
                anyhow::anyhow!(
                    "Unknown cloud provider '{}', expected one of: {}",
                    arg,
                    known.join(", ")
                )
            })?;
            Input::Event(Event::ProviderSelected(provider))
        }
        "domain" => Input::Event(Event::DomainChanged(arg.to_string())),
        "namespace" | "ns" => Input::Event(Event::NamespaceChanged(arg.to_string())),
        "app" | "appname" => Input::Event(Event::AppNameChanged(arg.to_string())),
        "deploy" => Input::Event(Event::DeployClicked),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => anyhow::bail!("Unknown command '{}', type 'help' for a list", other),
    };

    Ok(Some(input))
}

/// Run the console until `quit` or end of input.
///
/// A failure reading stdin ends the console with that error.
pub async fn run<A: AuthApi, D: DeployApi>(mut app: App<A, D>) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(INPUT_QUEUE_CAPACITY);
    let reader = tokio::spawn(read_inputs(BufReader::new(tokio::io::stdin()), tx));

    println!("{}", HELP);
    println!();
    println!("{}", Screen(&app));

    let mut quit = false;
    while let Some(input) = rx.recv().await {
        match input {
            Input::Quit => {
                quit = true;
                break;
            }
            Input::Help => println!("{}", HELP),
            Input::Event(event) => {
                app.handle(event).await;
                println!();
                println!("{}", Screen(&app));
            }
        }
    }

    if quit {
        reader.abort();
    } else {
        // The channel only closes once the reader is done, with or without an error.
        reader.await.context("Stdin reader task failed")??;
    }
    tracing::debug!("Console closed");

    Ok(())
}

/// Forward parsed lines to `tx` until end of input or until the console hangs up.
///
/// Lines that are not valid UTF-8 are skipped with a warning; I/O errors end
/// the loop with an error.
async fn read_inputs<R: AsyncBufRead + Unpin>(
    mut reader: R,
    tx: mpsc::Sender<Input>,
) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(bytes = read, "Skipping console line that is not valid UTF-8");
            continue;
        };

        match parse_input(line) {
            Ok(Some(input)) => {
                if tx.send(input).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}
