// ============================================================================
// xpost — password-gated web form for posting to X
// ============================================================================
// Usage:
//   xpost                                   Serve on 127.0.0.1:8501
//   xpost --bind 0.0.0.0:8080               Serve on another address
//   xpost --config config.toml --secrets .streamlit/secrets.toml
// ============================================================================

mod app;
mod form;
mod page;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use xpost_core::{AccessGate, AppConfig, Composer, PostingGateway, SecretStore, TwitterExecutor};

use crate::app::App;

/// Password-gated web form for posting to X
#[derive(Parser)]
#[command(name = "xpost", version, about = "Compose posts and quote posts on X from a password-protected form")]
struct Cli {
    /// Base configuration file with a [config] table
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Secrets file with API credentials and APP_PASSWORD
    #[arg(long, default_value = ".streamlit/secrets.toml")]
    secrets: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8501")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xpost=debug".parse()?)
                .add_directive("xpost_core=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting xpost");

    let secrets = SecretStore::load(&cli.secrets).context("loading secrets")?;
    if secrets.config_override().is_none() {
        info!("No [config] override in secrets, using config file defaults");
    }

    let config = AppConfig::load(&cli.config, secrets.config_override())
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let gate = AccessGate::new(&secrets.app_password()?).context("initializing access gate")?;
    let executor =
        TwitterExecutor::new(secrets.credentials()?).context("initializing posting client")?;

    if config.textarea_max_chars == 0 {
        warn!("textarea_max_chars is 0, every post will be rejected");
    }

    let gateway = PostingGateway::new(executor, config.textarea_max_chars);
    let app = App::new(config, gate, Composer::new(gateway));

    let runtime = tokio::runtime::Handle::current();
    let bind = cli.bind;
    tokio::task::spawn_blocking(move || server::serve(app, &bind, runtime))
        .await
        .context("server thread panicked")??;

    Ok(())
}
