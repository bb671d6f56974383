use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aura::app::App;
use aura::config::Config;

/// Aura - a terminal chat client for the Aura student wellbeing assistant
#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat service endpoint (overrides the config file)
    #[arg(long, env = "AURA_CHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up file-based logging; the TUI owns the terminal
    let log_file = std::fs::File::create("/tmp/aura.log")?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(log_file).with_ansi(false))
        .init();

    // Load .env files (local first, then home directory)
    // Errors are ignored - files are optional
    let _ = dotenvy::from_filename(".env");
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".env"));
    }

    let args = Args::parse();

    // Load configuration
    let mut config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Apply CLI overrides
    if let Some(endpoint) = args.endpoint {
        config.chat.endpoint = endpoint;
    }
    config.validate()?;

    tracing::info!(endpoint = %config.chat.endpoint, "starting aura");

    // Run the application
    let mut app = App::new(config)?;
    app.run().await
}
