// Critnotify - critical notification email composer

use clap::Parser;
use tracing::{error, info};

use critnotify_app::{Cli, Commands};
use critnotify_clipboard::{ClipboardConfig, ClipboardPublisherFactory};
use critnotify_common::{config::Config, Error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays clean for previews and JSON
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with_writer(std::io::stderr)
        .init();

    info!(command = ?cli.command, "Starting critnotify");

    let mut clipboard_config =
        ClipboardConfig::from_env().map_err(|e| Error::Configuration(e.to_string()))?;
    // The process exits right after `copy`, so it must keep serving the selection
    if matches!(cli.command, Commands::Copy { .. }) {
        clipboard_config = clipboard_config
            .one_shot()
            .map_err(|e| Error::Configuration(e.to_string()))?;
    }
    let publisher = ClipboardPublisherFactory::create(&clipboard_config)
        .map_err(|e| Error::Configuration(e.to_string()))?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    if let Err(e) = critnotify_app::run(
        cli,
        config,
        publisher.as_ref(),
        stdin.lock(),
        &mut stdout,
    )
    .await
    {
        error!(code = e.error_code(), "{}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
