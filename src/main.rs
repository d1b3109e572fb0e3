// lxz - terminal dashboard
//
// Hosts pluggable panels on a navigation stack and routes every key through
// a layered binding registry.
//
// Architecture:
// - Runtime: component stack, overlay pages, key registries, update queue
// - TUI (ratatui): terminal ownership, event loop, chrome and panels
// - Config: TOML file + env + CLI flags
// - Logging: tracing, captured in memory for the Logs panel

mod cli;
mod config;
mod logging;
mod runtime;
mod tui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use logging::LogBuffer;
use std::future::Future;

/// Route panics into the log instead of stderr.
///
/// Key handler panics are recovered by the runtime; printing them would
/// scribble over the alternate screen. Anything that unwinds out of the
/// TUI task restores the terminal through its drop guard and is reported
/// by `main` once the screen is back.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(location = %location, "Panic: {}", runtime::error::panic_message(info.payload()));
    }));
}

/// Run the dashboard on its own task.
///
/// A panic surfaces here as a `JoinError` after the task has unwound (and
/// the terminal has been restored), and becomes an error `main` can print.
async fn supervise<F>(dashboard: F) -> Result<()>
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    match tokio::spawn(dashboard).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(anyhow!(
            "Dashboard panicked: {}",
            runtime::error::panic_message(e.into_panic().as_ref())
        )),
        Err(e) => Err(e).context("Dashboard task failed"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands first (config --show, --reset, --edit, --update)
    // If a command was handled, exit early
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Precedence: flags > env > file > defaults
    let config = Config::load(&cli.overrides())?;

    // The subscriber must be up before anything logs. The guard flushes the
    // file writer when main returns.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, log_buffer.clone())?;

    install_panic_hook();

    tracing::info!(version = config::VERSION, "lxz starting");
    if let Err(e) = supervise(tui::run_tui(config, log_buffer)).await {
        tracing::error!("TUI error: {:#}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn broken_dashboard() -> Result<()> {
        panic!("draw failed")
    }

    #[tokio::test]
    async fn test_dashboard_panic_becomes_error() {
        let err = supervise(broken_dashboard()).await.unwrap_err();
        assert_eq!(err.to_string(), "Dashboard panicked: draw failed");

        assert!(supervise(async { Ok::<(), anyhow::Error>(()) }).await.is_ok());
    }
}
