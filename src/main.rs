mod app;
mod registry;
mod ui;

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    app::run()
}

/// The terminal is owned by ratatui, so logs go to a file under the
/// config directory instead of stdout.
fn init_logging() -> anyhow::Result<()> {
    let mut dir = dirs::config_dir().context("could not resolve XDG config dir")?;
    dir.push("company-registry");
    fs::create_dir_all(&dir).context("failed to create config directory")?;

    let log_file =
        fs::File::create(dir.join("company-registry.log")).context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
