// src/main.rs
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use wirecall_core::utils::config::Config;
use wirecall_core::utils::logging;

mod daemon;

use daemon::state::DaemonState;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Expect config path as the first argument
    if args.len() < 2 {
        // Use eprintln for errors before logger is initialized
        eprintln!("Usage: wirecall-daemon <config_path>");
        return Err(anyhow::anyhow!("Usage: wirecall-daemon <config_path>"));
    }
    let config = Config::load(Path::new(&args[1]))?;

    logging::init(config.log_path.as_deref(), config.level())
        .context("Failed to initialize logger")?;

    let state = DaemonState::new(config.greeting());
    daemon::start(&config.sock_path, state).await?;

    Ok(())
}
