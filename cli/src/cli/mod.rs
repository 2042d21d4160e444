mod call;
mod hello;

use anyhow::{Context, Result};
use colored::*;
use structopt::{clap::AppSettings, StructOpt};
use wirecall_core::error::InvokeError;
use wirecall_core::rpc::UnixInvoker;
use wirecall_core::utils::config::Config;
use wirecall_core::utils::logging;

use self::{call::CallCommand, hello::HelloCommand};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "wirecall",
    global_settings = &[AppSettings::DisableHelpSubcommand]
)]
pub enum AppCommand {
    /// Call wrpc-examples:hello/handler.hello
    #[structopt(name = "hello")]
    Hello(HelloCommand),

    /// Call any zero-argument function returning a string
    #[structopt(name = "call")]
    Call(CallCommand),
}

impl AppCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            AppCommand::Hello(cmd) => cmd.execute(),
            AppCommand::Call(cmd) => cmd.execute(),
        }
    }
}

// Loads the config, sets up logging and builds the invoker it describes
fn connect(config_override: Option<&str>) -> Result<UnixInvoker> {
    let config_path = Config::locate(config_override)?;
    let config = Config::load(&config_path)?;

    logging::init(config.log_path.as_deref(), config.level())
        .context("Failed to initialize logger")?;

    let invoker = UnixInvoker::new(&config.sock_path);
    Ok(match config.timeout() {
        Some(timeout) => invoker.with_timeout(timeout),
        None => invoker,
    })
}

// Prints the outcome of a call, returning the failure with its full chain
fn report(target: &str, result: Result<String, InvokeError>) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{} {}", "[SUCCESS]".green(), value.bold());
            Ok(())
        }
        Err(e) => {
            if let Some(lossy) = e.lossy_value() {
                eprintln!(
                    "{} Result is not valid UTF-8, lossy value: {}",
                    "[WARN]".yellow(),
                    lossy.italic()
                );
            }
            Err(anyhow::Error::new(e)
                .context(format!("{} Call to {} failed", "[ERROR]".red(), target.cyan())))
        }
    }
}
