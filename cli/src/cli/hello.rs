use anyhow::Result;
use colored::*;
use structopt::StructOpt;
use wirecall_core::rpc::hello;
use wirecall_core::utils::{HELLO_FUNCTION, HELLO_INSTANCE};

use super::{connect, report};

#[derive(StructOpt, Debug)]
pub struct HelloCommand {
    /// Config file, defaults to ./default.json
    #[structopt(long)]
    config: Option<String>,
}

impl HelloCommand {
    pub fn execute(self) -> Result<()> {
        let invoker = connect(self.config.as_deref())?;
        let target = format!("{}.{}", HELLO_INSTANCE, HELLO_FUNCTION);

        println!(
            "{} Calling {} (socket: {})...",
            "[INFO]".blue(),
            target.cyan(),
            invoker.path().display().to_string().cyan()
        );
        report(&target, hello(&invoker))
    }
}
