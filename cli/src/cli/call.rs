use anyhow::Result;
use colored::*;
use structopt::StructOpt;
use wirecall_core::rpc::invoke;

use super::{connect, report};

#[derive(StructOpt, Debug)]
pub struct CallCommand {
    /// Target instance, e.g. wrpc-examples:hello/handler
    instance: String,

    /// Function name
    name: String,

    /// Config file, defaults to ./default.json
    #[structopt(long)]
    config: Option<String>,
}

impl CallCommand {
    pub fn execute(self) -> Result<()> {
        let invoker = connect(self.config.as_deref())?;
        let target = format!("{}.{}", self.instance, self.name);

        println!(
            "{} Calling {} (socket: {})...",
            "[INFO]".blue(),
            target.cyan(),
            invoker.path().display().to_string().cyan()
        );
        report(&target, invoke(&invoker, &self.instance, &self.name, &()))
    }
}
