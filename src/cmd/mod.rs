//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`render`], [`watch`], [`init`], or [`validate`].
//! Each handler lives in its own submodule.

pub mod init;
pub mod render;
pub mod validate;
pub mod watch;

use crate::cli::{Cli, Commands};
use crate::error::LbrenderError;

pub async fn dispatch(cli: Cli) -> Result<(), LbrenderError> {
    match cli.command {
        Some(Commands::Render(args)) => render::execute(args).await,
        Some(Commands::Watch(args)) => watch::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  lbrender v{version} \u{2014} HAProxy config renderer for logical load balancers\n\n  \
         No command provided. To get started:\n\n    \
         lbrender init                  Generate a starter state file\n    \
         lbrender render                Render ./lbrender.yaml to ./haproxy.cfg\n    \
         lbrender watch                 Re-render whenever the state changes\n    \
         lbrender --help                See all commands and options\n"
    );
}
