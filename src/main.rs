//! Zitify CLI
//!
//! Usage: zitify <COMMAND>
//!
//! Commands:
//!   compile  Compile deployment fragments into OpenZiti resource lists
//!   scope    Show the change scope derived from git
//!   merge    Print the merged deployment model

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "ZITIFY_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Compile {
            base_dir,
            smart,
            pretty,
        } => commands::compile::cmd_compile(&base_dir, config_path, smart, pretty),
        Commands::Scope { base_dir } => commands::scope::cmd_scope(&base_dir, config_path),
        Commands::Merge { base_dir, smart } => {
            commands::merge::cmd_merge(&base_dir, config_path, smart)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
