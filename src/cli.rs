use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Zitify - declarative OpenZiti deployment model compiler
#[derive(Parser, Debug)]
#[command(name = "zitify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of zitify.toml discovery
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile deployment fragments into flat OpenZiti resource lists
    Compile {
        /// Directory containing deployments/
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,

        /// Only process resources touched by recent git changes
        #[arg(long)]
        smart: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show which fragments and names git considers changed
    Scope {
        /// Directory containing deployments/
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,
    },

    /// Print the merged deployment model as YAML
    Merge {
        /// Directory containing deployments/
        #[arg(short, long, default_value = ".")]
        base_dir: PathBuf,

        /// Include fragments recovered from git for deleted files
        #[arg(long)]
        smart: bool,
    },
}
