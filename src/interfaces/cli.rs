use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "admin")]
#[command(about = "Holdings report admin backend.")]
#[command(version)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the admin routes on the configured port
    Serve {
        /// Override the configured port
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },

    /// Generate the holdings report
    Report {
        /// Also push the report to the investments export endpoint
        #[arg(long)]
        export: bool,

        /// Write the report to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Show a single investment
    Investment {
        /// Investment id
        id: String,
    },

    /// Show status
    Status,

    /// Generate config sample
    GenerateConfig,
}
