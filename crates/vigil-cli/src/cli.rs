use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "A security posture auditor for web application deployments", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ./vigil.toml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress per-finding output, print the priority summary only
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all checks and render the report (the default)
    Audit {
        /// Secrets file to inspect (overrides config)
        #[arg(long)]
        env_file: Option<PathBuf>,
        /// Base URL of the deployment to probe (overrides config)
        #[arg(long)]
        url: Option<String>,
        /// Subtree to search for CORS configuration (overrides config)
        #[arg(long)]
        project_root: Option<PathBuf>,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a commented default vigil.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
