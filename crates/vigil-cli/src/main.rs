mod cli;
mod commands;
mod formatters;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

use std::process::exit;

use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Some(Commands::Audit {
            env_file,
            url,
            project_root,
            format,
        }) => commands::audit::audit(
            cli.config.as_deref(),
            env_file.as_deref(),
            url.as_deref(),
            project_root.as_deref(),
            format,
            cli.quiet,
        ),
        Some(Commands::Init { force }) => commands::init::init(*force),
        // No subcommand: run a default audit, so `vigil` alone is useful.
        None => commands::audit::audit(cli.config.as_deref(), None, None, None, "text", cli.quiet),
    };

    // The exit code is not a pass/fail signal: findings are advisory. Only a
    // configuration the tool cannot work with is an error.
    match result {
        Ok(()) => exit(0),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(2);
        }
    }
}
