//! skillfetch - agent skill distribution
//!
//! Downloads versioned skill bundles from the skills registry, keeps a local
//! cache to avoid repeated fetches, and installs them into agent tool
//! directories (Claude Code, Cursor, ...) per project or per user.

use clap::Parser;

mod agents;
mod cli;
mod commands;
mod error;
mod fsutil;
mod installer;
mod path_safety;
mod progress;
mod project_root;
mod registry;
mod update_check;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "skillfetch=debug"
    } else {
        "skillfetch=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Remove(args) => commands::remove::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::Cache(args) => commands::cache::run(args),
        Commands::UpdateCheck => commands::update_check::run(),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
