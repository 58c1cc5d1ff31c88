//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - remove: Remove command arguments
//! - list: List command arguments
//! - show: Show command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod cache;
pub mod completions;
pub mod install;
pub mod list;
pub mod remove;
pub mod show;

pub use cache::{CacheArgs, CacheSubcommand};
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use remove::RemoveArgs;
pub use show::ShowArgs;

/// skillfetch - agent skill distribution
///
/// Fetch, cache and install agent skill bundles.
#[derive(Parser, Debug)]
#[command(
    name = "skillfetch",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Fetch, cache and install agent skill bundles",
    long_about = "skillfetch downloads versioned skill bundles from the skills registry, \
                  keeps a local cache to avoid repeated fetches, and installs them into \
                  agent tool directories (Claude Code, Cursor, ...) per project or per user.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  skillfetch install cloudflare-deploy            \x1b[90m# Install for detected agents\x1b[0m\n   \
                  skillfetch install my-skill --agent cursor      \x1b[90m# Install for one agent\x1b[0m\n   \
                  skillfetch install my-skill --global --method copy\n   \
                  skillfetch remove my-skill                      \x1b[90m# Remove from detected agents\x1b[0m\n   \
                  skillfetch list --available                     \x1b[90m# List published skills\x1b[0m\n   \
                  skillfetch cache clear                          \x1b[90m# Drop the local cache\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install skills into agent directories
    Install(InstallArgs),

    /// Remove an installed skill
    Remove(RemoveArgs),

    /// List installed or available skills
    List(ListArgs),

    /// Show skill information
    Show(ShowArgs),

    /// Manage the local cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Check whether a newer skillfetch is published
    UpdateCheck,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
