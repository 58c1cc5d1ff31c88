use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    skillfetch cache\n\n\
                  Clear the whole cache:\n    skillfetch cache clear\n\n\
                  Remove one cached skill:\n    skillfetch cache clear --only my-skill")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Show cache statistics and cached skills
    Info,

    /// Clear cached content
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only a specific cached skill
    #[arg(long, value_name = "SKILL")]
    pub only: Option<String>,
}
