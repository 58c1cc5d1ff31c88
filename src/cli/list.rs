use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   List skills installed for detected agents:\n    skillfetch list\n\n\
                   List skills installed for one agent:\n    skillfetch list --agent cursor\n\n\
                   List skills published in the registry:\n    skillfetch list --available")]
pub struct ListArgs {
    /// List for one agent only
    #[arg(long, value_name = "AGENT")]
    pub agent: Option<String>,

    /// List per-user installs instead of the project ones
    #[arg(long)]
    pub global: bool,

    /// List skills published in the registry instead of installed ones
    #[arg(long)]
    pub available: bool,

    /// Refetch the registry even when the cached copy is still fresh
    #[arg(long)]
    pub refresh: bool,
}
