use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Skill name
    pub name: String,

    /// Refetch the registry even when the cached copy is still fresh
    #[arg(long)]
    pub refresh: bool,
}
