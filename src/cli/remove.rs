use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Remove from detected agents:\n    skillfetch remove my-skill\n\n\
                   Remove a per-user install:\n    skillfetch remove my-skill --global")]
pub struct RemoveArgs {
    /// Skill name to remove
    pub skill: String,

    /// Remove only for specific agents (repeatable)
    #[arg(long = "agent", short = 'a', value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Remove the per-user install instead of the project one
    #[arg(long)]
    pub global: bool,
}
